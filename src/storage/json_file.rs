//! Single-file JSON store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{ContactStore, StorageError};
use crate::contacts::Contact;

/// Stores the collection as one pretty-printed JSON array.
///
/// The file is rewritten in full on every save. The write is not atomic: a
/// crash mid-write can leave a truncated file behind, which the next load
/// reports as [`StorageError::Decode`].
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContactStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Contact>, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "Contacts file absent, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(StorageError::Io(e)),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(StorageError::Decode)
    }

    fn save(&self, contacts: &[Contact]) -> Result<(), StorageError> {
        // serde_json's pretty printer indents with two spaces.
        let data = serde_json::to_string_pretty(contacts).map_err(StorageError::Encode)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, data)?;

        tracing::debug!(path = %self.path.display(), count = contacts.len(), "Contacts saved");
        Ok(())
    }
}
