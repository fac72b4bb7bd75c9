//! Persistence of the contact collection.
//!
//! # Responsibilities
//! - Load the whole collection from disk
//! - Save the whole collection back to disk
//!
//! # Design Decisions
//! - The collection is always read and written as a unit
//! - A missing file is an empty collection, not an error
//! - The file location is passed in at construction time
//! - No locking here; callers serialize access (see `ContactService`)

pub mod json_file;

use thiserror::Error;

use crate::contacts::Contact;

pub use json_file::JsonFileStore;

/// Errors raised while reading or writing the collection.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored contacts are malformed: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to encode contacts: {0}")]
    Encode(#[source] serde_json::Error),
}

/// A backend able to load and save the full contact collection.
pub trait ContactStore: Send + Sync + 'static {
    /// Load every stored contact, in insertion order.
    fn load(&self) -> Result<Vec<Contact>, StorageError>;

    /// Replace the stored collection with `contacts`.
    fn save(&self, contacts: &[Contact]) -> Result<(), StorageError>;
}
