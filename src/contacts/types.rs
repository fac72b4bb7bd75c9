//! Contact record types and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::StorageError;

/// A single entry of the contact list.
///
/// Missing fields deserialize to their defaults, so a request body of
/// `{"name": "Ana"}` is a complete candidate. The `id` of a candidate is
/// always ignored; the service assigns it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl Contact {
    /// Build a candidate contact (id unset).
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    pub fn has_email(&self) -> bool {
        !self.email.is_empty()
    }

    pub fn has_phone(&self) -> bool {
        !self.phone.is_empty()
    }
}

/// Aggregate statistics over the whole collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSummary {
    pub total: usize,
    pub with_email: usize,
    pub with_phone: usize,
    /// Name of the most recently appended contact, empty when there is none.
    pub last_contact_name: String,
    /// Lowercased names occurring at least twice, sorted.
    pub duplicated_names: Vec<String>,
}

/// Shape errors found in a candidate contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("contact name cannot be empty")]
    EmptyName,

    #[error("invalid email format")]
    InvalidEmail,

    #[error("invalid phone format")]
    InvalidPhone,
}

/// Errors returned by [`ContactService`](super::ContactService) operations.
#[derive(Debug, Error)]
pub enum ContactError {
    /// The candidate contact failed validation. Nothing was written.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No contact carries the requested id. Nothing was written.
    #[error("contact {0} not found")]
    NotFound(u64),

    /// The highest stored id is `u64::MAX`, so no new id can be assigned.
    #[error("no contact id left after {0}")]
    IdSpaceExhausted(u64),

    /// Reading or writing the backing file failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type for contact operations.
pub type ContactResult<T> = Result<T, ContactError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_body_deserializes_with_defaults() {
        let contact: Contact = serde_json::from_str(r#"{"name": "Ana"}"#).unwrap();
        assert_eq!(contact, Contact::new("Ana", "", ""));
        assert!(!contact.has_email());
        assert!(!contact.has_phone());
    }

    #[test]
    fn test_summary_uses_camel_case_keys() {
        let summary = ContactSummary {
            total: 2,
            with_email: 1,
            with_phone: 1,
            last_contact_name: "alice".into(),
            duplicated_names: vec!["alice".into()],
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "total": 2,
                "withEmail": 1,
                "withPhone": 1,
                "lastContactName": "alice",
                "duplicatedNames": ["alice"],
            })
        );
    }
}
