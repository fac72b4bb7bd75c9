//! Contact shape validation.
//!
//! Pure functions; nothing here touches storage.

use std::sync::LazyLock;

use regex::Regex;

use super::types::{Contact, ValidationError};

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern is valid")
});

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10,15}$").expect("phone pattern is valid"));

/// Check a candidate contact, returning the first problem found.
///
/// Order: name, then email, then phone. Empty email and phone are accepted.
pub fn validate_contact(contact: &Contact) -> Result<(), ValidationError> {
    if contact.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if contact.has_email() && !is_valid_email(&contact.email) {
        return Err(ValidationError::InvalidEmail);
    }
    if contact.has_phone() && !is_valid_phone(&contact.phone) {
        return Err(ValidationError::InvalidPhone);
    }
    Ok(())
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// 10 to 15 ASCII digits, nothing else.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_PATTERN.is_match(phone)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_name_only() {
        assert_eq!(validate_contact(&Contact::new("Ana", "", "")), Ok(()));
    }

    #[test]
    fn test_accepts_full_contact() {
        let contact = Contact::new("Ana", "ana.souza+work@mail.example.com", "11999998888");
        assert_eq!(validate_contact(&contact), Ok(()));
    }

    #[test]
    fn test_rejects_blank_name() {
        assert_eq!(validate_contact(&Contact::new("", "", "")), Err(ValidationError::EmptyName));
        assert_eq!(validate_contact(&Contact::new("   ", "", "")), Err(ValidationError::EmptyName));
    }

    #[test]
    fn test_name_checked_before_email() {
        let contact = Contact::new("", "not-an-email", "12");
        assert_eq!(validate_contact(&contact), Err(ValidationError::EmptyName));
    }

    #[test]
    fn test_rejects_malformed_emails() {
        for email in ["plain", "a@b", "a@b.c", "@x.com", "a b@x.com", "a@@x.com"] {
            assert!(!is_valid_email(email), "{email} should be rejected");
        }
        assert_eq!(
            validate_contact(&Contact::new("Ana", "a@b", "")),
            Err(ValidationError::InvalidEmail)
        );
    }

    #[test]
    fn test_phone_length_bounds() {
        assert!(!is_valid_phone("123456789"));
        assert!(is_valid_phone("1234567890"));
        assert!(is_valid_phone("123456789012345"));
        assert!(!is_valid_phone("1234567890123456"));
    }

    #[test]
    fn test_rejects_non_digit_phone() {
        assert!(!is_valid_phone("+5511999998888"));
        assert!(!is_valid_phone("(11) 99999-8888"));
        assert_eq!(
            validate_contact(&Contact::new("Ana", "", "11 99999 8888")),
            Err(ValidationError::InvalidPhone)
        );
    }
}
