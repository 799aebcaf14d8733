/**
 * Field Validators
 *
 * Shape rules for identity fields. Stores re-apply these on every write so a
 * record can never hold an out-of-bounds name or a malformed email, and the
 * HTTP layer applies them to inbound payloads before anything else runs.
 */

use crate::shared::SharedError;

/// Shortest allowed display name, in characters
pub const NAME_MIN_LEN: usize = 2;
/// Longest allowed display name, in characters
pub const NAME_MAX_LEN: usize = 30;
/// Longest accepted plaintext password, in characters
pub const PASSWORD_MAX_LEN: usize = 35;

/// Check that an email address is well-formed
///
/// One `@`, a non-empty local part, a dotted domain
/// with no empty labels, and no whitespace anywhere.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

/// Check that a display name is within bounds
pub fn is_valid_name(name: &str) -> bool {
    let len = name.chars().count();
    (NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len)
}

pub fn validate_email(email: &str) -> Result<(), SharedError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(SharedError::validation("email", "Invalid email format"))
    }
}

pub fn validate_name(name: &str) -> Result<(), SharedError> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(SharedError::validation(
            "name",
            format!("Name must be {NAME_MIN_LEN}-{NAME_MAX_LEN} characters"),
        ))
    }
}

/// Passwords must be present and no longer than `PASSWORD_MAX_LEN`
pub fn validate_password(password: &str) -> Result<(), SharedError> {
    if password.is_empty() {
        return Err(SharedError::validation("password", "Password is required"));
    }
    if password.chars().count() > PASSWORD_MAX_LEN {
        return Err(SharedError::validation(
            "password",
            format!("Password must be at most {PASSWORD_MAX_LEN} characters"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("first.last+tag@mail.example.org"));
    }

    #[test]
    fn test_invalid_emails() {
        for email in ["", "plain", "@x.com", "a@", "a@x", "a@@x.com", "a@x..com", "a b@x.com", "a@.com"] {
            assert!(!is_valid_email(email), "{email:?} should be rejected");
        }
    }

    #[test]
    fn test_name_bounds_count_characters() {
        assert!(!is_valid_name("A"));
        assert!(is_valid_name("Ann"));
        assert!(is_valid_name(&"a".repeat(30)));
        assert!(!is_valid_name(&"a".repeat(31)));
        // Two characters, four bytes
        assert!(is_valid_name("Жа"));
    }

    #[test]
    fn test_password_rules() {
        assert!(validate_password("").is_err());
        assert!(validate_password("pw123456").is_ok());
        assert!(validate_password(&"p".repeat(35)).is_ok());
        assert!(validate_password(&"p".repeat(36)).is_err());
    }

    #[test]
    fn test_validation_error_names_field() {
        match validate_name("A") {
            Err(SharedError::ValidationError { field, .. }) => assert_eq!(field, "name"),
            other => panic!("Expected ValidationError, got {other:?}"),
        }
    }
}
