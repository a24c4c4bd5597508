use serde::Serialize;

use crate::error::ValidationError;

/// Minimum accepted password length for registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Body of `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Registration form input.
///
/// `password_confirm` is checked locally and never sent to the backend.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub company: String,
    pub password: String,
    #[serde(skip)]
    pub password_confirm: String,
}

impl Registration {
    /// Checks the local registration invariants.
    ///
    /// Confirmation mismatch is reported before the length check, so a
    /// mismatched pair is rejected regardless of password strength.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.password != self.password_confirm {
            return Err(ValidationError::PasswordMismatch);
        }

        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(password: &str, confirm: &str) -> Registration {
        Registration {
            name: "Ali".to_string(),
            email: "ali@example.com".to_string(),
            company: "Acme".to_string(),
            password: password.to_string(),
            password_confirm: confirm.to_string(),
        }
    }

    #[test]
    fn test_length_boundary() {
        assert_eq!(
            registration("12345", "12345").validate(),
            Err(ValidationError::PasswordTooShort { min: 6 })
        );
        assert!(registration("123456", "123456").validate().is_ok());
    }

    #[test]
    fn test_mismatch_checked_first() {
        assert_eq!(
            registration("123", "124").validate(),
            Err(ValidationError::PasswordMismatch)
        );
        assert_eq!(
            registration("longenough", "longenough!").validate(),
            Err(ValidationError::PasswordMismatch)
        );
    }

    #[test]
    fn test_length_counts_characters() {
        // six characters, more than six bytes
        assert!(registration("şifreş", "şifreş").validate().is_ok());
    }

    #[test]
    fn test_confirmation_not_serialized() {
        let value = serde_json::to_value(registration("123456", "123456")).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("password_confirm"));
        assert_eq!(object.len(), 4);
    }
}
