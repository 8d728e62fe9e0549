//! User registration rules.

use serde::Deserialize;
use validator::Validate;

use crate::form::{clean_text, FieldErrors};

/// Raw registration submission.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RegistrationForm {
    #[validate(
        required(message = "This field is required."),
        length(
            max = 150,
            message = "Ensure this value has at most 150 characters."
        )
    )]
    pub username: Option<String>,
    #[validate(
        required(message = "This field is required."),
        length(
            min = 8,
            message = "This password is too short. It must contain at least 8 characters."
        )
    )]
    pub password: Option<String>,
    #[validate(required(message = "This field is required."))]
    pub password_confirm: Option<String>,
}

/// A validated registration. The password is still plaintext here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub username: String,
    pub password: String,
}

/// Letters, digits and `@ . + - _` only.
fn is_valid_username(username: &str) -> bool {
    username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
}

/// Validate a registration form.
///
/// Passwords are compared verbatim; only the username is trimmed.
pub fn validate_registration(form: &RegistrationForm) -> Result<NewAccount, FieldErrors> {
    let form = RegistrationForm {
        username: clean_text(form.username.as_deref()),
        ..form.clone()
    };
    let mut errors = match form.validate() {
        Ok(()) => FieldErrors::new(),
        Err(e) => FieldErrors::from(e),
    };

    if let Some(username) = form.username.as_deref() {
        if !is_valid_username(username) {
            errors.add(
                "username",
                "Enter a valid username. This value may contain only letters, numbers, and \
                 @/./+/-/_ characters.",
            );
        }
    }

    if let Some(password) = form.password.as_deref() {
        if !password.is_empty() && password.chars().all(|c| c.is_ascii_digit()) {
            errors.add("password", "This password is entirely numeric.");
        }
    }

    if let (Some(password), Some(confirm)) = (&form.password, &form.password_confirm) {
        if password != confirm {
            errors.add("password_confirm", "The two password fields didn't match.");
        }
    }

    match (form.username, form.password) {
        (Some(username), Some(password)) if errors.is_empty() => {
            Ok(NewAccount { username, password })
        }
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(username: &str, password: &str, confirm: &str) -> RegistrationForm {
        RegistrationForm {
            username: Some(username.into()),
            password: Some(password.into()),
            password_confirm: Some(confirm.into()),
        }
    }

    #[test]
    fn valid_registration_passes() {
        let account = validate_registration(&form(" alice ", "s3cure-pass", "s3cure-pass")).unwrap();
        assert_eq!(account.username, "alice");
        assert_eq!(account.password, "s3cure-pass");
    }

    #[test]
    fn mismatched_passwords_are_rejected() {
        let errors = validate_registration(&form("alice", "s3cure-pass", "other-pass")).unwrap_err();
        assert!(errors.contains("password_confirm"));
    }

    #[test]
    fn short_and_numeric_passwords_are_rejected() {
        assert!(validate_registration(&form("alice", "short", "short"))
            .unwrap_err()
            .contains("password"));
        assert!(validate_registration(&form("alice", "1234567890", "1234567890"))
            .unwrap_err()
            .contains("password"));
    }

    #[test]
    fn username_charset_is_restricted() {
        let errors = validate_registration(&form("bad name!", "s3cure-pass", "s3cure-pass")).unwrap_err();
        assert!(errors.contains("username"));
        assert!(validate_registration(&form("a.b+c-d_e@f", "s3cure-pass", "s3cure-pass")).is_ok());
    }

    #[test]
    fn missing_fields_are_required() {
        let errors = validate_registration(&RegistrationForm::default()).unwrap_err();
        assert!(errors.contains("username"));
        assert!(errors.contains("password"));
        assert!(errors.contains("password_confirm"));
    }
}
