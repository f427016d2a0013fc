//! Client-side validation for the login and todo forms.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::models::LoginCredentials;

pub const MIN_PASSWORD_LEN: usize = 8;

const EMAIL_PATTERN: &str = r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$";

/// One failed field rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FormError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FormError {
    fn new(
        field: &'static str,
        message: &'static str,
    ) -> Self {
        Self { field, message }
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"))
}

/// Returns `true` for `local@domain.tld`-shaped addresses.
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Raw values typed into the login form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Checks every field and returns the request body on success.
    ///
    /// Rules:
    /// - email is required and must look like `local@domain.tld`
    /// - password is required and at least eight characters long
    pub fn validate(&self) -> Result<LoginCredentials, Vec<FormError>> {
        let mut errors = Vec::new();

        if self.email.is_empty() {
            errors.push(FormError::new("email", "email is required"));
        } else if !is_valid_email(&self.email) {
            errors.push(FormError::new("email", "enter a valid email address"));
        }

        if self.password.is_empty() {
            errors.push(FormError::new("password", "password is required"));
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.push(FormError::new(
                "password",
                "password must be at least 8 characters",
            ));
        }

        if errors.is_empty() {
            Ok(LoginCredentials {
                email: self.email.clone(),
                password: self.password.clone(),
            })
        } else {
            Err(errors)
        }
    }
}

/// Raw values typed into the new-todo form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoForm {
    pub user_name: String,
    pub title: String,
}

impl TodoForm {
    pub fn new(
        user_name: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            user_name: user_name.into(),
            title: title.into(),
        }
    }

    /// Both fields are required after trimming whitespace.
    pub fn validate(&self) -> Result<(), Vec<FormError>> {
        let mut errors = Vec::new();

        if self.user_name.trim().is_empty() {
            errors.push(FormError::new("user_name", "user name is required"));
        }
        if self.title.trim().is_empty() {
            errors.push(FormError::new("title", "todo title is required"));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    // =========================================================================
    // email tests
    // =========================================================================

    #[test]
    fn email_accepts_common_addresses() {
        for email in ["user@example.com", "First.Last+tag@mail.example.co.jp", "A_B%c@x-y.io"] {
            assert!(is_valid_email(email), "{email} should be valid");
        }
    }

    #[test]
    fn email_rejects_malformed_addresses() {
        for email in ["user", "user@", "@example.com", "user@example", "user@example.c", "a b@c.de"] {
            assert!(!is_valid_email(email), "{email} should be invalid");
        }
    }

    // =========================================================================
    // LoginForm tests
    // =========================================================================

    #[test]
    fn login_form_returns_credentials_when_valid() {
        let form = LoginForm::new("user@example.com", "correct-horse");

        assert_eq!(
            form.validate(),
            Ok(LoginCredentials {
                email: "user@example.com".to_string(),
                password: "correct-horse".to_string(),
            })
        );
    }

    #[test]
    fn login_form_reports_every_missing_field() {
        let errors = LoginForm::default().validate().unwrap_err();

        assert_eq!(
            errors,
            vec![
                FormError::new("email", "email is required"),
                FormError::new("password", "password is required"),
            ]
        );
    }

    #[test]
    fn login_form_rejects_short_password() {
        let errors = LoginForm::new("user@example.com", "1234567")
            .validate()
            .unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "password");
    }

    #[test]
    fn login_form_counts_characters_not_bytes() {
        assert!(LoginForm::new("user@example.com", "パスワードです。").validate().is_ok());
    }

    #[test]
    fn login_form_rejects_invalid_email() {
        let errors = LoginForm::new("not-an-email", "long enough")
            .validate()
            .unwrap_err();

        assert_eq!(errors, vec![FormError::new("email", "enter a valid email address")]);
    }

    // =========================================================================
    // TodoForm tests
    // =========================================================================

    #[test]
    fn todo_form_accepts_filled_fields() {
        assert_eq!(TodoForm::new("hanako", "write report").validate(), Ok(()));
    }

    #[test]
    fn todo_form_rejects_whitespace_only_fields() {
        let errors = TodoForm::new("  ", "\t").validate().unwrap_err();

        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["user_name", "title"]);
    }

    #[test]
    fn form_error_displays_field_and_message() {
        let error = FormError::new("title", "todo title is required");

        assert_eq!(error.to_string(), "title: todo title is required");
    }
}
