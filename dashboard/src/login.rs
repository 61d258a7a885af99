//! Login form validation.
//!
//! The form is the trust boundary for credentials: it only produces a
//! [`AppAction::Login`] once the email looks like `local@domain.tld` and the
//! password is long enough. The reducer accepts whatever it is given.

use crate::state::AppAction;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Minimum password length, in characters
pub const MIN_PASSWORD_LENGTH: usize = 8;

#[allow(clippy::expect_used)] // Pattern is a compile-time constant
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Whether the address has the shape `local@domain.tld`
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Why the form cannot be submitted
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFormError {
    /// Email is not of the form `local@domain.tld`
    #[error("Email address is not valid")]
    InvalidEmail,

    /// Password is shorter than [`MIN_PASSWORD_LENGTH`]
    #[error("Password must be at least 8 characters")]
    PasswordTooShort,
}

/// State of the login form
#[derive(Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    email: String,
    password: String,
}

impl LoginForm {
    /// An empty form
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current email input
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Update the email input
    pub fn change_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    /// Update the password input
    pub fn change_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    /// Check both inputs
    ///
    /// # Errors
    ///
    /// Returns the first failing rule, email first.
    pub fn validate(&self) -> Result<(), LoginFormError> {
        if !is_valid_email(&self.email) {
            return Err(LoginFormError::InvalidEmail);
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(LoginFormError::PasswordTooShort);
        }
        Ok(())
    }

    /// Whether the submit button is enabled
    #[must_use]
    pub fn enable_submit(&self) -> bool {
        self.validate().is_ok()
    }

    /// Submit the form
    ///
    /// Returns the login action, or `None` while submit is disabled.
    #[must_use]
    pub fn submit(&self) -> Option<AppAction> {
        if !self.enable_submit() {
            tracing::debug!("Login submit ignored: form is invalid");
            return None;
        }
        Some(AppAction::Login {
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
