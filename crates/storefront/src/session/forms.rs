//! Client-side checks run before auth requests are sent.

use lulu_core::{Email, EmailError};
use thiserror::Error;

use crate::api::types::{LoginRequest, RegisterRequest};

/// Why a form was rejected. The display text is shown to the user as is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Please fill in all required fields")]
    MissingFields,

    #[error("Please enter a valid email address: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Please enter your password")]
    MissingPassword,
}

/// Sign-up form as entered.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    /// Check the form and build the request body.
    ///
    /// The password confirmation is checked first, then the required name
    /// and phone fields, then the email.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> Result<RegisterRequest, ValidationError> {
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        if [&self.first_name, &self.last_name, &self.phone]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(ValidationError::MissingFields);
        }
        if self.password.is_empty() {
            return Err(ValidationError::MissingPassword);
        }
        let email = Email::parse(&self.email)?;

        Ok(RegisterRequest {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: email.into_inner(),
            phone: self.phone.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

/// Sign-in form as entered.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// Check the form and build the request body.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> Result<LoginRequest, ValidationError> {
        let email = Email::parse(&self.email)?;
        if self.password.is_empty() {
            return Err(ValidationError::MissingPassword);
        }
        Ok(LoginRequest {
            email: email.into_inner(),
            password: self.password.clone(),
        })
    }
}
