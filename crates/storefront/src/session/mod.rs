//! Signed-in session state.
//!
//! The bearer token lives in the key-value store so a session survives
//! restarts. Form validation runs before any auth request is sent.

mod forms;
mod oauth;
mod token;

pub use forms::{LoginForm, RegistrationForm, ValidationError};
pub use oauth::{CallbackOutcome, CallbackParams, complete_social_login};
pub use token::TokenStore;
