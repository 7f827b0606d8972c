//! Completing a social sign-in.
//!
//! After the provider flow the backend redirects to
//! `{origin}/auth/callback?provider=<p>&token=<t>` on success or with
//! `error=<reason>` on failure.

use url::{Url, form_urlencoded};

use crate::api::ApiClient;
use crate::api::types::User;
use crate::storage::StorageError;

/// Reason given when the callback carries neither a token nor an error.
pub const NO_TOKEN_MESSAGE: &str = "No token received from authentication provider";

/// Query parameters of the OAuth callback. Empty values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackParams {
    pub token: Option<String>,
    pub error: Option<String>,
    pub provider: Option<String>,
}

impl CallbackParams {
    /// Parse a full callback URL or a bare query string (with or without `?`).
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        let query = match Url::parse(input) {
            Ok(url) => url.query().unwrap_or_default().to_string(),
            Err(_) => input.trim_start_matches('?').to_string(),
        };

        let mut params = Self::default();
        for (name, value) in form_urlencoded::parse(query.as_bytes()) {
            if value.is_empty() {
                continue;
            }
            let slot = match name.as_ref() {
                "token" => &mut params.token,
                "error" => &mut params.error,
                "provider" => &mut params.provider,
                _ => continue,
            };
            slot.get_or_insert_with(|| value.into_owned());
        }
        params
    }
}

/// Result of handling a callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    /// The token was stored. `user` is `None` if the profile lookup failed.
    Success {
        provider: Option<String>,
        user: Option<User>,
    },
    Failed { reason: String },
}

impl CallbackOutcome {
    /// Notification text for the outcome.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Success { provider, .. } => format!(
                "Successfully logged in with {}!",
                provider.as_deref().unwrap_or("social login")
            ),
            Self::Failed { reason } if reason == NO_TOKEN_MESSAGE => reason.clone(),
            Self::Failed { reason } => format!("Social login failed: {reason}"),
        }
    }
}

/// Finish a social sign-in from the callback parameters.
///
/// An `error` wins over a `token`. With a token, the token is stored and the
/// profile fetched; a failed profile fetch still counts as success.
///
/// # Errors
///
/// Returns a [`StorageError`] if the token cannot be stored.
pub async fn complete_social_login(
    api: &ApiClient,
    params: &CallbackParams,
) -> Result<CallbackOutcome, StorageError> {
    if let Some(error) = &params.error {
        tracing::warn!(error = %error, provider = ?params.provider, "social login failed");
        return Ok(CallbackOutcome::Failed {
            reason: error.clone(),
        });
    }

    let Some(token) = &params.token else {
        return Ok(CallbackOutcome::Failed {
            reason: NO_TOKEN_MESSAGE.to_string(),
        });
    };

    api.tokens().set(token)?;

    let user = match api.current_user().await {
        Ok(user) => Some(user),
        Err(e) => {
            tracing::debug!(error = %e, "profile lookup after social login failed");
            None
        }
    };

    Ok(CallbackOutcome::Success {
        provider: params.provider.clone(),
        user,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_url() {
        let params = CallbackParams::parse(
            "http://localhost:3000/auth/callback?provider=google&token=abc%2E123",
        );
        assert_eq!(params.token.as_deref(), Some("abc.123"));
        assert_eq!(params.provider.as_deref(), Some("google"));
        assert_eq!(params.error, None);
    }

    #[test]
    fn test_parse_bare_query() {
        let params = CallbackParams::parse("?error=access_denied&provider=facebook");
        assert_eq!(params.error.as_deref(), Some("access_denied"));
        assert_eq!(params.token, None);

        let params = CallbackParams::parse("token=t1");
        assert_eq!(params.token.as_deref(), Some("t1"));
    }

    #[test]
    fn test_empty_values_are_absent() {
        let params = CallbackParams::parse("token=&error=&provider=google");
        assert_eq!(params.token, None);
        assert_eq!(params.error, None);
    }

    #[test]
    fn test_outcome_messages() {
        let success = CallbackOutcome::Success {
            provider: Some("google".into()),
            user: None,
        };
        assert_eq!(success.message(), "Successfully logged in with google!");

        let failed = CallbackOutcome::Failed {
            reason: "access_denied".into(),
        };
        assert_eq!(failed.message(), "Social login failed: access_denied");

        let no_token = CallbackOutcome::Failed {
            reason: NO_TOKEN_MESSAGE.into(),
        };
        assert_eq!(no_token.message(), NO_TOKEN_MESSAGE);
    }
}
