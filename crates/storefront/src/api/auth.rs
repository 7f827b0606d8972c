//! Account endpoints.
//!
//! Register and login persist the returned token; logout removes it once the
//! backend has acknowledged the request.

use tracing::{debug, instrument};
use url::Url;

use lulu_core::SocialProvider;

use super::types::{
    AuthResponse, ForgotPasswordRequest, LoginRequest, MessageResponse, RegisterRequest,
    UpdateProfileRequest, User,
};
use super::{ApiClient, ApiError};

impl ApiClient {
    /// Create an account and start a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the token cannot be stored.
    #[instrument(skip_all, fields(email = %request.email))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        let response: AuthResponse = self.post(&["auth", "register"], request).await?;
        self.remember_token(&response)?;
        Ok(response)
    }

    /// Sign in and start a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the token cannot be stored.
    #[instrument(skip_all, fields(email = %request.email))]
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let response: AuthResponse = self.post(&["auth", "login"], request).await?;
        self.remember_token(&response)?;
        Ok(response)
    }

    fn remember_token(&self, response: &AuthResponse) -> Result<(), ApiError> {
        if !response.token.is_empty() {
            self.tokens().set(&response.token)?;
            debug!(user_id = %response.user.id, "Stored session token");
        }
        Ok(())
    }

    /// The signed-in user.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails (401 when signed out).
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.get(&["auth", "me"], &[]).await
    }

    /// Update the signed-in user's profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn update_profile(&self, request: &UpdateProfileRequest) -> Result<User, ApiError> {
        self.put(&["auth", "update-profile"], request).await
    }

    /// Ask the backend to email a password reset link.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn forgot_password(&self, email: &str) -> Result<MessageResponse, ApiError> {
        let request = ForgotPasswordRequest {
            email: email.to_string(),
        };
        self.post(&["auth", "forgot-password"], &request).await
    }

    /// End the session. The stored token is kept if the backend call fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the token cannot be removed.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<MessageResponse, ApiError> {
        let response: MessageResponse = self.get(&["auth", "logout"], &[]).await?;
        self.tokens().clear()?;
        Ok(response)
    }

    /// URL that starts the OAuth flow for `provider`.
    ///
    /// The backend redirects back to `{origin}/auth/callback?provider=<p>`
    /// with either a `token` or an `error` query parameter.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be built.
    pub fn social_login_url(&self, provider: SocialProvider, origin: &Url) -> Result<Url, ApiError> {
        let origin = origin.as_str().trim_end_matches('/');
        let mut callback = Url::parse(&format!("{origin}/auth/callback"))?;
        callback
            .query_pairs_mut()
            .append_pair("provider", provider.as_str());

        self.endpoint(
            &["auth", provider.as_str()],
            &[("redirect", callback.to_string())],
        )
    }
}
