//! Login and logout against the brokerage backend
//!
//! Login goes through the same [`ApiClient`] as every other call but the
//! client never attaches a bearer token to it and never tries to refresh
//! after a failed login, so a wrong password surfaces as the backend's 401.

use std::sync::Arc;

use importdesk_domain::{AdminUser, LoginRequest, LoginResponse};
use tracing::{info, instrument};

use super::client::ApiClient;
use super::errors::ApiError;
use super::request::ApiRequest;

/// Session lifecycle operations
#[derive(Debug, Clone)]
pub struct AuthService {
    client: Arc<ApiClient>,
}

impl AuthService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Authenticate and persist the issued token pair.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with status 401 for bad credentials, or a
    /// storage error if the tokens cannot be persisted.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AdminUser, ApiError> {
        let body = LoginRequest { email: email.to_string(), password: password.to_string() };
        let request = ApiRequest::post(self.client.policy().login_endpoint()).with_json(&body)?;

        let response: LoginResponse = self.client.fetch(request).await?;
        self.client.token_store().store(&response.tokens).await?;

        info!(user_id = %response.user.id, "Logged in");
        Ok(response.user)
    }

    /// Forget the stored credentials. The backend keeps no session to end.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.client.token_store().clear().await?;
        info!("Logged out");
        Ok(())
    }

    /// Whether an access token is stored
    pub async fn is_authenticated(&self) -> Result<bool, ApiError> {
        Ok(self.client.token_store().access_token().await?.is_some())
    }
}
