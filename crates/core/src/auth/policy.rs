//! Classification of failed responses
//!
//! Only a 401 can start a refresh. Responses from the login and refresh
//! endpoints are always handed back untouched so a bad password or a revoked
//! refresh token can never loop into another refresh.

use importdesk_domain::constants::{LOGIN_ENDPOINT, REFRESH_ENDPOINT};

const UNAUTHORIZED: u16 = 401;

/// What the client must do with a failed response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailureAction {
    /// Return the error to the caller unchanged
    Propagate,
    /// Clear credentials, announce expiry, return the error
    ExpireSession,
    /// Obtain a new access token (or wait for the one being obtained) and replay
    Refresh,
}

/// Decides how an error response affects the session
#[derive(Debug, Clone)]
pub struct AuthFailurePolicy {
    login_endpoint: String,
    refresh_endpoint: String,
}

impl Default for AuthFailurePolicy {
    fn default() -> Self {
        Self::new(LOGIN_ENDPOINT, REFRESH_ENDPOINT)
    }
}

impl AuthFailurePolicy {
    #[must_use]
    pub fn new(login_endpoint: impl Into<String>, refresh_endpoint: impl Into<String>) -> Self {
        Self { login_endpoint: login_endpoint.into(), refresh_endpoint: refresh_endpoint.into() }
    }

    #[must_use]
    pub fn login_endpoint(&self) -> &str {
        &self.login_endpoint
    }

    #[must_use]
    pub fn refresh_endpoint(&self) -> &str {
        &self.refresh_endpoint
    }

    /// Whether `path` is the login or refresh endpoint.
    ///
    /// Query strings and trailing slashes are ignored.
    #[must_use]
    pub fn is_auth_endpoint(&self, path: &str) -> bool {
        let path = normalize(path);
        path == normalize(&self.login_endpoint) || path == normalize(&self.refresh_endpoint)
    }

    /// Classify a failed response.
    ///
    /// # Arguments
    /// * `status` - HTTP status of the response
    /// * `path` - request path relative to the API base URL
    /// * `has_refresh_token` - whether a refresh token is currently stored
    #[must_use]
    pub fn classify(&self, status: u16, path: &str, has_refresh_token: bool) -> AuthFailureAction {
        if status != UNAUTHORIZED || self.is_auth_endpoint(path) {
            return AuthFailureAction::Propagate;
        }

        if has_refresh_token {
            AuthFailureAction::Refresh
        } else {
            AuthFailureAction::ExpireSession
        }
    }
}

fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}
