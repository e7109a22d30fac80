//! Session ports for credential persistence and expiry notification.
//!
//! The API client reads credentials through [`TokenStore`] before every
//! request and announces an unrecoverable session through
//! [`SessionListener`]. The hosting application decides what "go to the login
//! screen" means.
//!
//! # Example
//!
//! ```no_run
//! use importdesk_core::TokenStore;
//!
//! async fn bearer_header(store: &impl TokenStore) -> Option<String> {
//!     store.access_token().await.ok().flatten().map(|token| format!("Bearer {token}"))
//! }
//! ```

use async_trait::async_trait;
use importdesk_domain::{Result, TokenPair};

/// Port for the persisted session credentials.
///
/// Implementations hold exactly two values, the access token and the refresh
/// token, under fixed keys. Writes replace both values together.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Current access token, `None` when logged out.
    async fn access_token(&self) -> Result<Option<String>>;

    /// Current refresh token, `None` when logged out.
    async fn refresh_token(&self) -> Result<Option<String>>;

    /// Replace both credentials (after login or refresh).
    async fn store(&self, tokens: &TokenPair) -> Result<()>;

    /// Remove both credentials. Idempotent.
    async fn clear(&self) -> Result<()>;
}

/// Receives the "session expired" signal.
///
/// Called when the credentials were cleared because they can no longer be
/// renewed. `login_path` is the configured login entry point.
pub trait SessionListener: Send + Sync {
    fn session_expired(&self, login_path: &str);
}

/// Listener that ignores expiry; useful for scripts and batch jobs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSessionListener;

impl SessionListener for NoopSessionListener {
    fn session_expired(&self, _login_path: &str) {}
}
