//! Credential store backed by the platform keychain
//!
//! Each token is its own keychain entry under the configured service, with
//! the fixed key as account name.

use async_trait::async_trait;
use importdesk_core::TokenStore;
use importdesk_domain::constants::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
use importdesk_domain::{Result, TokenPair};
use keyring::Entry;
use tracing::debug;

use crate::errors::InfraError;

/// Persists credentials in macOS Keychain, Windows Credential Manager or the
/// Secret Service, whichever `keyring` resolves for the platform.
pub struct KeychainTokenStore {
    service: String,
    access: Entry,
    refresh: Entry,
}

impl std::fmt::Debug for KeychainTokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeychainTokenStore").field("service", &self.service).finish()
    }
}

impl KeychainTokenStore {
    /// # Errors
    /// Returns a storage error if the platform rejects the entry names.
    pub fn new(service: impl Into<String>) -> Result<Self> {
        let service = service.into();
        let access = Entry::new(&service, ACCESS_TOKEN_KEY).map_err(InfraError::from)?;
        let refresh = Entry::new(&service, REFRESH_TOKEN_KEY).map_err(InfraError::from)?;
        Ok(Self { service, access, refresh })
    }

    pub fn service(&self) -> &str {
        &self.service
    }
}

fn read(entry: &Entry) -> Result<Option<String>> {
    match entry.get_password() {
        Ok(secret) => Ok(Some(secret)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(err) => Err(InfraError::from(err).into()),
    }
}

fn delete(entry: &Entry) -> Result<()> {
    match entry.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(err) => Err(InfraError::from(err).into()),
    }
}

#[async_trait]
impl TokenStore for KeychainTokenStore {
    async fn access_token(&self) -> Result<Option<String>> {
        read(&self.access)
    }

    async fn refresh_token(&self) -> Result<Option<String>> {
        read(&self.refresh)
    }

    async fn store(&self, tokens: &TokenPair) -> Result<()> {
        self.access.set_password(&tokens.access_token).map_err(InfraError::from)?;
        self.refresh.set_password(&tokens.refresh_token).map_err(InfraError::from)?;
        debug!(service = %self.service, "Stored session credentials in keychain");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        delete(&self.access)?;
        delete(&self.refresh)?;
        debug!(service = %self.service, "Cleared session credentials from keychain");
        Ok(())
    }
}
