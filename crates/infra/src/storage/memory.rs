//! In-process credential store

use async_trait::async_trait;
use importdesk_core::TokenStore;
use importdesk_domain::{Result, TokenPair};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Slots {
    access_token: Option<String>,
    refresh_token: Option<String>,
}

/// Keeps credentials in memory; they are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slots: RwLock<Slots>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with a full pair
    pub fn with_tokens(tokens: &TokenPair) -> Self {
        Self::from_parts(Some(tokens.access_token.clone()), Some(tokens.refresh_token.clone()))
    }

    /// Store seeded with each value independently, e.g. an access token whose
    /// refresh token was never issued.
    pub fn from_parts(access_token: Option<String>, refresh_token: Option<String>) -> Self {
        Self { slots: RwLock::new(Slots { access_token, refresh_token }) }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn access_token(&self) -> Result<Option<String>> {
        Ok(self.slots.read().await.access_token.clone())
    }

    async fn refresh_token(&self) -> Result<Option<String>> {
        Ok(self.slots.read().await.refresh_token.clone())
    }

    async fn store(&self, tokens: &TokenPair) -> Result<()> {
        let mut slots = self.slots.write().await;
        slots.access_token = Some(tokens.access_token.clone());
        slots.refresh_token = Some(tokens.refresh_token.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.slots.write().await = Slots::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn store_replaces_both_tokens() {
        let store = MemoryTokenStore::from_parts(Some("old".into()), None);

        store.store(&TokenPair::new("a2", "r2")).await.unwrap();

        assert_eq!(store.access_token().await.unwrap().as_deref(), Some("a2"));
        assert_eq!(store.refresh_token().await.unwrap().as_deref(), Some("r2"));
    }

    #[tokio::test]
    async fn clear_is_idempotent() {
        let store = MemoryTokenStore::with_tokens(&TokenPair::new("a", "r"));

        store.clear().await.unwrap();
        store.clear().await.unwrap();

        assert!(store.access_token().await.unwrap().is_none());
        assert!(store.refresh_token().await.unwrap().is_none());
    }
}
