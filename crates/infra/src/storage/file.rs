//! Credential store backed by a JSON file
//!
//! The file holds one object with the `access_token` and `refresh_token`
//! keys. Writes go to a temporary file in the same directory which is then
//! renamed over the target, so readers never see a half-written document.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use importdesk_core::TokenStore;
use importdesk_domain::{ImportDeskError, Result, TokenPair};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tokio::sync::Mutex;
use tracing::debug;

use crate::errors::InfraError;

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredTokens {
    #[serde(rename = "access_token", default, skip_serializing_if = "Option::is_none")]
    access: Option<String>,
    #[serde(rename = "refresh_token", default, skip_serializing_if = "Option::is_none")]
    refresh: Option<String>,
}

/// Persists credentials in a JSON file
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<StoredTokens> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes).map_err(InfraError::from)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(StoredTokens::default()),
            Err(err) => Err(InfraError::from(err).into()),
        }
    }

    async fn write(&self, tokens: StoredTokens) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(&tokens).map_err(InfraError::from)?;
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || write_atomic(&path, &bytes))
            .await
            .map_err(|e| ImportDeskError::Internal(format!("token write task failed: {e}")))?
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(InfraError::from)?;

    let mut temp = NamedTempFile::new_in(dir).map_err(InfraError::from)?;
    temp.write_all(bytes).map_err(InfraError::from)?;
    temp.as_file().sync_all().map_err(InfraError::from)?;
    temp.persist(path).map_err(|e| InfraError::from(e.error))?;
    Ok(())
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn access_token(&self) -> Result<Option<String>> {
        Ok(self.read().await?.access)
    }

    async fn refresh_token(&self) -> Result<Option<String>> {
        Ok(self.read().await?.refresh)
    }

    async fn store(&self, tokens: &TokenPair) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.write(StoredTokens {
            access: Some(tokens.access_token.clone()),
            refresh: Some(tokens.refresh_token.clone()),
        })
        .await?;
        debug!(path = %self.path.display(), "Stored session credentials");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(InfraError::from(err).into()),
        }
        debug!(path = %self.path.display(), "Cleared session credentials");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use importdesk_domain::constants::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};

    use super::*;

    #[tokio::test]
    async fn missing_file_means_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("session.json"));

        assert!(store.access_token().await.unwrap().is_none());
        assert!(store.refresh_token().await.unwrap().is_none());
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn tokens_are_written_under_fixed_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");
        let store = FileTokenStore::new(&path);

        store.store(&TokenPair::new("a1", "r1")).await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw[ACCESS_TOKEN_KEY], "a1");
        assert_eq!(raw[REFRESH_TOKEN_KEY], "r1");

        let reopened = FileTokenStore::new(&path);
        assert_eq!(reopened.access_token().await.unwrap().as_deref(), Some("a1"));
    }

    #[tokio::test]
    async fn clear_removes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileTokenStore::new(&path);

        store.store(&TokenPair::new("a1", "r1")).await.unwrap();
        store.clear().await.unwrap();

        assert!(!path.exists());
        assert!(store.refresh_token().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn corrupt_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, b"{not json").unwrap();

        let err = FileTokenStore::new(&path).access_token().await.unwrap_err();
        assert!(matches!(err, ImportDeskError::Storage(msg) if msg.contains("malformed JSON")));
    }
}
