//! Session credential stores
//!
//! Implementations of [`TokenStore`] for the backends selectable through
//! [`StorageConfig`].

pub mod file;
pub mod keychain;
pub mod memory;

use std::sync::Arc;

use importdesk_core::TokenStore;
use importdesk_domain::{Result, StorageConfig};

pub use file::FileTokenStore;
pub use keychain::KeychainTokenStore;
pub use memory::MemoryTokenStore;

/// Open the store selected by `config`.
///
/// # Errors
/// Returns a storage error if the keychain entries cannot be created.
pub fn open(config: &StorageConfig) -> Result<Arc<dyn TokenStore>> {
    let store: Arc<dyn TokenStore> = match config {
        StorageConfig::Memory => Arc::new(MemoryTokenStore::new()),
        StorageConfig::File { path } => Arc::new(FileTokenStore::new(path.clone())),
        StorageConfig::Keychain { service } => Arc::new(KeychainTokenStore::new(service)?),
    };
    Ok(store)
}
