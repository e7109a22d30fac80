//! # ImportDesk Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - HTTP transport and the authenticated API client
//! - Typed services for the back-office resources
//! - Token stores (memory, JSON file, platform keychain)
//! - Configuration loading and tracing setup
//!
//! ## Architecture
//! - Implements traits defined in `importdesk-core`
//! - Depends on `importdesk-domain` and `importdesk-core`
//! - Contains all "impure" code (network, filesystem, keychain)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod observability;
pub mod storage;

// Re-export commonly used items
pub use api::{ApiClient, ApiError, AuthService, BroadcastSessionListener};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use storage::{FileTokenStore, KeychainTokenStore, MemoryTokenStore};
