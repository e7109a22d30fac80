//! # ImportDesk Core
//!
//! Session logic of the back-office client - no transport or storage code.
//!
//! This crate contains:
//! - Port interfaces for credential storage and session-expiry notification
//! - The authentication-failure policy deciding how a 401 is handled
//! - The refresh coordinator guaranteeing a single in-flight token refresh
//!
//! ## Architecture Principles
//! - Only depends on `importdesk-domain`
//! - No HTTP, filesystem, or keychain code
//! - All external dependencies via traits
//! - Pure, testable logic

pub mod auth;

// Infrastructure ports
pub mod session_ports;

pub use auth::{
    AuthFailureAction, AuthFailurePolicy, RefreshCoordinator, RefreshLease, RefreshTicket,
    RefreshWaiter,
};
pub use session_ports::{NoopSessionListener, SessionListener, TokenStore};
