//! # ImportDesk Domain
//!
//! Business domain types for the ImportDesk back-office client.
//!
//! This crate contains:
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Endpoint, storage and pagination constants
//! - Payloads exchanged with the brokerage backend
//!
//! ## Architecture
//! - No dependencies on other ImportDesk crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
