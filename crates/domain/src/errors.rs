//! Error types used throughout the client

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for ImportDesk
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum ImportDeskError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for ImportDesk operations
pub type Result<T> = std::result::Result<T, ImportDeskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let err = ImportDeskError::Storage("disk full".to_string());
        let json = serde_json::to_value(&err).unwrap();

        assert_eq!(json["type"], "Storage");
        assert_eq!(json["message"], "disk full");
    }

    #[test]
    fn display_includes_category() {
        let err = ImportDeskError::Config("missing base url".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing base url");
    }
}
