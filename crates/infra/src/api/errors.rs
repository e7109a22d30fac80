//! API-specific error types
//!
//! Responses that are not 2xx keep their status, request path and body so
//! callers see exactly what the backend returned.

use std::time::Duration;

use importdesk_domain::ImportDeskError;
use thiserror::Error;

const UNAUTHORIZED: u16 = 401;

/// Categories of API errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// Authentication errors (401, 403, failed refresh)
    Authentication,
    /// Rate limiting errors (429)
    RateLimit,
    /// Server errors (5xx)
    Server,
    /// Client errors (4xx except auth)
    Client,
    /// Network/connection errors and timeouts
    Network,
    /// Unreadable response bodies
    Decode,
    /// Credential storage failures
    Storage,
    /// Configuration errors
    Config,
}

/// API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP {status} from {path}: {body}")]
    Status { status: u16, path: String, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Credential storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Token refresh failed: {0}")]
    RefreshFailed(Box<ApiError>),
}

impl ApiError {
    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Status { status, .. } => match *status {
                401 | 403 => ApiErrorCategory::Authentication,
                429 => ApiErrorCategory::RateLimit,
                500..=599 => ApiErrorCategory::Server,
                _ => ApiErrorCategory::Client,
            },
            Self::Network(_) | Self::Timeout(_) => ApiErrorCategory::Network,
            Self::Decode(_) => ApiErrorCategory::Decode,
            Self::Storage(_) => ApiErrorCategory::Storage,
            Self::Config(_) => ApiErrorCategory::Config,
            Self::RefreshFailed(_) => ApiErrorCategory::Authentication,
        }
    }

    /// HTTP status of a backend response, if this error carries one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The backend answered 401
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(UNAUTHORIZED)
    }
}

impl From<ImportDeskError> for ApiError {
    fn from(err: ImportDeskError) -> Self {
        match err {
            ImportDeskError::Network(msg) => Self::Network(msg),
            ImportDeskError::Config(msg) | ImportDeskError::InvalidInput(msg) => Self::Config(msg),
            ImportDeskError::Storage(msg) | ImportDeskError::NotFound(msg) => Self::Storage(msg),
            ImportDeskError::Auth(msg) | ImportDeskError::Internal(msg) => Self::Network(msg),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> ApiError {
        ApiError::Status { status: code, path: "/listings".to_string(), body: String::new() }
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(status(401).category(), ApiErrorCategory::Authentication);
        assert_eq!(status(403).category(), ApiErrorCategory::Authentication);
        assert_eq!(status(429).category(), ApiErrorCategory::RateLimit);
        assert_eq!(status(503).category(), ApiErrorCategory::Server);
        assert_eq!(status(404).category(), ApiErrorCategory::Client);
        assert_eq!(
            ApiError::Timeout(Duration::from_secs(1)).category(),
            ApiErrorCategory::Network
        );
        assert_eq!(
            ApiError::RefreshFailed(Box::new(status(500))).category(),
            ApiErrorCategory::Authentication
        );
    }

    #[test]
    fn unauthorized_is_only_401() {
        assert!(status(401).is_unauthorized());
        assert!(!status(403).is_unauthorized());
        assert!(!ApiError::Network("down".to_string()).is_unauthorized());
        assert!(!ApiError::RefreshFailed(Box::new(status(401))).is_unauthorized());
    }

    #[test]
    fn domain_errors_keep_their_kind() {
        let err: ApiError = ImportDeskError::Storage("disk full".to_string()).into();
        assert!(matches!(err, ApiError::Storage(msg) if msg == "disk full"));

        let err: ApiError = ImportDeskError::Network("HTTP connection failure".to_string()).into();
        assert_eq!(err.category(), ApiErrorCategory::Network);
    }

    #[test]
    fn status_display_includes_path_and_body() {
        let err = ApiError::Status {
            status: 404,
            path: "/listings/42".to_string(),
            body: "not found".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 404 from /listings/42: not found");
    }
}
