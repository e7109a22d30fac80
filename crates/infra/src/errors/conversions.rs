//! Conversions from external infrastructure errors into domain errors.

use std::io::Error as IoError;

use importdesk_domain::ImportDeskError;
use keyring::Error as KeyringError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub ImportDeskError);

impl From<InfraError> for ImportDeskError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ImportDeskError> for InfraError {
    fn from(value: ImportDeskError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoImportDeskError {
    fn into_importdesk(self) -> ImportDeskError;
}

/* -------------------------------------------------------------------------- */
/* keyring::Error → ImportDeskError */
/* -------------------------------------------------------------------------- */

impl IntoImportDeskError for KeyringError {
    fn into_importdesk(self) -> ImportDeskError {
        use KeyringError::*;

        let description = self.to_string();

        match self {
            NoEntry => ImportDeskError::NotFound("keychain entry not found".into()),
            BadEncoding(_) => {
                ImportDeskError::Storage("credential in keychain is not valid UTF-8".into())
            }
            PlatformFailure(err) => {
                ImportDeskError::Storage(format!("keychain platform error: {err}"))
            }
            NoStorageAccess(err) => {
                ImportDeskError::Storage(format!("unable to access secure storage: {err}"))
            }
            _ => ImportDeskError::Storage(description),
        }
    }
}

impl From<KeyringError> for InfraError {
    fn from(value: KeyringError) -> Self {
        InfraError(value.into_importdesk())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → ImportDeskError */
/* -------------------------------------------------------------------------- */

impl IntoImportDeskError for IoError {
    fn into_importdesk(self) -> ImportDeskError {
        match self.kind() {
            std::io::ErrorKind::NotFound => ImportDeskError::NotFound(self.to_string()),
            std::io::ErrorKind::PermissionDenied => {
                ImportDeskError::Storage(format!("permission denied: {self}"))
            }
            _ => ImportDeskError::Storage(self.to_string()),
        }
    }
}

impl From<IoError> for InfraError {
    fn from(value: IoError) -> Self {
        InfraError(value.into_importdesk())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → ImportDeskError */
/* -------------------------------------------------------------------------- */

impl IntoImportDeskError for JsonError {
    fn into_importdesk(self) -> ImportDeskError {
        ImportDeskError::Storage(format!("malformed JSON: {self}"))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_importdesk())
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → ImportDeskError */
/* -------------------------------------------------------------------------- */

impl IntoImportDeskError for HttpError {
    fn into_importdesk(self) -> ImportDeskError {
        if self.is_timeout() {
            return ImportDeskError::Network("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return ImportDeskError::Network("HTTP connection failure".into());
        }

        if self.is_builder() {
            return ImportDeskError::Config(format!("invalid HTTP request: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => ImportDeskError::Auth(message),
                404 => ImportDeskError::NotFound(message),
                400..=499 => ImportDeskError::InvalidInput(message),
                _ => ImportDeskError::Network(message),
            };
        }

        ImportDeskError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_importdesk())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use reqwest::{Client, StatusCode};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn keyring_no_entry_maps_to_not_found() {
        let err = KeyringError::NoEntry;
        let mapped: ImportDeskError = InfraError::from(err).into();
        match mapped {
            ImportDeskError::NotFound(msg) => assert!(msg.contains("keychain")),
            other => panic!("expected not found, got {:?}", other),
        }
    }

    #[test]
    fn io_permission_denied_maps_to_storage_error() {
        let err = IoError::new(std::io::ErrorKind::PermissionDenied, "session file");
        let mapped: ImportDeskError = InfraError::from(err).into();
        match mapped {
            ImportDeskError::Storage(msg) => assert!(msg.contains("permission denied")),
            other => panic!("expected storage error, got {:?}", other),
        }
    }

    #[test]
    fn malformed_json_maps_to_storage_error() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let mapped: ImportDeskError = InfraError::from(err).into();
        assert!(matches!(mapped, ImportDeskError::Storage(msg) if msg.contains("malformed JSON")));
    }

    #[tokio::test]
    async fn http_status_401_maps_to_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(StatusCode::UNAUTHORIZED))
            .mount(&server)
            .await;

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err();

        let mapped: ImportDeskError = InfraError::from(error).into();
        match mapped {
            ImportDeskError::Auth(msg) => assert!(msg.contains("401")),
            other => panic!("expected auth error, got {:?}", other),
        }
    }
}
