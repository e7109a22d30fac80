//! Client constants
//!
//! Endpoint paths, storage keys and defaults shared by every crate.

// Authentication endpoints
pub const LOGIN_ENDPOINT: &str = "/auth/login";
pub const REFRESH_ENDPOINT: &str = "/auth/refresh";

// Where the hosting application sends the operator after the session is lost
pub const DEFAULT_LOGIN_PATH: &str = "/login";

// Persisted credential keys
pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

// Transport defaults
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = "importdesk-client/0.1";

// Storage defaults
pub const DEFAULT_TOKEN_FILE: &str = "importdesk-session.json";
pub const DEFAULT_KEYCHAIN_SERVICE: &str = "ImportDesk.session";

// Pagination defaults
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;
