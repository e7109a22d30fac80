//! Brokerage backend API
//!
//! [`ApiClient`] is the single entry point for HTTP calls: it attaches the
//! stored bearer token, renews the session on 401 and replays the affected
//! requests. The services below are typed wrappers over it.
//!
//! # Architecture
//!
//! - Transport through [`crate::http::HttpClient`] (no direct reqwest clients)
//! - One refresh in flight per client; concurrent 401s wait for it
//! - Login and refresh endpoints never trigger a refresh
//! - Session expiry is announced through a `SessionListener`

pub mod auth;
pub mod client;
pub mod conversations;
pub mod documents;
pub mod errors;
pub mod request;
pub mod resources;
pub mod session;
pub mod statistics;

pub use auth::AuthService;
pub use client::{ApiClient, ApiClientBuilder};
pub use conversations::ConversationService;
pub use documents::{DocumentService, DocumentUpload};
pub use errors::{ApiError, ApiErrorCategory};
pub use request::{ApiRequest, FilePart, MultipartPayload, RequestBody};
pub use resources::ResourceService;
pub use session::{BroadcastSessionListener, SessionExpired};
pub use statistics::StatisticsService;
