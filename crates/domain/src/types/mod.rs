//! Domain types and models
//!
//! Payloads exchanged with the brokerage backend. Every resource the
//! back-office manages implements [`Resource`] so the infrastructure layer can
//! offer one generic CRUD service for all of them.

pub mod auth;
pub mod conversation;
pub mod document;
pub mod listing;
pub mod query;
pub mod quote;
pub mod seller;
pub mod stats;
pub mod user;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub use auth::{AdminUser, LoginRequest, LoginResponse, RefreshRequest, TokenPair};
pub use conversation::{Conversation, Message, NewMessage};
pub use document::{Document, DocumentKind};
pub use listing::{Listing, ListingInput, ListingStatus};
pub use query::{ListQuery, Page, SortDirection};
pub use quote::{Quote, QuoteInput, QuoteStatus, QuoteStatusUpdate};
pub use seller::{Seller, SellerInput};
pub use stats::{MonthlyVolume, Statistics};
pub use user::{User, UserInput, UserRole};

/// A collection exposed by the backend under a fixed path.
///
/// The backend follows the conventional REST layout: `GET PATH` lists,
/// `POST PATH` creates, `GET/PUT/DELETE PATH/{id}` act on one record.
pub trait Resource: DeserializeOwned + Send + 'static {
    /// Collection path, e.g. `/listings`
    const PATH: &'static str;

    /// Body accepted by create and update calls
    type Input: Serialize + Send + Sync;

    /// Path of a single record
    fn item_path(id: &str) -> String {
        format!("{}/{}", Self::PATH, id)
    }
}
