//! Authentication-failure handling
//!
//! - **[`policy`]**: decides what a failed response means for the session
//! - **[`refresh`]**: single-flight token refresh with a FIFO waiter queue

pub mod policy;
pub mod refresh;

pub use policy::{AuthFailureAction, AuthFailurePolicy};
pub use refresh::{RefreshCoordinator, RefreshLease, RefreshTicket, RefreshWaiter};
