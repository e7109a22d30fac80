//! Single-flight token refresh
//!
//! Manages one refresh episode at a time:
//! - The first caller that needs a new access token becomes the leader and
//!   receives a [`RefreshLease`]
//! - Every caller arriving while the lease is held is queued and receives a
//!   [`RefreshWaiter`]
//! - Settling the lease clears the in-progress flag and resolves the queued
//!   waiters in arrival order with the new token or with nothing
//!
//! ```text
//!  caller A ──► begin() ──► Leader(lease) ──► POST /auth/refresh ──► lease.succeed(token)
//!  caller B ──► begin() ──► Follower(waiter) ─────────────────────────────► Some(token)
//!  caller C ──► begin() ──► Follower(waiter) ─────────────────────────────► Some(token)
//! ```
//!
//! The flag and the queue live behind one mutex that is never held across an
//! `.await`. Clearing the flag and draining the queue happen in the same
//! critical section, so a caller is either queued before the drain or starts
//! the next episode; it can never be left waiting on a settled episode.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::{debug, warn};

type Waiter = oneshot::Sender<Option<String>>;

#[derive(Default)]
struct RefreshState {
    in_progress: bool,
    waiters: VecDeque<Waiter>,
}

/// Coordinates refresh episodes for one API client.
///
/// Cheap to clone; clones share the same state.
#[derive(Clone, Default)]
pub struct RefreshCoordinator {
    state: Arc<Mutex<RefreshState>>,
}

/// Outcome of [`RefreshCoordinator::begin`]
#[derive(Debug)]
pub enum RefreshTicket {
    /// No refresh was running; the holder must perform it and settle the lease
    Leader(RefreshLease),
    /// A refresh is running; wait for its outcome
    Follower(RefreshWaiter),
}

impl RefreshCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Join the current refresh episode or start a new one.
    #[must_use]
    pub fn begin(&self) -> RefreshTicket {
        let mut state = self.state.lock();

        if state.in_progress {
            let (tx, rx) = oneshot::channel();
            state.waiters.push_back(tx);
            debug!(position = state.waiters.len(), "Refresh in progress, queueing request");
            return RefreshTicket::Follower(RefreshWaiter { rx });
        }

        state.in_progress = true;
        debug!("Starting refresh episode");
        RefreshTicket::Leader(RefreshLease { state: Arc::clone(&self.state), settled: false })
    }

    /// Whether a refresh episode is running
    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        self.state.lock().in_progress
    }

    /// Number of callers queued behind the running refresh
    #[must_use]
    pub fn pending(&self) -> usize {
        self.state.lock().waiters.len()
    }
}

impl fmt::Debug for RefreshCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("RefreshCoordinator")
            .field("in_progress", &state.in_progress)
            .field("pending", &state.waiters.len())
            .finish()
    }
}

/// Exclusive right to perform the running refresh.
///
/// Dropping an unsettled lease (for example because the leader's future was
/// cancelled) fails the episode so queued callers are released.
pub struct RefreshLease {
    state: Arc<Mutex<RefreshState>>,
    settled: bool,
}

impl RefreshLease {
    /// End the episode with a new access token.
    ///
    /// Returns the number of queued callers that were resolved.
    pub fn succeed(mut self, access_token: &str) -> usize {
        self.settle(Some(access_token))
    }

    /// End the episode without a token; queued callers fail.
    ///
    /// Returns the number of queued callers that were resolved.
    pub fn fail(mut self) -> usize {
        self.settle(None)
    }

    fn settle(&mut self, access_token: Option<&str>) -> usize {
        self.settled = true;

        let waiters = {
            let mut state = self.state.lock();
            state.in_progress = false;
            std::mem::take(&mut state.waiters)
        };

        let resolved = waiters.len();
        for waiter in waiters {
            // A receiver that went away was cancelled by its caller.
            let _ = waiter.send(access_token.map(str::to_owned));
        }

        debug!(resolved, success = access_token.is_some(), "Refresh episode settled");
        resolved
    }
}

impl Drop for RefreshLease {
    fn drop(&mut self) {
        if !self.settled {
            warn!("Refresh lease dropped before settling, failing queued requests");
            self.settle(None);
        }
    }
}

impl fmt::Debug for RefreshLease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshLease").field("settled", &self.settled).finish()
    }
}

/// A caller queued behind the running refresh
#[derive(Debug)]
pub struct RefreshWaiter {
    rx: oneshot::Receiver<Option<String>>,
}

impl RefreshWaiter {
    /// Wait for the episode to settle.
    ///
    /// Returns the new access token, or `None` when the refresh failed.
    pub async fn wait(self) -> Option<String> {
        self.rx.await.ok().flatten()
    }
}
