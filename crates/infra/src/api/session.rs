//! Session expiry fan-out

use importdesk_core::SessionListener;
use tokio::sync::broadcast;
use tracing::debug;

/// Emitted when stored credentials were dropped and the user must log in again
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionExpired {
    pub login_path: String,
}

/// [`SessionListener`] that broadcasts [`SessionExpired`] to every subscriber.
///
/// The hosting application subscribes and navigates to `login_path` however
/// its UI does that.
#[derive(Debug, Clone)]
pub struct BroadcastSessionListener {
    tx: broadcast::Sender<SessionExpired>,
}

impl BroadcastSessionListener {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionExpired> {
        self.tx.subscribe()
    }
}

impl Default for BroadcastSessionListener {
    fn default() -> Self {
        Self::new(16)
    }
}

impl SessionListener for BroadcastSessionListener {
    fn session_expired(&self, login_path: &str) {
        let event = SessionExpired { login_path: login_path.to_string() };
        if self.tx.send(event).is_err() {
            debug!("Session expired with no subscribers");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_login_path() {
        let listener = BroadcastSessionListener::default();
        let mut first = listener.subscribe();
        let mut second = listener.subscribe();

        listener.session_expired("/login");

        assert_eq!(first.recv().await.unwrap().login_path, "/login");
        assert_eq!(second.recv().await.unwrap().login_path, "/login");
    }

    #[test]
    fn expiry_without_subscribers_is_ignored() {
        BroadcastSessionListener::new(0).session_expired("/login");
    }
}
