//! Observable session state.
//!
//! One holder owns the answer to "who is signed in"; interested parts of
//! the embedding application subscribe to it instead of sharing a mutable
//! global.

use std::sync::Arc;

use tokio::sync::watch;

/// Why the session is (or became) signed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignOutCause {
    /// No sign-in has happened yet.
    Initial,
    /// The user asked to sign out.
    UserRequested,
    /// A protected call came back rejected; the session was torn down and
    /// subscribers are expected to return the user to sign-in.
    AuthFailure,
}

/// Client-side view of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    SignedOut { cause: SignOutCause },
    Active { email: String },
}

impl SessionState {
    pub fn is_active(&self) -> bool {
        matches!(self, SessionState::Active { .. })
    }
}

/// Process-wide holder for the current session state.
///
/// Clones share the same underlying channel.
#[derive(Debug, Clone)]
pub struct SessionWatch {
    tx: Arc<watch::Sender<SessionState>>,
}

impl SessionWatch {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionState::SignedOut {
            cause: SignOutCause::Initial,
        });
        Self { tx: Arc::new(tx) }
    }

    /// Snapshot of the current state.
    pub fn current(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    /// Subscribe to state changes. Every publish wakes all subscribers.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }

    /// Store and announce a new state.
    ///
    /// `send_replace` keeps the value even when nothing is subscribed, so a
    /// late subscriber still observes the truth.
    pub(crate) fn publish(&self, state: SessionState) {
        self.tx.send_replace(state);
    }
}

impl Default for SessionWatch {
    fn default() -> Self {
        Self::new()
    }
}
