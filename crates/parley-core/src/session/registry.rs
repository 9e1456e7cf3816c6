//! Per-user session registry.
//!
//! An explicit, injectable object owned by the request-handling layer --
//! constructed once per process, no module-level singleton. `resolve`
//! and `clear` are its only mutators.
//!
//! Entries have no capacity bound and no TTL: a session lives until an
//! explicit clear or process death. Restart loses all in-memory
//! continuity even though the turn log in the database survives.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::info;

use parley_types::session::{SessionSettings, SessionState};

/// Handle to one user's conversational state.
///
/// The mutex serializes concurrent sends from the same user, keeping the
/// accumulated history ordered.
pub type SharedSession = Arc<Mutex<SessionState>>;

/// Result of clearing a session. Both variants are success outcomes;
/// clearing an absent session is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    Cleared,
    NotFound,
}

/// In-memory mapping from user id to active session handle.
pub struct SessionRegistry {
    sessions: DashMap<i64, SharedSession>,
    settings: SessionSettings,
}

impl SessionRegistry {
    /// Create an empty registry; every session it creates uses `settings`.
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            sessions: DashMap::new(),
            settings,
        }
    }

    /// Return the session handle for `user_id`, creating one on first use.
    ///
    /// The DashMap entry API makes get-or-create atomic, so two
    /// concurrent first messages from the same user resolve to the same
    /// handle rather than racing to overwrite each other.
    pub fn resolve(&self, user_id: i64) -> SharedSession {
        self.sessions
            .entry(user_id)
            .or_insert_with(|| {
                info!(user_id, "creating new chat session");
                Arc::new(Mutex::new(SessionState::new(self.settings.clone())))
            })
            .clone()
    }

    /// Drop the session for `user_id` if present. Idempotent.
    pub fn clear(&self, user_id: i64) -> ClearOutcome {
        if self.sessions.remove(&user_id).is_some() {
            info!(user_id, "cleared chat session");
            ClearOutcome::Cleared
        } else {
            ClearOutcome::NotFound
        }
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
