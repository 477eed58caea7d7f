//! Caller-scoped session storage.

use crate::games::guessing::SessionState;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument};

/// Unique identifier for a caller's session.
pub type SessionId = String;

/// Holds one [`SessionState`] per caller.
///
/// Only sessions with a game in progress are kept; an entry whose game ends
/// is dropped, so presence in the map means "game in progress".
#[derive(Debug, Clone)]
pub struct SessionManager {
    sessions: Arc<Mutex<HashMap<SessionId, SessionState>>>,
}

impl SessionManager {
    /// Creates an empty session manager.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating session manager");
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<SessionId, SessionState>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `op` against the caller's state while holding the lock.
    ///
    /// A caller without a session gets an empty [`SessionState`].
    #[instrument(skip(self, op))]
    pub fn with_session<T>(&self, id: &str, op: impl FnOnce(&mut SessionState) -> T) -> T {
        let mut sessions = self.sessions();
        let mut state = sessions.remove(id).unwrap_or_default();

        let result = op(&mut state);

        if state.in_progress() {
            sessions.insert(id.to_string(), state);
        } else {
            debug!(session_id = id, "No game in progress, dropping session");
        }
        result
    }

    /// Returns a copy of the caller's state.
    #[instrument(skip(self))]
    pub fn get_session(&self, id: &str) -> SessionState {
        let session = self.sessions().get(id).cloned();
        if session.is_none() {
            debug!(session_id = id, "Session not found");
        }
        session.unwrap_or_default()
    }

    /// Lists callers with a game in progress.
    #[instrument(skip(self))]
    pub fn list_sessions(&self) -> Vec<SessionId> {
        let ids: Vec<_> = self.sessions().keys().cloned().collect();
        debug!(count = ids.len(), "Listed sessions");
        ids
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
