use std::sync::Arc;
use std::time::{Duration, Instant};

use calculator_sdk::{CalculatorState, SessionId};
use parking_lot::Mutex;

use super::error::DomainError;

/// Stored state of one session plus its last activity time.
#[derive(Debug, Clone)]
pub struct SessionEntry {
    pub state: CalculatorState,
    pub touched_at: Instant,
}

impl SessionEntry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: CalculatorState::default(),
            touched_at: Instant::now(),
        }
    }

    pub fn touch(&mut self) {
        self.touched_at = Instant::now();
    }
}

impl Default for SessionEntry {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared handle to a session. Holding its lock is what serializes events
/// for that session; distinct sessions never share a lock.
pub type SessionHandle = Arc<Mutex<SessionEntry>>;

/// Storage port for calculator sessions.
pub trait SessionRepository: Send + Sync {
    /// Allocate a new session in the default state.
    ///
    /// # Errors
    /// Returns `DomainError::CapacityExceeded` when the store is full.
    fn create(&self) -> Result<(SessionId, SessionHandle), DomainError>;

    fn get(&self, id: SessionId) -> Option<SessionHandle>;

    /// Return the session with `id`, creating it in the default state if absent.
    ///
    /// # Errors
    /// Returns `DomainError::CapacityExceeded` when a new session is needed but the store is full.
    fn get_or_create(&self, id: SessionId) -> Result<SessionHandle, DomainError>;

    fn remove(&self, id: SessionId) -> bool;

    /// Drop sessions not touched for at least `idle_for`; returns how many were dropped.
    fn evict_idle(&self, idle_for: Duration) -> usize;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
