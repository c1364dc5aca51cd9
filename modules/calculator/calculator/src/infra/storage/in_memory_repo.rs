//! In-memory session store.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use calculator_sdk::SessionId;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parking_lot::Mutex;

use crate::domain::error::DomainError;
use crate::domain::repo::{SessionEntry, SessionHandle, SessionRepository};

/// Sessions sharded across a concurrent map, each behind its own mutex.
///
/// The map lock is never held while a caller works on a session; callers
/// clone the handle out and lock it afterwards.
///
/// Capacity is tracked by `slots`, which is taken before a session is
/// inserted and given back when one is removed, so concurrent inserts can
/// never overshoot `max_sessions`.
pub struct InMemorySessionRepository {
    sessions: DashMap<SessionId, SessionHandle>,
    slots: AtomicUsize,
    max_sessions: usize,
}

impl InMemorySessionRepository {
    #[must_use]
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            slots: AtomicUsize::new(0),
            max_sessions,
        }
    }

    fn take_slot(&self) -> Result<(), DomainError> {
        self.slots
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |taken| {
                (taken < self.max_sessions).then_some(taken + 1)
            })
            .map(|_| ())
            .map_err(|_| DomainError::CapacityExceeded {
                limit: self.max_sessions,
            })
    }

    fn release_slots(&self, count: usize) {
        if count > 0 {
            self.slots.fetch_sub(count, Ordering::AcqRel);
        }
    }
}

impl SessionRepository for InMemorySessionRepository {
    fn create(&self) -> Result<(SessionId, SessionHandle), DomainError> {
        self.take_slot()?;
        let id = SessionId::new();
        let handle: SessionHandle = Arc::new(Mutex::new(SessionEntry::new()));
        self.sessions.insert(id, Arc::clone(&handle));
        Ok((id, handle))
    }

    fn get(&self, id: SessionId) -> Option<SessionHandle> {
        self.sessions.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    fn get_or_create(&self, id: SessionId) -> Result<SessionHandle, DomainError> {
        if let Some(handle) = self.get(id) {
            return Ok(handle);
        }
        match self.sessions.entry(id) {
            Entry::Occupied(entry) => Ok(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                // only the atomic counter is touched while the shard is locked
                self.take_slot()?;
                let handle = entry.insert(Arc::new(Mutex::new(SessionEntry::new())));
                Ok(Arc::clone(handle.value()))
            }
        }
    }

    fn remove(&self, id: SessionId) -> bool {
        let removed = self.sessions.remove(&id).is_some();
        if removed {
            self.release_slots(1);
        }
        removed
    }

    fn evict_idle(&self, idle_for: Duration) -> usize {
        let mut evicted = 0;
        // a session locked by a request in flight is not idle
        self.sessions.retain(|_, handle| {
            let keep = handle
                .try_lock()
                .is_none_or(|entry| entry.touched_at.elapsed() < idle_for);
            if !keep {
                evicted += 1;
            }
            keep
        });
        self.release_slots(evicted);
        evicted
    }

    fn len(&self) -> usize {
        self.sessions.len()
    }
}
