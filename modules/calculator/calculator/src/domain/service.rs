use std::sync::Arc;
use std::time::Duration;

use calculator_sdk::{CalculatorEvent, CalculatorState, SessionId};
use tracing::{debug, info, warn};

use super::error::DomainError;
use super::evaluator::EvalError;
use super::repo::{SessionHandle, SessionRepository};
use super::state_machine;

pub struct ServiceConfig {
    pub max_display_length: usize,
    pub session_idle_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_display_length: 32,
            session_idle_timeout: Duration::from_secs(30 * 60),
        }
    }
}

/// Session-aware front of the calculator state machine.
///
/// Looks sessions up in the repository and applies events while holding the
/// session's own lock, so concurrent requests for one session are serialized.
pub struct Service {
    repo: Arc<dyn SessionRepository>,
    config: ServiceConfig,
}

impl Service {
    #[must_use]
    pub fn new(repo: Arc<dyn SessionRepository>, config: ServiceConfig) -> Self {
        Self { repo, config }
    }

    /// # Errors
    /// Returns `DomainError::CapacityExceeded` when no more sessions can be held.
    pub fn create_session(&self) -> Result<(SessionId, CalculatorState), DomainError> {
        let (id, handle) = self.repo.create().inspect_err(|e| {
            warn!(error = %e, "refusing to create calculator session");
        })?;
        info!(session = %id, "calculator session created");
        let state = handle.lock().state.clone();
        Ok((id, state))
    }

    /// # Errors
    /// Returns `DomainError::NotFound` for an unknown session.
    pub fn get_state(&self, id: SessionId) -> Result<CalculatorState, DomainError> {
        let handle = self.lookup(id)?;
        let state = handle.lock().state.clone();
        Ok(state)
    }

    /// Read a session's state, creating the session on first interaction.
    ///
    /// # Errors
    /// Returns `DomainError::CapacityExceeded` when a new session cannot be held.
    pub fn get_state_or_create(&self, id: SessionId) -> Result<CalculatorState, DomainError> {
        let handle = self.repo.get_or_create(id)?;
        let state = handle.lock().state.clone();
        Ok(state)
    }

    /// # Errors
    /// Returns `DomainError::NotFound` for an unknown session and
    /// `DomainError::Validation` for a rejected digit keystroke.
    pub fn handle_event(
        &self,
        id: SessionId,
        event: CalculatorEvent,
    ) -> Result<CalculatorState, DomainError> {
        let handle = self.lookup(id)?;
        self.apply(id, &handle, event)
    }

    /// Like [`Self::handle_event`], creating the session if it does not exist yet.
    ///
    /// # Errors
    /// Returns `DomainError::CapacityExceeded` or `DomainError::Validation`.
    pub fn handle_event_or_create(
        &self,
        id: SessionId,
        event: CalculatorEvent,
    ) -> Result<CalculatorState, DomainError> {
        let handle = self.repo.get_or_create(id)?;
        self.apply(id, &handle, event)
    }

    /// Record an unrecognized operation tag as the session's error, leaving
    /// everything else untouched.
    ///
    /// # Errors
    /// Returns `DomainError::CapacityExceeded` when a new session cannot be held.
    pub fn reject_operation(
        &self,
        id: SessionId,
        tag: &str,
    ) -> Result<CalculatorState, DomainError> {
        let error = EvalError::InvalidOperation(tag.to_owned()).to_string();
        debug!(session = %id, %error, "operation rejected");
        self.record_error(id, error)
    }

    /// Show `message` as the session's error without touching operands,
    /// display or result.
    ///
    /// # Errors
    /// Returns `DomainError::CapacityExceeded` when a new session cannot be held.
    pub fn record_error(
        &self,
        id: SessionId,
        message: impl Into<String>,
    ) -> Result<CalculatorState, DomainError> {
        let handle = self.repo.get_or_create(id)?;
        let mut entry = handle.lock();
        entry.state.error = Some(message.into());
        entry.touch();
        Ok(entry.state.clone())
    }

    /// # Errors
    /// Returns `DomainError::NotFound` for an unknown session.
    pub fn delete_session(&self, id: SessionId) -> Result<(), DomainError> {
        if !self.repo.remove(id) {
            return Err(DomainError::NotFound { id });
        }
        info!(session = %id, "calculator session deleted");
        Ok(())
    }

    /// Drop sessions idle for longer than the configured timeout.
    #[must_use]
    pub fn evict_idle_sessions(&self) -> usize {
        let evicted = self.repo.evict_idle(self.config.session_idle_timeout);
        if evicted > 0 {
            info!(evicted, remaining = self.repo.len(), "evicted idle calculator sessions");
        }
        evicted
    }

    #[must_use]
    pub fn session_count(&self) -> usize {
        self.repo.len()
    }

    fn lookup(&self, id: SessionId) -> Result<SessionHandle, DomainError> {
        self.repo.get(id).ok_or(DomainError::NotFound { id })
    }

    fn apply(
        &self,
        id: SessionId,
        handle: &SessionHandle,
        event: CalculatorEvent,
    ) -> Result<CalculatorState, DomainError> {
        let kind = event.kind();
        let is_digit = matches!(event, CalculatorEvent::Digit(_));
        if let CalculatorEvent::Digit(ref key) = event {
            Self::validate_key(key)?;
        }

        let mut entry = handle.lock();
        let next = state_machine::handle_event(entry.state.clone(), event);
        if is_digit {
            self.validate_display(&next.display_buffer)?;
        }

        if let Some(ref error) = next.error {
            debug!(session = %id, event = kind, %error, "calculation failed");
        }
        debug!(
            session = %id,
            event = kind,
            display = %next.display_buffer,
            "calculator event applied"
        );

        entry.state = next;
        entry.touch();
        Ok(entry.state.clone())
    }

    fn validate_key(key: &str) -> Result<(), DomainError> {
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_digit() || c == '.' => Ok(()),
            _ => {
                warn!(key, "rejected digit keystroke");
                Err(DomainError::validation(
                    "digit",
                    "must be a single character 0-9 or '.'",
                ))
            }
        }
    }

    fn validate_display(&self, display: &str) -> Result<(), DomainError> {
        if display.len() > self.config.max_display_length {
            return Err(DomainError::validation(
                "digit",
                format!(
                    "number exceeds maximum length of {}",
                    self.config.max_display_length
                ),
            ));
        }
        if display.matches('.').count() > 1 {
            return Err(DomainError::validation(
                "digit",
                "number already has a decimal point",
            ));
        }
        Ok(())
    }
}
