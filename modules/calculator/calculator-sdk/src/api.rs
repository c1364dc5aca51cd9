//! `CalculatorClientV1` trait definition.
//!
//! This trait defines the public API for the calculator module. Each method
//! addresses one calculator session; events for the same session are applied
//! one at a time by the implementation.

use async_trait::async_trait;

use crate::errors::CalculatorError;
use crate::models::{CalculatorEvent, CalculatorSession, SessionId};

/// Public API trait for the calculator module.
#[async_trait]
pub trait CalculatorClientV1: Send + Sync {
    /// Start a new session with the default state.
    async fn create_session(&self) -> Result<CalculatorSession, CalculatorError>;

    /// Read the current state of a session.
    async fn get_session(&self, id: SessionId) -> Result<CalculatorSession, CalculatorError>;

    /// Apply one event to a session and return the resulting state.
    async fn handle_event(
        &self,
        id: SessionId,
        event: CalculatorEvent,
    ) -> Result<CalculatorSession, CalculatorError>;

    /// Discard a session.
    async fn delete_session(&self, id: SessionId) -> Result<(), CalculatorError>;
}
