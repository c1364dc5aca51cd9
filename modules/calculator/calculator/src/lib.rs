//! Calculator Module Implementation
//!
//! A four-function calculator whose state lives on the server, one instance
//! per session. The public API is defined in `calculator-sdk` and re-exported here.
//!
//! ## Architecture
//!
//! - `domain/evaluator.rs` - pure arithmetic
//! - `domain/state_machine.rs` - event handling over `CalculatorState`
//! - `domain/service.rs` - session lookup, per-session serialization, validation
//! - `infra/storage` - in-memory session store
//! - `api/rest` - JSON event API
//! - `api/web` - HTML form binding (request/redirect)
//! - `module.rs` - wiring and background tasks

pub use calculator_sdk::{
    CalculatorClientV1, CalculatorError, CalculatorEvent, CalculatorSession, CalculatorState,
    Operand, Operation, SessionId,
};

pub mod module;
pub use module::CalculatorModule;

pub mod config;
pub use config::CalculatorConfig;

pub mod local_client;

#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
