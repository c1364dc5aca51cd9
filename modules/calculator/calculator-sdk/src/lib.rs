//! Calculator SDK
//!
//! This crate provides the public API for the calculator module:
//! - `CalculatorClientV1` trait for inter-module communication
//! - Model types (`CalculatorState`, `CalculatorEvent`, `Operation`, `Operand`, `SessionId`)
//! - Error types (`CalculatorError`, `ParseOperationError`)
//!
//! ## Usage
//!
//! ```ignore
//! use calculator_sdk::{CalculatorClientV1, CalculatorEvent, Operation};
//!
//! let session = client.create_session().await?;
//! client.handle_event(session.id, CalculatorEvent::digit("5")).await?;
//! client.handle_event(session.id, CalculatorEvent::SetOperation(Operation::Add)).await?;
//! client.handle_event(session.id, CalculatorEvent::digit("3")).await?;
//! let session = client.handle_event(session.id, CalculatorEvent::Equals).await?;
//! assert_eq!(session.state.result, Some(8.0));
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod api;
pub mod errors;
pub mod models;

pub use api::CalculatorClientV1;
pub use errors::{CalculatorError, ParseOperationError};
pub use models::{
    CalculatorEvent, CalculatorSession, CalculatorState, Operand, Operation, Phase, SessionId,
};
