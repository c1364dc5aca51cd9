//! Domain layer for the calculator module.

pub mod error;
pub mod evaluator;
pub mod repo;
pub mod service;
pub mod state_machine;


pub use error::DomainError;
pub use evaluator::{EvalError, evaluate, evaluate_tag};
pub use service::{Service, ServiceConfig};
pub use state_machine::handle_event;
