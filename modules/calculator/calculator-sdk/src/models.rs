//! Public models for the calculator module.
//!
//! These are transport-agnostic data structures that define the contract
//! between the calculator module and its consumers.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::errors::ParseOperationError;

/// Identifier of one calculator session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Generate a fresh random session id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for SessionId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Arithmetic operation selected on the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Operation {
    #[default]
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub const ALL: [Self; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// Lowercase tag used on forms and in JSON payloads.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
        }
    }

    /// Symbol shown on keypad buttons.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = ParseOperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| ParseOperationError { tag: s.to_owned() })
    }
}

/// One side of a pending calculation.
///
/// Typed digits stay textual until the calculation is resolved, so that
/// multi-digit and leading-zero entry behave exactly as typed.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Raw text accumulated from digit keystrokes.
    Entered(String),
    /// Value carried over from a previous resolution.
    Computed(f64),
}

impl Operand {
    #[must_use]
    pub fn entered(text: impl Into<String>) -> Self {
        Self::Entered(text.into())
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entered(text) => f.write_str(text),
            Self::Computed(value) => write!(f, "{value}"),
        }
    }
}

/// Coarse phase derived from the state fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Digits accumulate into the operand being edited.
    Entering,
    /// A result is on display; the next digit starts a new calculation.
    Settled,
}

/// Full calculator state held for one session.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CalculatorState {
    /// Raw text of the operand currently being edited (the number bar).
    pub display_buffer: String,
    pub first_operand: Option<Operand>,
    pub second_operand: Option<Operand>,
    pub operation: Operation,
    /// Last successfully computed value.
    pub result: Option<f64>,
    /// Message of the last failed resolution.
    pub error: Option<String>,
    /// Set right after an operator is chosen, before the right-hand operand is typed.
    pub awaiting_second_operand: bool,
}

impl CalculatorState {
    /// True while the right-hand operand is the one receiving input.
    #[must_use]
    pub fn is_editing_second(&self) -> bool {
        self.awaiting_second_operand || self.second_operand.is_some()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.result.is_some() && !self.is_editing_second() {
            Phase::Settled
        } else {
            Phase::Entering
        }
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.phase() == Phase::Settled
    }
}

/// Discrete user action understood by the calculator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalculatorEvent {
    /// A keystroke appended to the operand being edited.
    Digit(String),
    /// Clear the operand being edited.
    ClearEntry,
    /// Reset the whole calculator.
    ClearAll,
    /// Choose the operation, resolving a pending one first.
    SetOperation(Operation),
    /// Resolve the pending operation.
    Equals,
}

impl CalculatorEvent {
    #[must_use]
    pub fn digit(d: impl Into<String>) -> Self {
        Self::Digit(d.into())
    }

    /// Short name used in logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Digit(_) => "digit",
            Self::ClearEntry => "clear_entry",
            Self::ClearAll => "clear_all",
            Self::SetOperation(_) => "set_operation",
            Self::Equals => "equals",
        }
    }
}

/// A session id together with its current state.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorSession {
    pub id: SessionId,
    pub state: CalculatorState,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn operation_round_trips_through_tag() {
        for op in Operation::ALL {
            assert_eq!(op.as_str().parse::<Operation>(), Ok(op));
        }
    }

    #[test]
    fn unknown_operation_tag_is_rejected() {
        let err = "modulo".parse::<Operation>().unwrap_err();
        assert_eq!(err.tag, "modulo");
        assert_eq!(err.to_string(), "Unsupported operation: modulo");
    }

    #[test]
    fn computed_operand_renders_without_trailing_zero() {
        assert_eq!(Operand::Computed(8.0).to_string(), "8");
        assert_eq!(Operand::Computed(2.5).to_string(), "2.5");
        assert_eq!(Operand::entered("007").to_string(), "007");
    }

    #[test]
    fn default_state_is_entering_with_add() {
        let state = CalculatorState::default();
        assert_eq!(state.operation, Operation::Add);
        assert_eq!(state.phase(), Phase::Entering);
        assert!(state.display_buffer.is_empty());
    }

    #[test]
    fn state_with_result_is_settled_until_operator_chosen() {
        let mut state = CalculatorState {
            result: Some(8.0),
            ..CalculatorState::default()
        };
        assert!(state.is_settled());

        state.awaiting_second_operand = true;
        assert!(!state.is_settled());
    }

    #[test]
    fn session_id_parses_from_display() {
        let id = SessionId::new();
        assert_eq!(id.to_string().parse::<SessionId>().ok(), Some(id));
    }
}
