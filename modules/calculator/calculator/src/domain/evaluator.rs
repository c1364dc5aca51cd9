//! Stateless arithmetic used by the calculator.

use calculator_sdk::{Operand, Operation};
use thiserror::Error;
use tracing::trace;

/// Failure of a single arithmetic evaluation.
///
/// The `Display` text is what ends up in `CalculatorState::error`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("Unsupported operation: {0}")]
    InvalidOperation(String),

    #[error("Division by zero is not allowed.")]
    DivisionByZero,

    #[error("Invalid number: {0}")]
    InvalidNumber(String),
}

/// Apply `operation` to `a` and `b` with plain `f64` semantics.
///
/// # Errors
/// Returns `EvalError::DivisionByZero` when dividing by zero.
pub fn evaluate(a: f64, b: f64, operation: Operation) -> Result<f64, EvalError> {
    trace!(a, b, %operation, "evaluating");
    match operation {
        Operation::Add => Ok(a + b),
        Operation::Subtract => Ok(a - b),
        Operation::Multiply => Ok(a * b),
        Operation::Divide => {
            if b == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            Ok(a / b)
        }
    }
}

/// Same as [`evaluate`] but with the operation given as its textual tag.
///
/// # Errors
/// Returns `EvalError::InvalidOperation` for an unknown tag, otherwise
/// whatever [`evaluate`] returns.
pub fn evaluate_tag(a: f64, b: f64, tag: &str) -> Result<f64, EvalError> {
    let operation = tag
        .parse::<Operation>()
        .map_err(|e| EvalError::InvalidOperation(e.tag))?;
    evaluate(a, b, operation)
}

/// Numeric value of an operand; entered text is parsed here, not on entry.
///
/// # Errors
/// Returns `EvalError::InvalidNumber` when the entered text is not a number.
pub fn operand_value(operand: &Operand) -> Result<f64, EvalError> {
    match operand {
        Operand::Computed(value) => Ok(*value),
        Operand::Entered(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| EvalError::InvalidNumber(text.clone())),
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp, clippy::unwrap_used)]
mod tests {
    use super::*;

    const SAMPLES: [(f64, f64); 6] = [
        (5.0, 3.0),
        (-5.0, 3.0),
        (0.0, 7.5),
        (1.5, -0.25),
        (1e300, 1e300),
        (-0.0, 2.0),
    ];

    #[test]
    fn add_subtract_multiply_match_native_arithmetic() {
        for (a, b) in SAMPLES {
            assert_eq!(evaluate(a, b, Operation::Add).unwrap(), a + b);
            assert_eq!(evaluate(a, b, Operation::Subtract).unwrap(), a - b);
            assert_eq!(evaluate(a, b, Operation::Multiply).unwrap(), a * b);
        }
    }

    #[test]
    fn divide_by_non_zero_matches_native_arithmetic() {
        for (a, b) in SAMPLES {
            assert_eq!(evaluate(a, b, Operation::Divide).unwrap(), a / b);
        }
    }

    #[test]
    fn divide_by_zero_fails() {
        for a in [0.0, 1.0, -42.0, f64::MAX] {
            assert_eq!(
                evaluate(a, 0.0, Operation::Divide),
                Err(EvalError::DivisionByZero)
            );
        }
        assert_eq!(
            evaluate(1.0, -0.0, Operation::Divide),
            Err(EvalError::DivisionByZero)
        );
    }

    #[test]
    fn division_by_zero_message() {
        assert_eq!(
            EvalError::DivisionByZero.to_string(),
            "Division by zero is not allowed."
        );
    }

    #[test]
    fn unknown_tag_fails_with_invalid_operation() {
        let err = evaluate_tag(1.0, 2.0, "invalid").unwrap_err();
        assert_eq!(err, EvalError::InvalidOperation("invalid".to_owned()));
        assert_eq!(err.to_string(), "Unsupported operation: invalid");
    }

    #[test]
    fn known_tags_evaluate() {
        assert_eq!(evaluate_tag(6.0, 3.0, "add").unwrap(), 9.0);
        assert_eq!(evaluate_tag(6.0, 3.0, "subtract").unwrap(), 3.0);
        assert_eq!(evaluate_tag(6.0, 3.0, "multiply").unwrap(), 18.0);
        assert_eq!(evaluate_tag(6.0, 3.0, "divide").unwrap(), 2.0);
    }

    #[test]
    fn entered_operands_parse_late() {
        assert_eq!(operand_value(&Operand::entered("007")).unwrap(), 7.0);
        assert_eq!(operand_value(&Operand::entered("1.25")).unwrap(), 1.25);
        assert_eq!(operand_value(&Operand::Computed(-3.5)).unwrap(), -3.5);
    }

    #[test]
    fn malformed_operand_is_invalid_number() {
        assert_eq!(
            operand_value(&Operand::entered("1.2.3")),
            Err(EvalError::InvalidNumber("1.2.3".to_owned()))
        );
        assert!(operand_value(&Operand::entered("")).is_err());
    }
}
