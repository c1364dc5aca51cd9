//! Calculator input state machine.
//!
//! Every event is a single, complete transition over `CalculatorState`.
//! Arithmetic is delegated to [`super::evaluator`]; its failures are stored
//! in `state.error` and never escape the machine.

use calculator_sdk::{CalculatorEvent, CalculatorState, Operand, Operation};

use super::evaluator::{self, EvalError};

/// Apply `event` to `state` and return the next state.
#[must_use]
pub fn handle_event(mut state: CalculatorState, event: CalculatorEvent) -> CalculatorState {
    match event {
        CalculatorEvent::Digit(digit) => enter_digit(&mut state, digit),
        CalculatorEvent::ClearEntry => clear_entry(&mut state),
        CalculatorEvent::ClearAll => state = CalculatorState::default(),
        CalculatorEvent::SetOperation(operation) => set_operation(&mut state, operation),
        CalculatorEvent::Equals => resolve(&mut state),
    }
    state
}

fn enter_digit(state: &mut CalculatorState, digit: String) {
    if state.is_settled() {
        *state = CalculatorState::default();
    }

    if state.awaiting_second_operand {
        // first keystroke of the right-hand operand replaces the display
        state.display_buffer.clone_from(&digit);
        state.second_operand = Some(Operand::Entered(digit));
        state.awaiting_second_operand = false;
        return;
    }

    state.display_buffer.push_str(&digit);
    let typed = Some(Operand::Entered(state.display_buffer.clone()));
    if state.second_operand.is_some() {
        state.second_operand = typed;
    } else {
        state.first_operand = typed;
    }
}

fn clear_entry(state: &mut CalculatorState) {
    if state.is_editing_second() {
        // input keeps going to the right-hand operand
        state.second_operand = None;
        state.awaiting_second_operand = true;
    } else {
        state.first_operand = None;
    }
    state.display_buffer.clear();
}

fn set_operation(state: &mut CalculatorState, operation: Operation) {
    if state.first_operand.is_none() {
        return;
    }
    if state.second_operand.is_some() {
        resolve(state);
    }
    state.operation = operation;
    state.awaiting_second_operand = true;
}

/// Shared by `Equals` and the implicit resolution of a chained operator.
fn resolve(state: &mut CalculatorState) {
    state.error = None;

    if state.second_operand.is_none() {
        state.second_operand.clone_from(&state.first_operand);
    }

    let (Some(first), Some(second)) = (&state.first_operand, &state.second_operand) else {
        return;
    };

    match compute(first, second, state.operation) {
        Ok(value) => {
            state.result = Some(value);
            state.display_buffer = Operand::Computed(value).to_string();
            state.first_operand = Some(Operand::Computed(value));
            state.second_operand = None;
        }
        // a stale `result` from an earlier calculation is left in place
        Err(e) => state.error = Some(e.to_string()),
    }
}

fn compute(first: &Operand, second: &Operand, operation: Operation) -> Result<f64, EvalError> {
    let a = evaluator::operand_value(first)?;
    let b = evaluator::operand_value(second)?;
    evaluator::evaluate(a, b, operation)
}
