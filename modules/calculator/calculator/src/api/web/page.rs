//! Server-rendered calculator page.

use calculator_sdk::{CalculatorState, Operand, Operation};
use minijinja::{Environment, context};
use serde::Serialize;

/// The `.html` suffix turns on HTML auto-escaping for every interpolation.
const PAGE_NAME: &str = "calculator.html";
const PAGE_TEMPLATE: &str = include_str!("templates/calculator.html");

const KEYS: [&str; 11] = ["7", "8", "9", "4", "5", "6", "1", "2", "3", "0", "."];

#[derive(Debug, Serialize)]
struct OperationKey {
    tag: &'static str,
    symbol: &'static str,
}

/// Render the full page for `state`.
///
/// # Errors
/// Returns an error if the page template fails to compile or render.
pub fn render(state: &CalculatorState) -> Result<String, minijinja::Error> {
    let env = Environment::new();
    let template = env.template_from_named_str(PAGE_NAME, PAGE_TEMPLATE)?;

    let operations: Vec<OperationKey> = Operation::ALL
        .into_iter()
        .map(|op| OperationKey {
            tag: op.as_str(),
            symbol: op.symbol(),
        })
        .collect();

    template.render(context! {
        display => &state.display_buffer,
        result => state.result.map(|value| Operand::Computed(value).to_string()),
        error => &state.error,
        keys => KEYS,
        operations => operations,
    })
}
