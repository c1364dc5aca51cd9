use calculator_sdk::{CalculatorEvent, CalculatorSession, CalculatorState, Operation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OperationDto {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl From<OperationDto> for Operation {
    fn from(op: OperationDto) -> Self {
        match op {
            OperationDto::Add => Self::Add,
            OperationDto::Subtract => Self::Subtract,
            OperationDto::Multiply => Self::Multiply,
            OperationDto::Divide => Self::Divide,
        }
    }
}

impl From<Operation> for OperationDto {
    fn from(op: Operation) -> Self {
        match op {
            Operation::Add => Self::Add,
            Operation::Subtract => Self::Subtract,
            Operation::Multiply => Self::Multiply,
            Operation::Divide => Self::Divide,
        }
    }
}

/// Renderable calculator state.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorStateDto {
    /// The number bar.
    pub display: String,
    pub first_operand: Option<String>,
    pub second_operand: Option<String>,
    pub operation: OperationDto,
    /// Last computed value. `"inf"`, `"-inf"` or `"NaN"` when not finite.
    #[serde(default, with = "super::number::option")]
    #[schema(value_type = Option<f64>)]
    pub result: Option<f64>,
    pub error: Option<String>,
    pub awaiting_second_operand: bool,
    /// A result is on display and the next digit starts over.
    pub settled: bool,
}

impl From<CalculatorState> for CalculatorStateDto {
    fn from(state: CalculatorState) -> Self {
        let settled = state.is_settled();
        Self {
            display: state.display_buffer,
            first_operand: state.first_operand.map(|o| o.to_string()),
            second_operand: state.second_operand.map(|o| o.to_string()),
            operation: state.operation.into(),
            result: state.result,
            error: state.error,
            awaiting_second_operand: state.awaiting_second_operand,
            settled,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    #[schema(value_type = String)]
    pub id: Uuid,
    pub state: CalculatorStateDto,
}

impl From<CalculatorSession> for SessionDto {
    fn from(session: CalculatorSession) -> Self {
        Self {
            id: session.id.as_uuid(),
            state: session.state.into(),
        }
    }
}

/// One calculator key press.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventDto {
    Digit { value: String },
    ClearEntry,
    ClearAll,
    SetOperation { operation: OperationDto },
    Equals,
}

impl From<EventDto> for CalculatorEvent {
    fn from(event: EventDto) -> Self {
        match event {
            EventDto::Digit { value } => Self::Digit(value),
            EventDto::ClearEntry => Self::ClearEntry,
            EventDto::ClearAll => Self::ClearAll,
            EventDto::SetOperation { operation } => Self::SetOperation(operation.into()),
            EventDto::Equals => Self::Equals,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRequest {
    pub a: f64,
    pub b: f64,
    /// One of `add`, `subtract`, `multiply`, `divide`.
    pub operation: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateResponse {
    /// `"inf"`, `"-inf"` or `"NaN"` when the value is not finite.
    #[serde(with = "super::number")]
    #[schema(value_type = f64)]
    pub result: f64,
}
