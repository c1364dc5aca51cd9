use utoipa::OpenApi;

use super::dto::{
    CalculatorStateDto, EvaluateRequest, EvaluateResponse, EventDto, OperationDto, SessionDto,
};
use super::handlers;
use super::problem::Problem;

#[derive(OpenApi)]
#[openapi(
    info(title = "Calculator API", description = "Session-backed four-function calculator"),
    paths(
        handlers::create_session,
        handlers::get_session,
        handlers::handle_event,
        handlers::delete_session,
        handlers::evaluate,
    ),
    components(schemas(
        SessionDto,
        CalculatorStateDto,
        OperationDto,
        EventDto,
        EvaluateRequest,
        EvaluateResponse,
        Problem,
    )),
    tags((name = "Calculator", description = "Calculator sessions and arithmetic"))
)]
pub struct ApiDoc;
