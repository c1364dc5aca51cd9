use std::sync::Arc;

use axum::extract::{Extension, Json, Path};
use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use calculator_sdk::{CalculatorSession, SessionId};
use uuid::Uuid;

use super::dto::{EvaluateRequest, EvaluateResponse, EventDto, SessionDto};
use super::error::{ApiResult, ResultExt};
use super::openapi::ApiDoc;
use super::problem::Problem;
use crate::domain::evaluator;
use crate::domain::service::Service;

#[utoipa::path(
    post,
    path = "/calculator/v1/sessions",
    tag = "Calculator",
    operation_id = "calculator.create_session",
    responses(
        (status = 201, description = "Session created", body = SessionDto),
        (status = 503, description = "Session limit reached", body = Problem),
    )
)]
pub async fn create_session(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
) -> ApiResult<impl IntoResponse> {
    let (id, state) = svc.create_session().at(&uri)?;
    let dto: SessionDto = CalculatorSession { id, state }.into();
    Ok((StatusCode::CREATED, Json(dto)))
}

#[utoipa::path(
    get,
    path = "/calculator/v1/sessions/{id}",
    tag = "Calculator",
    operation_id = "calculator.get_session",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "Current session state", body = SessionDto),
        (status = 404, description = "Unknown session", body = Problem),
    )
)]
pub async fn get_session(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    uri: Uri,
) -> ApiResult<Json<SessionDto>> {
    let id = SessionId::from(id);
    let state = svc.get_state(id).at(&uri)?;
    Ok(Json(CalculatorSession { id, state }.into()))
}

#[utoipa::path(
    post,
    path = "/calculator/v1/sessions/{id}/events",
    tag = "Calculator",
    operation_id = "calculator.handle_event",
    params(("id" = String, Path, description = "Session id")),
    request_body = EventDto,
    responses(
        (status = 200, description = "State after the event", body = SessionDto),
        (status = 400, description = "Rejected keystroke", body = Problem),
        (status = 404, description = "Unknown session", body = Problem),
    )
)]
pub async fn handle_event(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    uri: Uri,
    Json(event): Json<EventDto>,
) -> ApiResult<Json<SessionDto>> {
    let id = SessionId::from(id);
    let state = svc.handle_event(id, event.into()).at(&uri)?;
    Ok(Json(CalculatorSession { id, state }.into()))
}

#[utoipa::path(
    delete,
    path = "/calculator/v1/sessions/{id}",
    tag = "Calculator",
    operation_id = "calculator.delete_session",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 204, description = "Session discarded"),
        (status = 404, description = "Unknown session", body = Problem),
    )
)]
pub async fn delete_session(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    uri: Uri,
) -> ApiResult<StatusCode> {
    svc.delete_session(SessionId::from(id)).at(&uri)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/calculator/v1/evaluate",
    tag = "Calculator",
    operation_id = "calculator.evaluate",
    request_body = EvaluateRequest,
    responses(
        (status = 200, description = "Computed value", body = EvaluateResponse),
        (status = 422, description = "Division by zero or unknown operation", body = Problem),
    )
)]
pub async fn evaluate(
    uri: Uri,
    Json(req): Json<EvaluateRequest>,
) -> ApiResult<Json<EvaluateResponse>> {
    let result = evaluator::evaluate_tag(req.a, req.b, &req.operation).at(&uri)?;
    Ok(Json(EvaluateResponse { result }))
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    use utoipa::OpenApi;
    Json(ApiDoc::openapi())
}
