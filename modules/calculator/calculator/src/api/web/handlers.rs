use std::sync::Arc;

use axum::extract::{Extension, Form};
use axum::http::Uri;
use axum::response::{Html, IntoResponse, Redirect};
use calculator_sdk::{CalculatorEvent, Operation};
use serde::Deserialize;
use tracing::debug;

use super::page;
use super::routes::PAGE_PATH;
use super::session::SessionCookie;
use crate::api::rest::error::{ApiResult, ResultExt};
use crate::domain::error::DomainError;
use crate::domain::service::Service;

#[derive(Debug, Deserialize)]
pub struct NumberForm {
    pub number: String,
}

#[derive(Debug, Deserialize)]
pub struct OperationForm {
    pub operation: String,
}

pub async fn index(
    Extension(svc): Extension<Arc<Service>>,
    cookie: SessionCookie,
    uri: Uri,
) -> ApiResult<impl IntoResponse> {
    if cookie.is_new {
        debug!(session = %cookie.id, "starting browser calculator session");
    }
    let state = svc.get_state_or_create(cookie.id).at(&uri)?;
    let html = page::render(&state).at(&uri)?;
    Ok((cookie.set_cookie(), Html(html)))
}

/// A rejected key press is kept on the page as the session error, like
/// any other input mistake made through the form.
pub async fn add_number(
    Extension(svc): Extension<Arc<Service>>,
    cookie: SessionCookie,
    uri: Uri,
    Form(form): Form<NumberForm>,
) -> ApiResult<impl IntoResponse> {
    let pressed = svc.handle_event_or_create(cookie.id, CalculatorEvent::Digit(form.number));
    if let Err(DomainError::Validation { message, .. }) = &pressed {
        svc.record_error(cookie.id, format!("Invalid input: {message}"))
            .at(&uri)?;
    } else {
        pressed.at(&uri)?;
    }
    Ok(back_to_page(cookie))
}

pub async fn clear_number(
    Extension(svc): Extension<Arc<Service>>,
    cookie: SessionCookie,
    uri: Uri,
) -> ApiResult<impl IntoResponse> {
    svc.handle_event_or_create(cookie.id, CalculatorEvent::ClearEntry)
        .at(&uri)?;
    Ok(back_to_page(cookie))
}

pub async fn clear_all(
    Extension(svc): Extension<Arc<Service>>,
    cookie: SessionCookie,
    uri: Uri,
) -> ApiResult<impl IntoResponse> {
    svc.handle_event_or_create(cookie.id, CalculatorEvent::ClearAll)
        .at(&uri)?;
    Ok(back_to_page(cookie))
}

/// Unknown tags are kept on the page as the session error instead of
/// failing the request.
pub async fn set_operation(
    Extension(svc): Extension<Arc<Service>>,
    cookie: SessionCookie,
    uri: Uri,
    Form(form): Form<OperationForm>,
) -> ApiResult<impl IntoResponse> {
    match form.operation.parse::<Operation>() {
        Ok(op) => {
            svc.handle_event_or_create(cookie.id, CalculatorEvent::SetOperation(op))
                .at(&uri)?;
        }
        Err(_) => {
            svc.reject_operation(cookie.id, &form.operation).at(&uri)?;
        }
    }
    Ok(back_to_page(cookie))
}

pub async fn calculate(
    Extension(svc): Extension<Arc<Service>>,
    cookie: SessionCookie,
    uri: Uri,
) -> ApiResult<impl IntoResponse> {
    svc.handle_event_or_create(cookie.id, CalculatorEvent::Equals)
        .at(&uri)?;
    Ok(back_to_page(cookie))
}

fn back_to_page(cookie: SessionCookie) -> impl IntoResponse {
    (cookie.set_cookie(), Redirect::to(PAGE_PATH))
}
