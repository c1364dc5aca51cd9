use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Extension, Router};

use crate::api::rest::handlers;
use crate::domain::service::Service;

pub const OPENAPI_PATH: &str = "/calculator/v1/openapi.json";

#[must_use]
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    let api = Router::new()
        .route("/calculator/v1/sessions", post(handlers::create_session))
        .route(
            "/calculator/v1/sessions/{id}",
            get(handlers::get_session).delete(handlers::delete_session),
        )
        .route(
            "/calculator/v1/sessions/{id}/events",
            post(handlers::handle_event),
        )
        .route("/calculator/v1/evaluate", post(handlers::evaluate))
        .route(OPENAPI_PATH, get(handlers::openapi_json))
        .layer(Extension(service));

    router.merge(api)
}
