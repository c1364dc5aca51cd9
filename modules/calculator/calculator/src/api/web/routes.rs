use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Extension, Router};

use crate::api::web::handlers;
use crate::domain::service::Service;

pub const PAGE_PATH: &str = "/calculator";

#[must_use]
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    let web = Router::new()
        .route(PAGE_PATH, get(handlers::index))
        .route("/calculator/add-number", post(handlers::add_number))
        .route("/calculator/clear-number", post(handlers::clear_number))
        .route("/calculator/clear-all", post(handlers::clear_all))
        .route("/calculator/set-operation", post(handlers::set_operation))
        .route("/calculator/calculate", post(handlers::calculate))
        .layer(Extension(service));

    router.merge(web)
}
