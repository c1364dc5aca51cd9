use anyhow::{Context, Result};
use axum::Router;
use axum::extract::Request;
use calculator::CalculatorModule;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Module routes wrapped in request-id and tracing middleware.
#[must_use]
pub fn build_router(module: &CalculatorModule) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http().make_span_with(|req: &Request| {
            let request_id = req
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("-");
            tracing::info_span!(
                "http_request",
                method = %req.method(),
                uri = %req.uri(),
                request_id,
            )
        }))
        .layer(PropagateRequestIdLayer::x_request_id());

    module.router().layer(middleware)
}

/// Serve until `cancel` fires, then drain in-flight requests and stop the
/// session reaper.
pub async fn serve(config: &AppConfig, cancel: &CancellationToken) -> Result<()> {
    let module = CalculatorModule::new(&config.modules.calculator);
    let reaper = module.spawn_session_reaper(cancel.child_token());
    let app = build_router(&module);

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(addr = %listener.local_addr()?, "calculator server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(cancel.clone().cancelled_owned())
        .await
        .context("HTTP server failed")?;

    cancel.cancel();
    if let Err(e) = reaper.await {
        tracing::warn!(error = %e, "session reaper ended abnormally");
    }
    tracing::info!("calculator server stopped");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;
    use std::time::Duration;
    use tower::ServiceExt;

    #[tokio::test]
    async fn responses_carry_request_id() {
        let app = build_router(&CalculatorModule::default());
        let resp = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/calculator")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().contains_key(REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn incoming_request_id_is_echoed() {
        let app = build_router(&CalculatorModule::default());
        let resp = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/calculator/v1/openapi.json")
                    .header(REQUEST_ID_HEADER, "req-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.headers()[REQUEST_ID_HEADER], "req-42");
    }

    #[tokio::test]
    async fn serve_stops_on_cancel() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        let cancel = CancellationToken::new();

        let server = tokio::spawn({
            let cancel = cancel.clone();
            async move { serve(&config, &cancel).await }
        });
        tokio::time::sleep(Duration::from_millis(50)).await;
        cancel.cancel();

        tokio::time::timeout(Duration::from_secs(5), server)
            .await
            .unwrap()
            .unwrap()
            .unwrap();
    }
}
