use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    body::Body,
    http::{Request, Response, StatusCode},
    middleware::from_fn_with_state,
    routing::get,
};
use scaffolding::ScaffoldingModule;
use scaffolding::api::rest::error::ErrorPayload;
use serde_json::json;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::field::Empty;

use crate::auth::{AuthState, auth_middleware};
use crate::config::AppConfig;
use crate::cors::build_cors_layer;

const REQUEST_ID_HEADER: &str = "x-request-id";

fn apply_trace_layer(router: Router) -> Router {
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(|req: &Request<Body>| {
                let rid = req
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("n/a");
                tracing::info_span!(
                    "http_request",
                    method = %req.method(),
                    uri = %req.uri().path(),
                    request_id = %rid,
                    status = Empty,
                    latency_ms = Empty,
                )
            })
            .on_response(|res: &Response<Body>, latency: Duration, span: &tracing::Span| {
                span.record("status", res.status().as_u16());
                span.record("latency_ms", latency.as_millis());
            }),
    )
}

/// Build the full HTTP application.
///
/// At runtime requests flow `SetRequestId` → `PropagateRequestId` → Trace →
/// Timeout → CORS → Auth → routes.
#[must_use]
pub fn build_router(cfg: &AppConfig, module: &ScaffoldingModule) -> Router {
    let mut router = Router::new()
        .route("/healthz", get(|| async { Json(json!({ "status": "ok" })) }))
        .merge(module.router())
        .fallback(|| async { ErrorPayload::new(StatusCode::NOT_FOUND, "Resource not found") })
        .method_not_allowed_fallback(|| async {
            ErrorPayload::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
        });

    router = router.layer(from_fn_with_state(
        AuthState::from_config(&cfg.auth),
        auth_middleware,
    ));

    if cfg.server.cors_enabled {
        router = router.layer(build_cors_layer(&cfg.server));
    }

    router = router.layer(TimeoutLayer::with_status_code(
        StatusCode::GATEWAY_TIMEOUT,
        Duration::from_millis(cfg.server.request_timeout_ms),
    ));

    router = apply_trace_layer(router);
    router = router.layer(PropagateRequestIdLayer::x_request_id());
    router.layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Validate config, wire the module and serve until a shutdown signal.
///
/// # Errors
/// Returns an error for invalid configuration or if the listener fails.
pub async fn serve(cfg: &AppConfig) -> Result<()> {
    cfg.validate()?;
    let module = ScaffoldingModule::from_config(cfg.scaffolding.clone())?;
    let router = build_router(cfg, &module);

    let listener = tokio::net::TcpListener::bind(cfg.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.server.bind_addr))?;
    tracing::info!(addr = %listener.local_addr()?, "Scaffolding server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(host_bootstrap::shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("Scaffolding server stopped");
    Ok(())
}
