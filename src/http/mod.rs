//! Axum wiring: router assembly, shared state, the request context
//! extractor, and the response envelope (§4.7, §4.8, §6).

pub mod context;
pub mod envelope;
mod routes;
pub mod state;

use axum::extract::Request;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use state::AppState;

const TENANT_HEADER: &str = "x-abaco-tenant";
const USER_HEADER: &str = "x-abaco-user";

/// Build the full router for `/actors/v2/*`, layered with request tracing
/// and permissive CORS suitable for a multi-origin API gateway. Each
/// request gets one span carrying `tenant`/`user` when present.
pub fn router(app_state: AppState) -> Router {
    let trace = TraceLayer::new_for_http().make_span_with(|req: &Request| {
        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string()
        };
        tracing::info_span!(
            "http_request",
            method = %req.method(),
            path = %req.uri().path(),
            tenant = header(TENANT_HEADER),
            user = header(USER_HEADER),
        )
    });

    Router::new()
        .nest("/actors/v2", routes::routes())
        .layer(trace)
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
