//! Uniform success envelope and hypermedia `_links` (§4.7, §6).

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use axum::response::{IntoResponse, Response};
use serde_json::{json, Value};

// Layer 3: Internal module imports
use crate::config::{AppConfig, KeyCase};
use crate::models::dict_to_camel;
use crate::VERSION;

/// Wrap `result` in `{status: "success", message, result, version}`,
/// applying [`dict_to_camel`] when `config.web_case == Camel` (§4.7).
/// camelCase rewriting is applied exactly once, here, at the envelope
/// boundary — it never leaks into internal representations (§9).
pub fn ok(config: &AppConfig, message: &str, result: Value) -> Response {
    let result = match config.web_case {
        KeyCase::Camel => dict_to_camel(result),
        KeyCase::Snake => result,
    };
    let body = json!({
        "status": "success",
        "message": message,
        "result": result,
        "version": VERSION,
    });
    (axum::http::StatusCode::OK, axum::Json(body)).into_response()
}

/// Pure function of `(api_server, actor_id, execution_id?)` — no I/O
/// (§9 Design Notes). Links are decorative, never authoritative (§4.7).
pub fn actor_links(api_server: &str, actor_id: &str) -> Value {
    let base = format!("{api_server}/actors/v2/{actor_id}");
    json!({
        "self": base,
        "messages": format!("{base}/messages"),
        "executions": format!("{base}/executions"),
        "workers": format!("{base}/workers"),
        "permissions": format!("{base}/permissions"),
    })
}

pub fn execution_links(api_server: &str, actor_id: &str, execution_id: &str) -> Value {
    let base = format!("{api_server}/actors/v2/{actor_id}/executions/{execution_id}");
    json!({
        "self": base,
        "logs": format!("{base}/logs"),
        "owner": format!("{api_server}/actors/v2/{actor_id}"),
    })
}
