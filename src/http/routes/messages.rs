//! The message intake hot path (§4.6 "Message POST") and the queue-depth
//! introspection endpoint.

// Layer 1: Standard library imports
use std::collections::BTreeMap;

// Layer 2: Third-party crate imports
use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::body::Bytes;
use serde_json::{json, Value};

// Layer 3: Internal module imports
use super::common::load_actor_checked;
use crate::channel::MessagePayload;
use crate::error::AppError;
use crate::http::context::RequestContext;
use crate::http::envelope::ok;
use crate::http::state::AppState;
use crate::models::{Execution, PermissionLevel};
use crate::worker;

pub async fn messages_depth(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let actor = load_actor_checked(&state, &ctx, &id, PermissionLevel::Read).await?;
    let depth = state.actor_msg_channel(&actor.db_id).approx_len().await;
    Ok(ok(&state.config, "queue depth retrieved", json!({"length": depth})))
}

/// Decide the payload precedence from §4.6 step 2: an object's `message`
/// field wins over the whole body; a string `message` field becomes
/// `Text`, any other JSON value becomes `Json`; a body that isn't valid
/// JSON at all falls back to raw text, then raw bytes.
///
/// The second element of the tuple is `true` whenever a `message` field
/// was present at all. A `message` field is always reported on the wire
/// as plain text, even when its value is itself a JSON object or number —
/// the field is documented as a string slot regardless of what's put in
/// it, so only a bare body (no `message` field) gets tagged by its own
/// JSON-ness.
fn extract_payload(body: &Bytes) -> (MessagePayload, bool) {
    if let Ok(value) = serde_json::from_slice::<Value>(body) {
        if let Value::Object(ref map) = value {
            if let Some(message) = map.get("message") {
                let payload = match message {
                    Value::String(s) => MessagePayload::Text(s.clone()),
                    other => MessagePayload::Json(other.clone()),
                };
                return (payload, true);
            }
        }
        return (MessagePayload::Json(value), false);
    }
    match std::str::from_utf8(body) {
        Ok(s) => (MessagePayload::Text(s.to_string()), false),
        Err(_) => (MessagePayload::Bytes(body.to_vec()), false),
    }
}

/// The hot path (§4.6): resolve + authorize, derive the payload, assemble
/// metadata, create the execution record *before* enqueueing so its id is
/// available for correlation, publish, then assert a worker exists.
pub async fn post_message(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<String>,
    Query(query): Query<BTreeMap<String, String>>,
    body: Bytes,
) -> Result<Response, AppError> {
    let actor = load_actor_checked(&state, &ctx, &id, PermissionLevel::Execute).await?;

    let (payload, message_field_present) = extract_payload(&body);
    let mut metadata: BTreeMap<String, Value> = query
        .into_iter()
        .filter(|(k, _)| k != "message")
        .map(|(k, v)| (k, Value::String(v)))
        .collect();
    let content_type_tag = if message_field_present {
        "str"
    } else {
        payload.content_type_tag()
    };
    metadata.insert("_abaco_Content-Type".into(), json!(content_type_tag));
    metadata.insert("_abaco_username".into(), json!(ctx.user));
    metadata.insert("_abaco_api_server".into(), json!(ctx.api_server));
    if let Some(header_name) = &ctx.jwt_header_name {
        metadata.insert("_abaco_jwt_header_name".into(), json!(header_name));
    }

    let execution = Execution::new_submitted(&actor.db_id, &ctx.user);
    metadata.insert("_abaco_execution_id".into(), json!(execution.id.to_string()));
    state.executions.set(&actor.db_id, &execution).await;

    state
        .actor_msg_channel(&actor.db_id)
        .put_msg(payload, metadata)
        .await;

    worker::ensure_one_worker(&state, &actor).await?;

    Ok(ok(
        &state.config,
        "message accepted",
        json!({"execution_id": execution.id.to_string()}),
    ))
}
