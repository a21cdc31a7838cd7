//! The actor `state` blob endpoints (§3, §4.6, §6). Disabled entirely for
//! stateless actors.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use serde_json::Value;

// Layer 3: Internal module imports
use super::common::load_actor_checked;
use crate::error::AppError;
use crate::http::context::RequestContext;
use crate::http::envelope::ok;
use crate::http::state::AppState;
use crate::models::PermissionLevel;

pub async fn get_state(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let actor = load_actor_checked(&state, &ctx, &id, PermissionLevel::Read).await?;
    Ok(ok(&state.config, "state retrieved", actor.state))
}

/// Returns 404 for a stateless actor, matching the observed source
/// behavior rather than the more conventional 409/400 (§9 Open Question 1).
/// A more RESTful response would be `409 Conflict`, but this implementation
/// preserves the literal original behavior.
pub async fn post_state(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<String>,
    Json(new_state): Json<Value>,
) -> Result<Response, AppError> {
    let actor = load_actor_checked(&state, &ctx, &id, PermissionLevel::Update).await?;
    if actor.stateless {
        return Err(AppError::stateless_actor(&actor.id.to_string()));
    }
    let mut updated = actor;
    updated.state = new_state;
    state.actors.set(&updated).await;
    Ok(ok(&state.config, "state updated", updated.state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::routes::tests_support::{ctx, ok_body};
    use crate::models::{Actor, ActorRequest};
    use serde_json::json;

    async fn make_actor(state: &AppState, stateless: bool) -> Actor {
        let actor = Actor::from_create(
            ActorRequest {
                name: Some("f".into()),
                image: Some("hello:1".into()),
                stateless: Some(stateless),
                ..Default::default()
            },
            "T",
            "alice",
            "api",
        )
        .unwrap();
        state
            .permissions
            .grant(&actor.db_id, "alice", PermissionLevel::Update)
            .await;
        state.actors.set(&actor).await;
        actor
    }

    #[tokio::test]
    async fn post_then_get_state_round_trips() {
        let state = AppState::in_memory_for_tests();
        let actor = make_actor(&state, false).await;
        post_state(
            State(state.clone()),
            ctx("T", "alice"),
            Path(actor.id.to_string()),
            Json(json!({"count": 3})),
        )
        .await
        .unwrap();
        let resp = get_state(State(state), ctx("T", "alice"), Path(actor.id.to_string()))
            .await
            .unwrap();
        let body = ok_body(resp).await;
        assert_eq!(body["result"]["count"], 3);
    }

    #[tokio::test]
    async fn post_state_on_stateless_actor_is_404() {
        let state = AppState::in_memory_for_tests();
        let actor = make_actor(&state, true).await;
        let result = post_state(
            State(state),
            ctx("T", "alice"),
            Path(actor.id.to_string()),
            Json(json!({"count": 3})),
        )
        .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
