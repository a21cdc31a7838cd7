//! Permission listing and granting (§4.3, §6). Both operations require
//! `UPDATE` on the target actor — granting access is itself a privileged
//! act, not merely a read.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

// Layer 3: Internal module imports
use super::common::load_actor_checked;
use crate::error::{AppError, ValidationError};
use crate::http::context::RequestContext;
use crate::http::envelope::ok;
use crate::http::state::AppState;
use crate::models::PermissionLevel;

#[derive(Debug, Deserialize)]
pub struct GrantRequest {
    pub user: String,
    pub level: String,
}

pub async fn list_permissions(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let actor = load_actor_checked(&state, &ctx, &id, PermissionLevel::Update).await?;
    let grants: Vec<_> = state
        .permissions
        .list(&actor.db_id)
        .await
        .into_iter()
        .map(|p| json!({"user": p.user, "level": p.level.to_string()}))
        .collect();
    Ok(ok(&state.config, "permissions retrieved", json!(grants)))
}

pub async fn grant_permission(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<String>,
    Json(req): Json<GrantRequest>,
) -> Result<Response, AppError> {
    let actor = load_actor_checked(&state, &ctx, &id, PermissionLevel::Update).await?;
    let level = PermissionLevel::parse(&req.level).ok_or_else(|| {
        ValidationError::InvalidValue {
            field: "level".into(),
            reason: format!("unknown permission level: {}", req.level),
        }
    })?;
    state.permissions.grant(&actor.db_id, &req.user, level).await;
    Ok(ok(
        &state.config,
        "permission granted",
        json!({"user": req.user, "level": level.to_string()}),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::routes::tests_support::{ctx, ok_body};
    use crate::models::{Actor, ActorRequest};

    async fn make_actor(state: &AppState) -> Actor {
        let actor = Actor::from_create(
            ActorRequest {
                name: Some("f".into()),
                image: Some("hello:1".into()),
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
    async fn grant_then_list_reflects_new_grant() {
        let state = AppState::in_memory_for_tests();
        let actor = make_actor(&state).await;

        grant_permission(
            State(state.clone()),
            ctx("T", "alice"),
            Path(actor.id.to_string()),
            Json(GrantRequest {
                user: "bob".into(),
                level: "READ".into(),
            }),
        )
        .await
        .unwrap();

        let listed = list_permissions(State(state), ctx("T", "alice"), Path(actor.id.to_string()))
            .await
            .unwrap();
        let body = ok_body(listed).await;
        let grants = body["result"].as_array().unwrap();
        assert!(grants.iter().any(|g| g["user"] == "bob" && g["level"] == "READ"));
    }

    #[tokio::test]
    async fn grant_with_unknown_level_is_rejected() {
        let state = AppState::in_memory_for_tests();
        let actor = make_actor(&state).await;
        let result = grant_permission(
            State(state),
            ctx("T", "alice"),
            Path(actor.id.to_string()),
            Json(GrantRequest {
                user: "bob".into(),
                level: "SUPERADMIN".into(),
            }),
        )
        .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
