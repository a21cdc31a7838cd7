//! Actor CRUD (§4.6, §6). The state-machine transitions and the
//! delete cascade live here; the worker-rollout mechanics they trigger
//! live in [`crate::worker`].

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use serde_json::json;

// Layer 3: Internal module imports
use super::common::load_actor_checked;
use crate::auth;
use crate::error::AppError;
use crate::http::context::RequestContext;
use crate::http::envelope::{actor_links, ok};
use crate::http::state::AppState;
use crate::models::{Actor, ActorRequest, PermissionLevel};
use crate::worker;

async fn name_taken(state: &AppState, tenant: &str, name: &str) -> bool {
    state
        .actors
        .all()
        .await
        .iter()
        .any(|a| a.tenant == tenant && a.name == name)
}

pub async fn list_actors(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Response, AppError> {
    let mut visible = Vec::new();
    for actor in state.actors.all().await {
        if actor.tenant != ctx.tenant {
            continue;
        }
        let level = auth::effective_level(&state.permissions, &actor.db_id, &ctx.user).await;
        if level >= PermissionLevel::Read {
            visible.push(actor.display());
        }
    }
    Ok(ok(&state.config, "actors retrieved", json!(visible)))
}

/// Actor creation is admitted for any authenticated caller (§4.3) and
/// must atomically publish the actor record and the creator's `UPDATE`
/// permission; since `Store` offers no cross-key transaction, the grant
/// is written first so a reader never observes an actor with no owner
/// (§5 Atomicity requirements). A worker is ensured immediately after the
/// record lands, matching the original source's `ActorsResource.post`.
pub async fn create_actor(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(req): Json<ActorRequest>,
) -> Result<Response, AppError> {
    if let Some(name) = &req.name {
        if name_taken(&state, &ctx.tenant, name).await {
            return Err(AppError::Conflict(format!(
                "an actor named {name} already exists for this tenant"
            )));
        }
    }
    let actor = Actor::from_create(req, &ctx.tenant, &ctx.user, &ctx.api_server)?;
    state
        .permissions
        .grant(&actor.db_id, &ctx.user, PermissionLevel::Update)
        .await;
    state.actors.set(&actor).await;
    worker::ensure_one_worker(&state, &actor).await?;

    let mut result = actor.display();
    result["_links"] = actor_links(&actor.api_server, &actor.id.to_string());
    Ok(ok(&state.config, "actor created", result))
}

pub async fn get_actor(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let actor = load_actor_checked(&state, &ctx, &id, PermissionLevel::Read).await?;
    let mut result = actor.display();
    result["_links"] = actor_links(&actor.api_server, &actor.id.to_string());
    Ok(ok(&state.config, "actor retrieved", result))
}

pub async fn update_actor(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<String>,
    Json(req): Json<ActorRequest>,
) -> Result<Response, AppError> {
    let actor = load_actor_checked(&state, &ctx, &id, PermissionLevel::Update).await?;
    let (updated, image_changed) = actor.apply_update(req)?;
    state.actors.set(&updated).await;
    if image_changed {
        worker::trigger_image_update(&state, &updated).await?;
    }
    let mut result = updated.display();
    result["_links"] = actor_links(&updated.api_server, &updated.id.to_string());
    Ok(ok(&state.config, "actor updated", result))
}

/// Cascade delete (§4.6, §5): shutdown workers, purge logs for every
/// prior execution, delete the actor record, delete permissions. The
/// `executions_store` entry for this actor is deliberately left behind —
/// this mirrors the source's observed (likely oversight) behavior rather
/// than the more thorough cleanup one would expect (§9 Open Question 3).
pub async fn delete_actor(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let actor = load_actor_checked(&state, &ctx, &id, PermissionLevel::Update).await?;

    worker::shutdown_workers(&state, &actor.db_id).await;
    for execution in state.executions.for_actor(&actor.db_id).await {
        state.logs.delete(&execution.id.to_string()).await;
    }
    state.actors.delete(&actor.db_id).await;
    state.permissions.delete_all_for_actor(&actor.db_id).await;

    Ok(ok(
        &state.config,
        "actor deleted",
        json!({"id": actor.id.to_string()}),
    ))
}
