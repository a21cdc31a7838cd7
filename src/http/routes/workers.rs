//! Worker population inspection and desired-state requests (§4.5, §6).
//! The actual provisioning mechanics live in [`crate::worker`]; these
//! handlers only authorize and translate HTTP in/out.

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
use crate::error::AppError;
use crate::http::context::RequestContext;
use crate::http::envelope::ok;
use crate::http::state::AppState;
use crate::models::PermissionLevel;
use crate::worker;

#[derive(Debug, Deserialize)]
pub struct EnsureWorkersRequest {
    pub num: usize,
}

pub async fn list_workers(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let actor = load_actor_checked(&state, &ctx, &id, PermissionLevel::Read).await?;
    let workers: Vec<_> = state
        .workers
        .for_actor(&actor.db_id)
        .await
        .iter()
        .map(|w| w.display())
        .collect();
    Ok(ok(&state.config, "workers retrieved", json!(workers)))
}

pub async fn ensure_workers(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<String>,
    Json(req): Json<EnsureWorkersRequest>,
) -> Result<Response, AppError> {
    let actor = load_actor_checked(&state, &ctx, &id, PermissionLevel::Update).await?;
    let created = worker::ensure_workers(&state, &actor, req.num).await?;
    let display: Vec<_> = created.iter().map(|w| w.display()).collect();
    Ok(ok(&state.config, "workers requested", json!(display)))
}

pub async fn get_worker(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path((id, worker_id)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let actor = load_actor_checked(&state, &ctx, &id, PermissionLevel::Read).await?;
    let worker = state.workers.get(&actor.db_id, &worker_id).await?;
    Ok(ok(&state.config, "worker retrieved", worker.display()))
}

pub async fn stop_worker(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path((id, worker_id)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let actor = load_actor_checked(&state, &ctx, &id, PermissionLevel::Update).await?;
    let target = state.workers.get(&actor.db_id, &worker_id).await?;
    worker::shutdown_worker(&state, &target).await;
    Ok(ok(&state.config, "worker shutdown requested", json!({"id": worker_id})))
}
