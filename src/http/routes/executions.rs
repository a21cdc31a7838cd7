//! Execution inspection and the internal worker-reporting endpoint
//! (§4.6, §6).

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use serde_json::json;

// Layer 3: Internal module imports
use super::common::load_actor_checked;
use crate::error::AppError;
use crate::http::context::RequestContext;
use crate::http::envelope::{execution_links, ok};
use crate::http::state::AppState;
use crate::models::{ExecutionUpdateRequest, ExecutionsSummary, PermissionLevel};

pub async fn list_executions(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let actor = load_actor_checked(&state, &ctx, &id, PermissionLevel::Read).await?;
    let executions = state.executions.for_actor(&actor.db_id).await;
    let summary = ExecutionsSummary::compute(executions.iter());
    Ok(ok(&state.config, "executions summary retrieved", summary.display()))
}

/// Internal endpoint a worker calls to report execution progress/results.
/// Not part of the end-user-facing contract, but authorized the same way
/// as any other actor-scoped mutation (§6).
pub async fn record_execution(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<String>,
    Json(req): Json<ExecutionUpdateRequest>,
) -> Result<Response, AppError> {
    let actor = load_actor_checked(&state, &ctx, &id, PermissionLevel::Update).await?;
    let mut execution = state.executions.get(&actor.db_id, &req.execution_id).await?;
    execution.apply_update(&req);
    state.executions.set(&actor.db_id, &execution).await;
    Ok(ok(&state.config, "execution updated", execution.display()))
}

pub async fn get_execution(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path((id, execution_id)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let actor = load_actor_checked(&state, &ctx, &id, PermissionLevel::Read).await?;
    let execution = state.executions.get(&actor.db_id, &execution_id).await?;
    let mut result = execution.display();
    result["_links"] = execution_links(&actor.api_server, &actor.id.to_string(), &execution_id);
    Ok(ok(&state.config, "execution retrieved", result))
}

pub async fn get_logs(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path((id, execution_id)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let actor = load_actor_checked(&state, &ctx, &id, PermissionLevel::Read).await?;
    // Confirm the execution belongs to this actor before returning its logs.
    state.executions.get(&actor.db_id, &execution_id).await?;
    let logs = state.logs.get(&execution_id).await.unwrap_or_default();
    Ok(ok(&state.config, "logs retrieved", json!({"logs": logs})))
}
