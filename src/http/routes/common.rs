//! Shared request-handling helpers used across the route modules: id
//! parsing and the load-then-authorize sequence every handler performs
//! before touching a store (§4.3, §6).

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::auth;
use crate::error::AppError;
use crate::http::context::RequestContext;
use crate::http::state::AppState;
use crate::models::{Actor, PermissionLevel};
use crate::util::ActorId;

/// Parse the `{id}` path segment and resolve it against the caller's
/// tenant, then enforce `required`. Tenant match is always checked first
/// (§4.3 Roles, §9 Open Question 5), so a caller can never distinguish
/// "wrong tenant" from "insufficient level" by response shape.
pub async fn load_actor_checked(
    state: &AppState,
    ctx: &RequestContext,
    id: &str,
    required: PermissionLevel,
) -> Result<Actor, AppError> {
    let actor_id: ActorId = id
        .parse()
        .map_err(|_| AppError::NotFound(format!("no such actor: {id}")))?;
    let db_id = Actor::get_dbid(&ctx.tenant, &actor_id);
    let actor = state.actors.get(&db_id).await?;
    auth::require_level(&state.permissions, &actor, &ctx.tenant, &ctx.user, required).await?;
    Ok(actor)
}
