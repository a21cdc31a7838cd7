//! Authorization model tied to actor identity (§4.3).

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::error::AppError;
use crate::models::{Actor, PermissionLevel, WORLD};
use crate::store::PermissionsStore;

/// Resolve `user`'s effective permission level on `actor_db_id`: the
/// user's own grant, unioned with whatever `WORLD` is granted (§4.3
/// steps 1-2). Missing grants default to `NONE`.
pub async fn effective_level(
    permissions: &PermissionsStore,
    actor_db_id: &str,
    user: &str,
) -> PermissionLevel {
    let own = permissions.level_for(actor_db_id, user).await;
    let world = permissions.level_for(actor_db_id, WORLD).await;
    own.max(world)
}

/// Enforce that `actor` belongs to `caller_tenant` and that `user` holds
/// at least `required` on it. Tenant mismatch is always denied,
/// regardless of permission grants (§4.3 Roles, §9 Open Question 5) —
/// checked first so a caller can never probe a foreign actor's
/// permission state via timing or error-shape differences.
pub async fn require_level(
    permissions: &PermissionsStore,
    actor: &Actor,
    caller_tenant: &str,
    user: &str,
    required: PermissionLevel,
) -> Result<(), AppError> {
    if actor.tenant != caller_tenant {
        return Err(AppError::Authorization(format!(
            "actor {} does not belong to tenant {caller_tenant}",
            actor.id
        )));
    }
    let level = effective_level(permissions, &actor.db_id, user).await;
    if level >= required {
        Ok(())
    } else {
        Err(AppError::Authorization(format!(
            "user {user} has level {level} on {}, needs at least {required}",
            actor.db_id
        )))
    }
}
