//! HTTP handlers, one module per resource, wired into the router in
//! [`crate::http::router`] (§6).

mod actors;
mod common;
mod executions;
mod messages;
mod permissions;
mod state_blob;
mod workers;

use axum::routing::get;
use axum::Router;

use crate::http::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/actors", get(actors::list_actors).post(actors::create_actor))
        .route(
            "/actors/{id}",
            get(actors::get_actor)
                .put(actors::update_actor)
                .delete(actors::delete_actor),
        )
        .route(
            "/actors/{id}/state",
            get(state_blob::get_state).post(state_blob::post_state),
        )
        .route(
            "/actors/{id}/executions",
            get(executions::list_executions).post(executions::record_execution),
        )
        .route("/actors/{id}/executions/{eid}", get(executions::get_execution))
        .route(
            "/actors/{id}/executions/{eid}/logs",
            get(executions::get_logs),
        )
        .route(
            "/actors/{id}/messages",
            get(messages::messages_depth).post(messages::post_message),
        )
        .route(
            "/actors/{id}/workers",
            get(workers::list_workers).post(workers::ensure_workers),
        )
        .route(
            "/actors/{id}/workers/{wid}",
            get(workers::get_worker).delete(workers::stop_worker),
        )
        .route(
            "/actors/{id}/permissions",
            get(permissions::list_permissions).post(permissions::grant_permission),
        )
}
