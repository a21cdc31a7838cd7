//! Worker provisioning protocol (§4.5): translates desired-state
//! requests into [`CommandChannel`] messages and per-worker shutdown
//! signals. The control plane never blocks waiting for a worker to
//! become `READY` — every function here is fire-and-forget.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::channel::WorkerCommand;
use crate::error::AppError;
use crate::http::state::AppState;
use crate::models::{Actor, Worker};

/// Ensure at least `num` workers exist for `actor` (§4.5 "Ensure at least
/// N workers"). Idempotent: if `current >= num` this is a no-op and
/// returns an empty vec. Otherwise reserves `num - current` new worker
/// ids and emits exactly one `CommandChannel` message describing the
/// whole batch.
pub async fn ensure_workers(state: &AppState, actor: &Actor, num: usize) -> Result<Vec<Worker>, AppError> {
    let current = state.workers.for_actor(&actor.db_id).await;
    if current.len() >= num {
        return Ok(Vec::new());
    }
    let deficit = num - current.len();
    let mut new_workers = Vec::with_capacity(deficit);
    for _ in 0..deficit {
        new_workers.push(state.workers.request_worker(actor).await);
    }
    state
        .command_channel
        .put_cmd(WorkerCommand {
            actor_id: actor.db_id.clone(),
            worker_ids: new_workers.iter().map(|w| w.id.to_string()).collect(),
            image: actor.image.clone(),
            tenant: actor.tenant.clone(),
            num: deficit,
            stop_existing: false,
        })
        .await;
    Ok(new_workers)
}

/// Idempotent desired-state assertion used by the message-POST hot path
/// (§4.6 step 6): make sure at least one worker is provisioned.
pub async fn ensure_one_worker(state: &AppState, actor: &Actor) -> Result<(), AppError> {
    ensure_workers(state, actor, 1).await?;
    Ok(())
}

/// Triggered when a PUT changes `image` (§4.5 "Update image"). Requests
/// exactly one replacement worker id — not a full rolling replacement of
/// the existing population — matching the literal source behavior
/// (§9 Open Question 2, decided in SPEC_FULL.md §4.5/§9).
pub async fn trigger_image_update(state: &AppState, actor: &Actor) -> Result<(), AppError> {
    let worker = state.workers.request_worker(actor).await;
    state
        .command_channel
        .put_cmd(WorkerCommand {
            actor_id: actor.db_id.clone(),
            worker_ids: vec![worker.id.to_string()],
            image: actor.image.clone(),
            tenant: actor.tenant.clone(),
            num: 1,
            stop_existing: true,
        })
        .await;
    Ok(())
}

/// Send `shutdown` on one worker's private channel (§4.5).
pub async fn shutdown_worker(state: &AppState, worker: &Worker) {
    state.worker_channel(&worker.ch_name).shutdown().await;
}

/// Shut down every worker belonging to `actor_db_id`. Invoked from actor
/// DELETE (§4.5, §4.6). Idempotent: an actor with zero workers is a no-op.
pub async fn shutdown_workers(state: &AppState, actor_db_id: &str) {
    for worker in state.workers.for_actor(actor_db_id).await {
        shutdown_worker(state, &worker).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActorRequest;

    async fn actor() -> Actor {
        Actor::from_create(
            ActorRequest {
                name: Some("f".into()),
                image: Some("hello:1".into()),
                ..Default::default()
            },
            "T",
            "alice",
            "api",
        )
        .unwrap()
    }

    #[tokio::test]
    async fn ensure_workers_is_noop_when_population_sufficient() {
        let state = AppState::in_memory_for_tests();
        let actor = actor().await;
        ensure_workers(&state, &actor, 2).await.unwrap();
        let created_again = ensure_workers(&state, &actor, 2).await.unwrap();
        assert!(created_again.is_empty());
        assert_eq!(state.workers.for_actor(&actor.db_id).await.len(), 2);
    }

    #[tokio::test]
    async fn ensure_workers_tops_up_the_deficit() {
        let state = AppState::in_memory_for_tests();
        let actor = actor().await;
        ensure_workers(&state, &actor, 2).await.unwrap();
        let topped_up = ensure_workers(&state, &actor, 3).await.unwrap();
        assert_eq!(topped_up.len(), 1);
        assert_eq!(state.workers.for_actor(&actor.db_id).await.len(), 3);
    }

    #[tokio::test]
    async fn ensure_workers_emits_exactly_one_command_for_a_batch() {
        let state = AppState::in_memory_for_tests();
        let actor = actor().await;
        ensure_workers(&state, &actor, 3).await.unwrap();
        let cmd = state.command_channel.try_recv().await.unwrap();
        assert_eq!(cmd.worker_ids.len(), 3);
        assert_eq!(state.command_channel.try_recv().await, None);
    }

    #[tokio::test]
    async fn ensure_one_worker_is_idempotent() {
        let state = AppState::in_memory_for_tests();
        let actor = actor().await;
        ensure_one_worker(&state, &actor).await.unwrap();
        ensure_one_worker(&state, &actor).await.unwrap();
        assert_eq!(state.workers.for_actor(&actor.db_id).await.len(), 1);
    }

    #[tokio::test]
    async fn trigger_image_update_requests_exactly_one_worker() {
        let state = AppState::in_memory_for_tests();
        let actor = actor().await;
        trigger_image_update(&state, &actor).await.unwrap();
        assert_eq!(state.workers.for_actor(&actor.db_id).await.len(), 1);
        let cmd = state.command_channel.try_recv().await.unwrap();
        assert!(cmd.stop_existing);
        assert_eq!(cmd.worker_ids.len(), 1);
    }

    #[tokio::test]
    async fn shutdown_workers_signals_every_channel() {
        let state = AppState::in_memory_for_tests();
        let actor = actor().await;
        ensure_workers(&state, &actor, 2).await.unwrap();
        let workers = state.workers.for_actor(&actor.db_id).await;
        shutdown_workers(&state, &actor.db_id).await;
        for w in &workers {
            let signal = state.worker_channel(&w.ch_name).try_recv().await;
            assert!(signal.is_some());
        }
    }

    #[tokio::test]
    async fn shutdown_workers_on_actor_with_none_is_noop() {
        let state = AppState::in_memory_for_tests();
        shutdown_workers(&state, "T_nonexistent").await;
    }
}
