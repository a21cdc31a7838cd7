//! Typed convenience wrappers over the four stores named in §4.1:
//! `actors_store`, `executions_store`, `logs_store`, `permissions_store`.
//!
//! `executions_store` and `permissions_store` are conceptually
//! `key -> map of sub_key -> value`; the underlying [`Store`] contract
//! only needs flat `key -> record` (§4.1 explicitly avoids requiring
//! cross-key transactions), so nesting is modeled with a compound key
//! (`"{actor_db_id}:{sub_key}"`) and prefix enumeration via `items()`.

// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 2: Third-party crate imports
use serde_json::Value;

// Layer 3: Internal module imports
use super::traits::Store;
use crate::error::AppError;
use crate::models::{Actor, Execution, Permission, PermissionLevel, Worker};

fn compound_key(scope: &str, sub: &str) -> String {
    format!("{scope}:{sub}")
}

fn prefix_match<'a>(key: &'a str, scope: &str) -> Option<&'a str> {
    key.strip_prefix(scope).and_then(|rest| rest.strip_prefix(':'))
}

#[derive(Clone)]
pub struct ActorsStore {
    backend: Arc<dyn Store>,
}

impl ActorsStore {
    pub fn new(backend: Arc<dyn Store>) -> Self {
        Self { backend }
    }

    pub async fn get(&self, db_id: &str) -> Result<Actor, AppError> {
        Actor::from_db(&self.backend.get(db_id).await?)
    }

    pub async fn set(&self, actor: &Actor) {
        self.backend.set(&actor.db_id, actor.to_db()).await;
    }

    pub async fn update_field(&self, db_id: &str, field: &str, value: Value) -> Result<(), AppError> {
        self.backend.update(db_id, field, value).await
    }

    pub async fn delete(&self, db_id: &str) {
        self.backend.delete(db_id).await;
    }

    /// Enumerate every actor regardless of tenant; callers filter by
    /// tenant and permission (§6 GET /actors).
    pub async fn all(&self) -> Vec<Actor> {
        self.backend
            .items()
            .await
            .into_iter()
            .filter_map(|(_, record)| Actor::from_db(&record).ok())
            .collect()
    }
}

#[derive(Clone)]
pub struct ExecutionsStore {
    backend: Arc<dyn Store>,
}

impl ExecutionsStore {
    pub fn new(backend: Arc<dyn Store>) -> Self {
        Self { backend }
    }

    pub async fn get(&self, actor_db_id: &str, execution_id: &str) -> Result<Execution, AppError> {
        let key = compound_key(actor_db_id, execution_id);
        Execution::from_db(&self.backend.get(&key).await?)
    }

    pub async fn set(&self, actor_db_id: &str, execution: &Execution) {
        let key = compound_key(actor_db_id, &execution.id.to_string());
        self.backend.set(&key, execution.to_db()).await;
    }

    pub async fn update_field(
        &self,
        actor_db_id: &str,
        execution_id: &str,
        field: &str,
        value: Value,
    ) -> Result<(), AppError> {
        let key = compound_key(actor_db_id, execution_id);
        self.backend.update(&key, field, value).await
    }

    /// All executions belonging to `actor_db_id`, in no particular order
    /// (§4.1 — `items()` gives no ordering guarantee).
    pub async fn for_actor(&self, actor_db_id: &str) -> Vec<Execution> {
        self.backend
            .items()
            .await
            .into_iter()
            .filter(|(key, _)| prefix_match(key, actor_db_id).is_some())
            .filter_map(|(_, record)| Execution::from_db(&record).ok())
            .collect()
    }

    /// Delete every execution belonging to `actor_db_id` (cascade, §5/§6
    /// invariant: actor deletion purges all four stores for that `db_id`).
    pub async fn delete_all_for_actor(&self, actor_db_id: &str) {
        let keys: Vec<String> = self
            .backend
            .items()
            .await
            .into_iter()
            .filter(|(key, _)| prefix_match(key, actor_db_id).is_some())
            .map(|(key, _)| key)
            .collect();
        for key in keys {
            self.backend.delete(&key).await;
        }
    }
}

#[derive(Clone)]
pub struct LogsStore {
    backend: Arc<dyn Store>,
}

impl LogsStore {
    pub fn new(backend: Arc<dyn Store>) -> Self {
        Self { backend }
    }

    pub async fn get(&self, execution_id: &str) -> Result<String, AppError> {
        let record = self.backend.get(execution_id).await?;
        Ok(record.as_str().unwrap_or_default().to_string())
    }

    pub async fn set(&self, execution_id: &str, text: &str) {
        self.backend
            .set(execution_id, Value::String(text.to_string()))
            .await;
    }

    /// Delete is idempotent (§5): a log that was never written is a no-op.
    pub async fn delete(&self, execution_id: &str) {
        self.backend.delete(execution_id).await;
    }
}

#[derive(Clone)]
pub struct PermissionsStore {
    backend: Arc<dyn Store>,
}

impl PermissionsStore {
    pub fn new(backend: Arc<dyn Store>) -> Self {
        Self { backend }
    }

    /// Effective level for `user` on `actor_db_id`: missing ⇒ `None`
    /// (§4.3 step 1).
    pub async fn level_for(&self, actor_db_id: &str, user: &str) -> PermissionLevel {
        let key = compound_key(actor_db_id, user);
        self.backend
            .get(&key)
            .await
            .ok()
            .and_then(|v| v.as_str().and_then(PermissionLevel::parse))
            .unwrap_or(PermissionLevel::None)
    }

    pub async fn grant(&self, actor_db_id: &str, user: &str, level: PermissionLevel) {
        let key = compound_key(actor_db_id, user);
        self.backend
            .set(&key, Value::String(level.to_string()))
            .await;
    }

    pub async fn list(&self, actor_db_id: &str) -> Vec<Permission> {
        self.backend
            .items()
            .await
            .into_iter()
            .filter_map(|(key, value)| {
                let user = prefix_match(&key, actor_db_id)?;
                let level = value.as_str().and_then(PermissionLevel::parse)?;
                Some(Permission {
                    user: user.to_string(),
                    level,
                })
            })
            .collect()
    }

    /// Delete every grant for `actor_db_id` (cascade, §5/§6 invariant).
    pub async fn delete_all_for_actor(&self, actor_db_id: &str) {
        let keys: Vec<String> = self
            .backend
            .items()
            .await
            .into_iter()
            .filter(|(key, _)| prefix_match(key, actor_db_id).is_some())
            .map(|(key, _)| key)
            .collect();
        for key in keys {
            self.backend.delete(&key).await;
        }
    }
}

#[derive(Clone)]
pub struct WorkersStore {
    backend: Arc<dyn Store>,
}

impl WorkersStore {
    pub fn new(backend: Arc<dyn Store>) -> Self {
        Self { backend }
    }

    pub async fn get(&self, actor_db_id: &str, worker_id: &str) -> Result<Worker, AppError> {
        let key = compound_key(actor_db_id, worker_id);
        Worker::from_db(&self.backend.get(&key).await?).map_err(|_| {
            AppError::Worker(format!("no worker found with id: {worker_id}"))
        })
    }

    /// Atomically reserve a new worker id for `actor`, inserting a
    /// `Requested` record (§4.5 step 1). Atomicity of the id reservation
    /// is free here because `WorkerId::new()` is a fresh UUID — no two
    /// callers can collide on the same key.
    pub async fn request_worker(&self, actor: &Actor) -> Worker {
        let worker = Worker::requested(&actor.db_id, &actor.tenant, &actor.image);
        let key = compound_key(&actor.db_id, &worker.id.to_string());
        self.backend.set(&key, worker.to_db()).await;
        worker
    }

    pub async fn for_actor(&self, actor_db_id: &str) -> Vec<Worker> {
        self.backend
            .items()
            .await
            .into_iter()
            .filter(|(key, _)| prefix_match(key, actor_db_id).is_some())
            .filter_map(|(_, record)| Worker::from_db(&record).ok())
            .collect()
    }

    pub async fn delete(&self, actor_db_id: &str, worker_id: &str) {
        let key = compound_key(actor_db_id, worker_id);
        self.backend.delete(&key).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    fn backend() -> Arc<dyn Store> {
        Arc::new(MemoryStore::new())
    }

    #[tokio::test]
    async fn actor_set_then_get_round_trips() {
        let store = ActorsStore::new(backend());
        let actor = Actor::from_create(
            crate::models::ActorRequest {
                name: Some("f".into()),
                image: Some("hello:1".into()),
                ..Default::default()
            },
            "T",
            "alice",
            "api",
        )
        .unwrap();
        store.set(&actor).await;
        let back = store.get(&actor.db_id).await.unwrap();
        assert_eq!(back.db_id, actor.db_id);
    }

    #[tokio::test]
    async fn executions_for_actor_only_returns_matching_prefix() {
        let store = ExecutionsStore::new(backend());
        let e1 = Execution::new_submitted("T_a", "u");
        let e2 = Execution::new_submitted("T_b", "u");
        store.set("T_a", &e1).await;
        store.set("T_b", &e2).await;
        let for_a = store.for_actor("T_a").await;
        assert_eq!(for_a.len(), 1);
        assert_eq!(for_a[0].id, e1.id);
    }

    #[tokio::test]
    async fn executions_delete_all_for_actor_leaves_others_untouched() {
        let store = ExecutionsStore::new(backend());
        let e1 = Execution::new_submitted("T_a", "u");
        let e2 = Execution::new_submitted("T_b", "u");
        store.set("T_a", &e1).await;
        store.set("T_b", &e2).await;
        store.delete_all_for_actor("T_a").await;
        assert!(store.for_actor("T_a").await.is_empty());
        assert_eq!(store.for_actor("T_b").await.len(), 1);
    }

    #[tokio::test]
    async fn permissions_default_to_none() {
        let store = PermissionsStore::new(backend());
        assert_eq!(store.level_for("T_a", "alice").await, PermissionLevel::None);
    }

    #[tokio::test]
    async fn permissions_grant_and_list() {
        let store = PermissionsStore::new(backend());
        store.grant("T_a", "alice", PermissionLevel::Update).await;
        store.grant("T_a", "bob", PermissionLevel::Read).await;
        assert_eq!(store.level_for("T_a", "alice").await, PermissionLevel::Update);
        let mut list = store.list("T_a").await;
        list.sort_by(|a, b| a.user.cmp(&b.user));
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].user, "alice");
    }

    #[tokio::test]
    async fn permissions_delete_all_for_actor_leaves_others_untouched() {
        let store = PermissionsStore::new(backend());
        store.grant("T_a", "alice", PermissionLevel::Update).await;
        store.grant("T_b", "alice", PermissionLevel::Update).await;
        store.delete_all_for_actor("T_a").await;
        assert_eq!(store.level_for("T_a", "alice").await, PermissionLevel::None);
        assert_eq!(store.level_for("T_b", "alice").await, PermissionLevel::Update);
    }

    #[tokio::test]
    async fn workers_request_worker_inserts_requested_record() {
        let store = WorkersStore::new(backend());
        let actor = Actor::from_create(
            crate::models::ActorRequest {
                name: Some("f".into()),
                image: Some("hello:1".into()),
                ..Default::default()
            },
            "T",
            "alice",
            "api",
        )
        .unwrap();
        let worker = store.request_worker(&actor).await;
        let fetched = store.get(&actor.db_id, &worker.id.to_string()).await.unwrap();
        assert_eq!(fetched.status, crate::models::WorkerStatus::Requested);
    }

    #[tokio::test]
    async fn logs_delete_is_idempotent() {
        let store = LogsStore::new(backend());
        store.delete("nope").await;
        store.set("e1", "log text").await;
        assert_eq!(store.get("e1").await.unwrap(), "log text");
        store.delete("e1").await;
        assert!(store.get("e1").await.is_err());
    }
}
