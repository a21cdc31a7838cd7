//! Shared, `Clone`-cheap application state injected into every axum
//! handler via `State<AppState>`. All fields are `Arc`-backed registries
//! or channel handles, so cloning `AppState` shares the same underlying
//! stores and queues rather than forking them.

// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::channel::{
    ActorMsgChannel, ChannelBackend, CommandChannel, InMemoryChannelBackend, QueuedMessage,
    WorkerChannel, WorkerSignal,
};
use crate::config::AppConfig;
use crate::store::{ActorsStore, ExecutionsStore, LogsStore, MemoryStore, PermissionsStore, Store, WorkersStore};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub actors: ActorsStore,
    pub executions: ExecutionsStore,
    pub logs: LogsStore,
    pub permissions: PermissionsStore,
    pub workers: WorkersStore,
    pub command_channel: CommandChannel,
    msg_backend: Arc<dyn ChannelBackend<QueuedMessage>>,
    worker_signal_backend: Arc<dyn ChannelBackend<WorkerSignal>>,
}

impl AppState {
    /// Wire up the control plane against the in-memory reference
    /// backends: four independent `MemoryStore`s (one per §4.1 store,
    /// since their key spaces must never collide) and two channel
    /// backends (messages, worker signals) plus the singleton command
    /// channel.
    pub fn new_in_memory(config: AppConfig) -> Self {
        let actors_backend: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let executions_backend: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let logs_backend: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let permissions_backend: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let workers_backend: Arc<dyn Store> = Arc::new(MemoryStore::new());

        Self {
            config,
            actors: ActorsStore::new(actors_backend),
            executions: ExecutionsStore::new(executions_backend),
            logs: LogsStore::new(logs_backend),
            permissions: PermissionsStore::new(permissions_backend),
            workers: WorkersStore::new(workers_backend),
            command_channel: CommandChannel::new(Arc::new(InMemoryChannelBackend::new())),
            msg_backend: Arc::new(InMemoryChannelBackend::new()),
            worker_signal_backend: Arc::new(InMemoryChannelBackend::new()),
        }
    }

    #[cfg(test)]
    pub fn in_memory_for_tests() -> Self {
        Self::new_in_memory(AppConfig::default())
    }

    pub fn actor_msg_channel(&self, actor_db_id: &str) -> ActorMsgChannel {
        ActorMsgChannel::new(self.msg_backend.clone(), actor_db_id)
    }

    pub fn worker_channel(&self, ch_name: &str) -> WorkerChannel {
        WorkerChannel::new(self.worker_signal_backend.clone(), ch_name)
    }
}
