//! Typed channel handles built on top of [`super::backend::ChannelBackend`]:
//! the per-actor inbox, the singleton command channel, and per-worker
//! shutdown channels (§4.2).

// Layer 1: Standard library imports
use std::collections::BTreeMap;
use std::sync::Arc;

// Layer 2: Third-party crate imports
use serde_json::Value;

// Layer 3: Internal module imports
use super::backend::ChannelBackend;
use super::types::{MessagePayload, QueuedMessage, WorkerCommand, WorkerSignal};

/// Per-actor inbox for user messages. Producers: message-POST handlers.
/// Consumers: that actor's workers (external).
#[derive(Clone)]
pub struct ActorMsgChannel {
    backend: Arc<dyn ChannelBackend<QueuedMessage>>,
    actor_db_id: String,
}

impl ActorMsgChannel {
    pub fn new(backend: Arc<dyn ChannelBackend<QueuedMessage>>, actor_db_id: impl Into<String>) -> Self {
        Self {
            backend,
            actor_db_id: actor_db_id.into(),
        }
    }

    pub async fn put_msg(&self, payload: MessagePayload, metadata: BTreeMap<String, Value>) {
        self.backend
            .publish(&self.actor_db_id, QueuedMessage { payload, metadata })
            .await;
    }

    /// Approximate queue depth (§9 Open Question 4: a public contract,
    /// not a private-field reach-around).
    pub async fn approx_len(&self) -> usize {
        self.backend.approx_len(&self.actor_db_id).await
    }

    #[cfg(any(test, feature = "test-support"))]
    pub async fn try_recv(&self) -> Option<QueuedMessage> {
        self.backend.try_recv(&self.actor_db_id).await
    }
}

const COMMAND_CHANNEL_NAME: &str = "__command__";

/// Singleton queue consumed by the worker supervisor, carrying
/// desired-state commands (§4.2, §4.5).
#[derive(Clone)]
pub struct CommandChannel {
    backend: Arc<dyn ChannelBackend<WorkerCommand>>,
}

impl CommandChannel {
    pub fn new(backend: Arc<dyn ChannelBackend<WorkerCommand>>) -> Self {
        Self { backend }
    }

    pub async fn put_cmd(&self, command: WorkerCommand) {
        self.backend.publish(COMMAND_CHANNEL_NAME, command).await;
    }

    #[cfg(any(test, feature = "test-support"))]
    pub async fn try_recv(&self) -> Option<WorkerCommand> {
        self.backend.try_recv(COMMAND_CHANNEL_NAME).await
    }

    #[cfg(any(test, feature = "test-support"))]
    pub async fn approx_len(&self) -> usize {
        self.backend.approx_len(COMMAND_CHANNEL_NAME).await
    }
}

/// Per-worker control channel; used to deliver `shutdown` to one specific
/// worker (§4.2, §4.5).
#[derive(Clone)]
pub struct WorkerChannel {
    backend: Arc<dyn ChannelBackend<WorkerSignal>>,
    ch_name: String,
}

impl WorkerChannel {
    pub fn new(backend: Arc<dyn ChannelBackend<WorkerSignal>>, ch_name: impl Into<String>) -> Self {
        Self {
            backend,
            ch_name: ch_name.into(),
        }
    }

    pub async fn shutdown(&self) {
        self.backend.publish(&self.ch_name, WorkerSignal::Shutdown).await;
    }

    #[cfg(any(test, feature = "test-support"))]
    pub async fn try_recv(&self) -> Option<WorkerSignal> {
        self.backend.try_recv(&self.ch_name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::backend::InMemoryChannelBackend;
    use serde_json::json;

    #[tokio::test]
    async fn actor_msg_channel_put_then_recv() {
        let backend = Arc::new(InMemoryChannelBackend::new());
        let ch = ActorMsgChannel::new(backend, "T_abc");
        let mut meta = BTreeMap::new();
        meta.insert("_abaco_execution_id".to_string(), json!("e1"));
        ch.put_msg(MessagePayload::Text("hi".into()), meta.clone()).await;
        assert_eq!(ch.approx_len().await, 1);
        let msg = ch.try_recv().await.unwrap();
        assert_eq!(msg.payload, MessagePayload::Text("hi".into()));
        assert_eq!(msg.metadata, meta);
    }

    #[tokio::test]
    async fn distinct_actors_have_independent_channels() {
        let backend = Arc::new(InMemoryChannelBackend::new());
        let a = ActorMsgChannel::new(backend.clone(), "T_a");
        let b = ActorMsgChannel::new(backend, "T_b");
        a.put_msg(MessagePayload::Text("x".into()), BTreeMap::new()).await;
        assert_eq!(b.approx_len().await, 0);
    }

    #[tokio::test]
    async fn command_channel_carries_desired_state() {
        let backend = Arc::new(InMemoryChannelBackend::new());
        let ch = CommandChannel::new(backend);
        ch.put_cmd(WorkerCommand {
            actor_id: "T_a".into(),
            worker_ids: vec!["w1".into()],
            image: "hello:1".into(),
            tenant: "T".into(),
            num: 1,
            stop_existing: false,
        })
        .await;
        assert_eq!(ch.approx_len().await, 1);
        let cmd = ch.try_recv().await.unwrap();
        assert_eq!(cmd.worker_ids, vec!["w1".to_string()]);
    }

    #[tokio::test]
    async fn worker_channel_delivers_shutdown() {
        let backend = Arc::new(InMemoryChannelBackend::new());
        let ch = WorkerChannel::new(backend, "worker-ch-1");
        ch.shutdown().await;
        assert_eq!(ch.try_recv().await, Some(WorkerSignal::Shutdown));
    }
}
