//! Generic FIFO channel backend. A channel is a typed, named queue with
//! at-least-once delivery and one or more consumers (§4.2). The in-memory
//! implementation here is the default backend; production deployments
//! swap it for a durable queue without touching any call site, the same
//! "interface object" separation `store::Store` draws for persistence.

// Layer 1: Standard library imports
use std::collections::VecDeque;
use std::sync::Arc;

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;

// Layer 3: Internal module imports
// (none)

#[async_trait]
pub trait ChannelBackend<T: Send + Sync + Clone + 'static>: Send + Sync {
    /// Enqueue `item` onto `channel`, creating it if this is the first
    /// publish. Channels must survive process restart of producers and
    /// consumers (§4.2) — the durable backend satisfies this by
    /// construction; the in-memory one only within one process lifetime.
    async fn publish(&self, channel: &str, item: T);

    /// Pop the oldest item off `channel`, if any.
    async fn try_recv(&self, channel: &str) -> Option<T>;

    /// Approximate length, used only by the messages-count endpoint
    /// (§4.2, §9 Open Question 4).
    async fn approx_len(&self, channel: &str) -> usize;
}

#[derive(Clone)]
pub struct InMemoryChannelBackend<T> {
    queues: Arc<DashMap<String, Mutex<VecDeque<T>>>>,
}

impl<T> Default for InMemoryChannelBackend<T> {
    fn default() -> Self {
        Self {
            queues: Arc::new(DashMap::new()),
        }
    }
}

impl<T> InMemoryChannelBackend<T> {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl<T: Send + Sync + Clone + 'static> ChannelBackend<T> for InMemoryChannelBackend<T> {
    async fn publish(&self, channel: &str, item: T) {
        self.queues
            .entry(channel.to_string())
            .or_insert_with(|| Mutex::new(VecDeque::new()))
            .lock()
            .push_back(item);
    }

    async fn try_recv(&self, channel: &str) -> Option<T> {
        self.queues.get(channel)?.lock().pop_front()
    }

    async fn approx_len(&self, channel: &str) -> usize {
        self.queues.get(channel).map(|q| q.lock().len()).unwrap_or(0)
    }
}
