//! Typed, named, durable FIFO queues (§4.2): the per-actor inbox, the
//! singleton command channel, and per-worker shutdown channels.

mod backend;
mod channels;
mod types;

pub use backend::{ChannelBackend, InMemoryChannelBackend};
pub use channels::{ActorMsgChannel, CommandChannel, WorkerChannel};
pub use types::{MessagePayload, QueuedMessage, WorkerCommand, WorkerSignal};
