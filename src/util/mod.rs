//! Shared identifiers and small pure helpers used across the control plane.

mod ids;

pub use ids::{db_id, ActorId, ExecutionId, WorkerId};
