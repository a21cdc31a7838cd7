//! Entity models: invariants, DB (de)serialization, and the public
//! `display()` projection. See SPEC_FULL.md §3 and §4.4.

mod actor;
mod camel;
mod execution;
mod permission;
mod worker;

pub use actor::{Actor, ActorRequest, ActorStatus};
pub use camel::{dict_to_camel, dict_to_snake};
pub use execution::{Execution, ExecutionStatus, ExecutionUpdateRequest, ExecutionsSummary};
pub use permission::{Permission, PermissionLevel, WORLD};
pub use worker::{Worker, WorkerStatus};
