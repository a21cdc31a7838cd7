//! Abaco control plane: the HTTP-facing coordinator for a multi-tenant
//! actor/FaaS platform. Owns actor, execution, worker and permission
//! records and the message/command channels that connect them to the
//! (external) worker supervisor; never runs user code itself.

pub mod auth;
pub mod channel;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod store;
pub mod util;
pub mod worker;

/// Echoed into every response envelope (§6, §7).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
