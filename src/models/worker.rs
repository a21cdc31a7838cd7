// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// Layer 3: Internal module imports
use crate::error::AppError;
use crate::util::WorkerId;

/// Lifecycle status of one worker container instance.
///
/// The control plane only ever writes [`WorkerStatus::Requested`] — every
/// other transition is driven by the external worker supervisor (§4.5).
/// Invariant: a worker in `ShutdownRequested` may not transition back to
/// `Ready`; that is enforced by the supervisor, not this type, since this
/// control plane never reads worker status back into `Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkerStatus {
    Requested,
    Spawning,
    Ready,
    Busy,
    Finishing,
    ShutdownRequested,
    Error,
}

impl WorkerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Requested => "REQUESTED",
            Self::Spawning => "SPAWNING",
            Self::Ready => "READY",
            Self::Busy => "BUSY",
            Self::Finishing => "FINISHING",
            Self::ShutdownRequested => "SHUTDOWN_REQUESTED",
            Self::Error => "ERROR",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worker {
    pub id: WorkerId,
    pub actor_id: String,
    /// The private channel name this worker listens for `shutdown` on.
    pub ch_name: String,
    pub status: WorkerStatus,
    pub tenant: String,
    pub image: String,
    pub host: Option<String>,
    pub last_health_check_time: Option<DateTime<Utc>>,
}

impl Worker {
    /// Construct a newly-`Requested` worker record for `actor_id`. Callers
    /// are responsible for inserting it atomically into the worker store
    /// (`Worker::request_worker` in §4.5) — this is the pure constructor.
    pub fn requested(actor_id: &str, tenant: &str, image: &str) -> Self {
        let id = WorkerId::new();
        Self {
            ch_name: format!("worker-ch-{id}"),
            id,
            actor_id: actor_id.to_string(),
            status: WorkerStatus::Requested,
            tenant: tenant.to_string(),
            image: image.to_string(),
            host: None,
            last_health_check_time: None,
        }
    }

    pub fn to_db(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    pub fn from_db(record: &Value) -> Result<Self, AppError> {
        serde_json::from_value(record.clone())
            .map_err(|e| AppError::Internal(format!("corrupt worker record: {e}")))
    }

    pub fn display(&self) -> Value {
        serde_json::json!({
            "id": self.id.to_string(),
            "status": self.status.as_str(),
            "image": self.image,
            "host": self.host,
            "last_health_check_time": self.last_health_check_time.map(|t| t.to_rfc3339()),
        })
    }
}
