// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// Layer 3: Internal module imports
use crate::error::AppError;
use crate::util::ExecutionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExecutionStatus {
    Submitted,
    Running,
    Complete,
    Failed,
}

impl ExecutionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submitted => "SUBMITTED",
            Self::Running => "RUNNING",
            Self::Complete => "COMPLETE",
            Self::Failed => "FAILED",
        }
    }
}

/// One invocation of an actor, created in `Submitted` by C6 on message
/// POST or by the worker on pickup, and updated by the worker as it runs.
/// Never deleted except via the actor deletion cascade, which purges
/// every execution (and its logs) belonging to that actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Execution {
    pub id: ExecutionId,
    pub actor_id: String,
    pub executor: String,
    pub status: ExecutionStatus,
    pub runtime_ms: u64,
    pub cpu: u64,
    pub io: u64,
    pub message_id: Option<String>,
    pub start_time: DateTime<Utc>,
    pub finish_time: Option<DateTime<Utc>>,
}

impl Execution {
    /// Create a fresh, just-submitted execution for `actor_id`. Created
    /// before the message is enqueued so its id is available for
    /// correlation (§4.6 step 4).
    pub fn new_submitted(actor_id: &str, executor: &str) -> Self {
        Self {
            id: ExecutionId::new(),
            actor_id: actor_id.to_string(),
            executor: executor.to_string(),
            status: ExecutionStatus::Submitted,
            runtime_ms: 0,
            cpu: 0,
            io: 0,
            message_id: None,
            start_time: Utc::now(),
            finish_time: None,
        }
    }

    pub fn to_db(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    pub fn from_db(record: &Value) -> Result<Self, AppError> {
        serde_json::from_value(record.clone())
            .map_err(|e| AppError::Internal(format!("corrupt execution record: {e}")))
    }

    pub fn display(&self) -> Value {
        serde_json::json!({
            "id": self.id.to_string(),
            "actor_id": self.actor_id,
            "executor": self.executor,
            "status": self.status.as_str(),
            "runtime_ms": self.runtime_ms,
            "cpu": self.cpu,
            "io": self.io,
            "message_id": self.message_id,
            "start_time": self.start_time.to_rfc3339(),
            "finish_time": self.finish_time.map(|t| t.to_rfc3339()),
        })
    }
}

/// Fields a worker may report back for an execution it is running or has
/// finished (§6 `POST /actors/{id}/executions`, an internal endpoint not
/// exposed to end users). `execution_id` selects the record; every other
/// field is optional so a worker can send partial progress updates.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExecutionUpdateRequest {
    pub execution_id: String,
    pub status: Option<ExecutionStatus>,
    pub runtime_ms: Option<u64>,
    pub cpu: Option<u64>,
    pub io: Option<u64>,
}

impl Execution {
    /// Apply a worker-reported update in place. `finish_time` is stamped
    /// exactly once, the first time `status` lands on `Complete`/`Failed`.
    pub fn apply_update(&mut self, req: &ExecutionUpdateRequest) {
        if let Some(status) = req.status {
            self.status = status;
            if matches!(status, ExecutionStatus::Complete | ExecutionStatus::Failed)
                && self.finish_time.is_none()
            {
                self.finish_time = Some(Utc::now());
            }
        }
        if let Some(runtime_ms) = req.runtime_ms {
            self.runtime_ms = runtime_ms;
        }
        if let Some(cpu) = req.cpu {
            self.cpu = cpu;
        }
        if let Some(io) = req.io {
            self.io = io;
        }
    }
}

/// Derived, read-only projection over all executions of one actor.
/// Computed on demand, never persisted (§3).
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExecutionsSummary {
    pub submitted: u64,
    pub running: u64,
    pub complete: u64,
    pub failed: u64,
    pub total_runtime_ms: u64,
    pub total_cpu: u64,
    pub total_io: u64,
}

impl ExecutionsSummary {
    pub fn compute<'a>(executions: impl Iterator<Item = &'a Execution>) -> Self {
        let mut summary = Self::default();
        for e in executions {
            match e.status {
                ExecutionStatus::Submitted => summary.submitted += 1,
                ExecutionStatus::Running => summary.running += 1,
                ExecutionStatus::Complete => summary.complete += 1,
                ExecutionStatus::Failed => summary.failed += 1,
            }
            summary.total_runtime_ms += e.runtime_ms;
            summary.total_cpu += e.cpu;
            summary.total_io += e.io;
        }
        summary
    }

    pub fn display(&self) -> Value {
        serde_json::json!({
            "submitted": self.submitted,
            "running": self.running,
            "complete": self.complete,
            "failed": self.failed,
            "total_runtime_ms": self.total_runtime_ms,
            "total_cpu": self.total_cpu,
            "total_io": self.total_io,
        })
    }
}
