// Layer 1: Standard library imports
use std::collections::BTreeMap;

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};
use serde_json::Value;

// Layer 3: Internal module imports
// (none)

/// Sum type for the dynamically-typed message body accepted by
/// `POST /actors/{id}/messages` (§9 Design Notes: messages are arbitrary
/// bytes or arbitrary JSON).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "value")]
pub enum MessagePayload {
    Text(String),
    Json(Value),
    Bytes(Vec<u8>),
}

impl MessagePayload {
    /// The `_abaco_Content-Type` tag value for this payload (§4.6 step 2).
    pub fn content_type_tag(&self) -> &'static str {
        match self {
            Self::Json(_) => "application/json",
            Self::Text(_) | Self::Bytes(_) => "str",
        }
    }
}

/// One queued user message plus the metadata map assembled in §4.6 step 3.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueuedMessage {
    pub payload: MessagePayload,
    pub metadata: BTreeMap<String, Value>,
}

/// Desired-state command published to the singleton [`CommandChannel`]
/// (§4.2, §4.5). Carries no `status` field: the control plane never
/// blocks on worker readiness, it only publishes intent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkerCommand {
    pub actor_id: String,
    pub worker_ids: Vec<String>,
    pub image: String,
    pub tenant: String,
    pub num: usize,
    pub stop_existing: bool,
}

/// The only signal ever delivered on a per-worker [`WorkerChannel`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum WorkerSignal {
    Shutdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_payload_tags_as_json() {
        assert_eq!(
            MessagePayload::Json(Value::Null).content_type_tag(),
            "application/json"
        );
    }

    #[test]
    fn text_and_bytes_payload_tag_as_str() {
        assert_eq!(MessagePayload::Text("hi".into()).content_type_tag(), "str");
        assert_eq!(MessagePayload::Bytes(vec![1, 2]).content_type_tag(), "str");
    }
}
