// Layer 1: Standard library imports
use std::collections::HashMap;

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// Layer 3: Internal module imports
use crate::error::{AppError, ValidationError};
use crate::util::{db_id, ActorId};

/// Declared intent for a container-based handler. See SPEC_FULL.md §3.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActorStatus {
    Submitted,
    Ready,
    Error,
}

impl ActorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submitted => "SUBMITTED",
            Self::Ready => "READY",
            Self::Error => "ERROR",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    /// Globally unique store key, `tenant ⊕ id`. Immutable once set.
    pub db_id: String,
    pub tenant: String,
    pub id: ActorId,
    pub name: String,
    pub image: String,
    pub owner: String,
    pub api_server: String,
    pub stateless: bool,
    #[serde(default)]
    pub default_environment: HashMap<String, String>,
    pub status: ActorStatus,
    #[serde(default)]
    pub state: Value,
    pub create_time: DateTime<Utc>,
}

/// Fields a caller may supply on POST/PUT; validated before an [`Actor`]
/// is constructed. `name` is required on create and dropped on update
/// (§4.4 — the validator "removes `name`" for PUT).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActorRequest {
    pub name: Option<String>,
    pub image: Option<String>,
    #[serde(default)]
    pub stateless: Option<bool>,
    #[serde(default)]
    pub default_environment: Option<HashMap<String, String>>,
}

impl Actor {
    /// Pure function: the only sanctioned way to derive a store key.
    pub fn get_dbid(tenant: &str, id: &ActorId) -> String {
        db_id(tenant, id)
    }

    /// Construct a brand new actor from a validated create request.
    pub fn from_create(
        req: ActorRequest,
        tenant: &str,
        owner: &str,
        api_server: &str,
    ) -> Result<Self, AppError> {
        let name = req
            .name
            .filter(|n| !n.is_empty())
            .ok_or_else(|| ValidationError::MissingField("name".into()))?;
        let image = req
            .image
            .filter(|i| !i.is_empty())
            .ok_or_else(|| ValidationError::MissingField("image".into()))?;
        let id = ActorId::new();
        Ok(Self {
            db_id: Self::get_dbid(tenant, &id),
            tenant: tenant.to_string(),
            id,
            name,
            image,
            owner: owner.to_string(),
            api_server: api_server.to_string(),
            stateless: req.stateless.unwrap_or(false),
            default_environment: req.default_environment.unwrap_or_default(),
            status: ActorStatus::Submitted,
            state: Value::Object(Default::default()),
            create_time: Utc::now(),
        })
    }

    /// Overlay a validated update request onto `self`, preserving identity
    /// fields (`db_id`, `id`, `tenant`, `create_time`, `stateless`, `name`).
    /// Returns whether the image changed, since that drives the worker
    /// rollout (§4.5) independent of the new `Actor` value itself.
    pub fn apply_update(&self, req: ActorRequest) -> Result<(Self, bool), AppError> {
        let new_image = req
            .image
            .filter(|i| !i.is_empty())
            .ok_or_else(|| ValidationError::MissingField("image".into()))?;
        let image_changed = new_image != self.image;
        let mut updated = self.clone();
        updated.image = new_image;
        if let Some(env) = req.default_environment {
            updated.default_environment = env;
        }
        updated.status = if image_changed {
            ActorStatus::Submitted
        } else {
            self.status.clone()
        };
        Ok((updated, image_changed))
    }

    /// Lossless serialization into the store's record representation.
    pub fn to_db(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Inverse of [`Actor::to_db`].
    pub fn from_db(record: &Value) -> Result<Self, AppError> {
        serde_json::from_value(record.clone())
            .map_err(|e| AppError::Internal(format!("corrupt actor record: {e}")))
    }

    /// Public projection: internal fields (`db_id`) are dropped, the
    /// remaining shape is what callers see in responses. Keys are
    /// snake_case; camelCase rewriting happens once, at the envelope
    /// boundary (§4.7, §9), never here.
    pub fn display(&self) -> Value {
        serde_json::json!({
            "id": self.id.to_string(),
            "name": self.name,
            "image": self.image,
            "owner": self.owner,
            "stateless": self.stateless,
            "default_environment": self.default_environment,
            "status": self.status.as_str(),
            "create_time": self.create_time.to_rfc3339(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(name: &str, image: &str) -> ActorRequest {
        ActorRequest {
            name: Some(name.into()),
            image: Some(image.into()),
            ..Default::default()
        }
    }

    #[test]
    fn create_requires_name_and_image() {
        let missing_name = ActorRequest {
            image: Some("x:1".into()),
            ..Default::default()
        };
        assert!(Actor::from_create(missing_name, "t", "u", "api").is_err());
    }

    #[test]
    fn get_dbid_matches_constructed_actor() {
        let a = Actor::from_create(req("f", "hello:1"), "T", "alice", "api").unwrap();
        assert_eq!(Actor::get_dbid(&a.tenant, &a.id), a.db_id);
    }

    #[test]
    fn db_round_trip_is_lossless() {
        let a = Actor::from_create(req("f", "hello:1"), "T", "alice", "api").unwrap();
        let back = Actor::from_db(&a.to_db()).unwrap();
        assert_eq!(a.db_id, back.db_id);
        assert_eq!(a.image, back.image);
        assert_eq!(a.status, back.status);
    }

    #[test]
    fn update_without_image_change_preserves_status() {
        let mut a = Actor::from_create(req("f", "hello:1"), "T", "alice", "api").unwrap();
        a.status = ActorStatus::Ready;
        let (updated, changed) = a.apply_update(ActorRequest {
            image: Some("hello:1".into()),
            ..Default::default()
        }).unwrap();
        assert!(!changed);
        assert_eq!(updated.status, ActorStatus::Ready);
    }

    #[test]
    fn update_with_image_change_resets_to_submitted() {
        let mut a = Actor::from_create(req("f", "hello:1"), "T", "alice", "api").unwrap();
        a.status = ActorStatus::Ready;
        let (updated, changed) = a.apply_update(ActorRequest {
            image: Some("hello:2".into()),
            ..Default::default()
        }).unwrap();
        assert!(changed);
        assert_eq!(updated.status, ActorStatus::Submitted);
        assert_eq!(updated.image, "hello:2");
    }

    #[test]
    fn update_preserves_identity_fields() {
        let a = Actor::from_create(req("f", "hello:1"), "T", "alice", "api").unwrap();
        let (updated, _) = a.apply_update(ActorRequest {
            image: Some("hello:2".into()),
            ..Default::default()
        }).unwrap();
        assert_eq!(updated.db_id, a.db_id);
        assert_eq!(updated.id, a.id);
        assert_eq!(updated.name, a.name);
        assert_eq!(updated.stateless, a.stateless);
    }

    #[test]
    fn display_drops_db_id() {
        let a = Actor::from_create(req("f", "hello:1"), "T", "alice", "api").unwrap();
        let d = a.display();
        assert!(d.get("db_id").is_none());
        assert_eq!(d["status"], "SUBMITTED");
    }
}
