// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use serde_json::Value;

// Layer 3: Internal module imports
use crate::error::AppError;

/// A tenant-scoped `key -> record` KV view, where a record is a
/// string-keyed JSON object (§4.1). Modeled as an interface object rather
/// than a dict-like singleton (§9 Design Notes) so the exact same handler
/// code runs against the in-memory backend in tests and a distributed KV
/// in production.
///
/// Implementations must provide per-key atomic `update`, linearizable
/// with respect to concurrent `update`/`set` on the same key; cross-key
/// transactions are never required by this contract.
#[async_trait]
pub trait Store: Send + Sync {
    /// Fetch the record at `key`. `Err(AppError::NotFound)` if absent.
    async fn get(&self, key: &str) -> Result<Value, AppError>;

    /// Replace the whole record at `key`.
    async fn set(&self, key: &str, record: Value);

    /// Atomically set a single field of the record at `key`.
    /// `Err(AppError::NotFound)` if the record does not exist.
    async fn update(&self, key: &str, field: &str, value: Value) -> Result<(), AppError>;

    /// Remove `key`. Idempotent: missing keys are silently ignored, so
    /// retrying a partially-applied delete (§5) never errors.
    async fn delete(&self, key: &str);

    /// Enumerate all `(key, record)` pairs. No ordering guarantee;
    /// snapshot-consistent per key but not globally (§4.1).
    async fn items(&self) -> Vec<(String, Value)>;
}
