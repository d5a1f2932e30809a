//! Object-safe backend trait
//!
//! JSON values at the seam keeps the trait object-safe: typed encode/decode
//! happens in the orchestrator and gateway, which know the concrete entity
//! type, while dependency order and coalescing only need the kind.

use async_trait::async_trait;
use serde_json::Value;

use crate::api::ApiError;
use crate::core::kind::EntityKind;

/// The per-entity REST surface the core requires of any backend
///
/// One logical resource group per entity kind; the two path conventions the
/// backend speaks are an implementation detail of [`HttpBackend`](crate::api::HttpBackend).
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// Fetch the full collection snapshot for a kind
    async fn list(&self, kind: EntityKind) -> Result<Vec<Value>, ApiError>;

    /// Fetch a single record by id
    async fn get_by_id(&self, kind: EntityKind, id: &str) -> Result<Value, ApiError>;

    /// Create a record; returns the canonical record with its assigned id
    async fn create(&self, kind: EntityKind, payload: Value) -> Result<Value, ApiError>;

    /// Patch a record; returns the canonical post-mutation record
    async fn update(&self, kind: EntityKind, id: &str, payload: Value) -> Result<Value, ApiError>;

    /// Delete a record
    async fn delete(&self, kind: EntityKind, id: &str) -> Result<(), ApiError>;

    /// Named action on one record (`generate-otp`, `disable`, `transfer`, ...)
    async fn record_action(
        &self,
        kind: EntityKind,
        id: &str,
        action: &str,
        payload: Value,
    ) -> Result<Value, ApiError>;

    /// Named action on a collection (`bulk-upload`)
    async fn collection_action(
        &self,
        kind: EntityKind,
        action: &str,
        payload: Value,
    ) -> Result<Value, ApiError>;
}
