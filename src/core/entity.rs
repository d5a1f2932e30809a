//! Entity trait - common interface for all synced record types

use serde::{de::DeserializeOwned, Serialize};

use crate::core::identity::EntityId;
use crate::core::kind::EntityKind;

/// Common trait for all Routeboard entities
///
/// A record is the canonical, backend-owned shape of an entity. Create and
/// update payloads are distinct types: a draft has no id (the backend assigns
/// one) and a patch carries only the fields being changed. Both serialize to
/// the wire format the backend expects.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The entity kind this record type belongs to
    const KIND: EntityKind;

    /// Create payload for this entity (no id; backend assigns one)
    type Draft: Serialize + Send + Sync;

    /// Partial update payload (unset fields are left untouched)
    type Patch: Serialize + Default + Send + Sync;

    /// Get the record's unique id
    fn id(&self) -> &EntityId;
}
