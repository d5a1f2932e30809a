//! Notification entity type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::EntityId;
use crate::core::kind::EntityKind;

/// An operator-facing notification
///
/// The `kind` field is an opaque backend-defined string ("DELAY", "SOS", new
/// kinds appear without a console release), so it is deliberately not an enum.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Unique identifier
    pub id: EntityId,

    /// Backend-defined notification category
    #[serde(rename = "type")]
    pub kind: String,

    /// Human-readable body
    #[serde(default)]
    pub message: String,

    /// Whether an operator has acknowledged it
    #[serde(default)]
    pub read: bool,

    /// When the event happened
    pub timestamp: DateTime<Utc>,
}

/// Create payload for a notification
///
/// Notifications are normally minted server-side; the draft exists for
/// console-originated announcements.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDraft {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}

/// Partial update payload for a notification
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read: Option<bool>,
}

impl Entity for Notification {
    const KIND: EntityKind = EntityKind::Notification;
    type Draft = NotificationDraft;
    type Patch = NotificationPatch;

    fn id(&self) -> &EntityId {
        &self.id
    }
}
