//! Shift entity type - a driver's working window

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::EntityId;
use crate::core::kind::EntityKind;

/// Lifecycle state of a shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShiftStatus {
    #[default]
    Scheduled,
    Active,
    Completed,
}

impl std::fmt::Display for ShiftStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShiftStatus::Scheduled => write!(f, "SCHEDULED"),
            ShiftStatus::Active => write!(f, "ACTIVE"),
            ShiftStatus::Completed => write!(f, "COMPLETED"),
        }
    }
}

impl std::str::FromStr for ShiftStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SCHEDULED" => Ok(ShiftStatus::Scheduled),
            "ACTIVE" => Ok(ShiftStatus::Active),
            "COMPLETED" => Ok(ShiftStatus::Completed),
            _ => Err(format!("Unknown shift status: {}", s)),
        }
    }
}

/// A driver's working window
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    /// Unique identifier
    pub id: EntityId,

    /// Driver working the shift
    pub driver_id: EntityId,

    /// Shift start
    pub starts_at: DateTime<Utc>,

    /// Shift end
    pub ends_at: DateTime<Utc>,

    /// Lifecycle state
    #[serde(default)]
    pub status: ShiftStatus,
}

/// Create payload for a shift
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftDraft {
    pub driver_id: EntityId,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

/// Partial update payload for a shift
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<EntityId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ShiftStatus>,
}

impl Entity for Shift {
    const KIND: EntityKind = EntityKind::Shift;
    type Draft = ShiftDraft;
    type Patch = ShiftPatch;

    fn id(&self) -> &EntityId {
        &self.id
    }
}
