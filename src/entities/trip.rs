//! Trip entity type - one execution of a route

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::EntityId;
use crate::core::kind::EntityKind;

/// Lifecycle state of a trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TripStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl std::fmt::Display for TripStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TripStatus::Scheduled => write!(f, "SCHEDULED"),
            TripStatus::InProgress => write!(f, "IN_PROGRESS"),
            TripStatus::Completed => write!(f, "COMPLETED"),
            TripStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

impl std::str::FromStr for TripStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SCHEDULED" => Ok(TripStatus::Scheduled),
            "IN_PROGRESS" => Ok(TripStatus::InProgress),
            "COMPLETED" => Ok(TripStatus::Completed),
            "CANCELLED" => Ok(TripStatus::Cancelled),
            _ => Err(format!("Unknown trip status: {}", s)),
        }
    }
}

/// One scheduled or running execution of a route
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    /// Unique identifier
    pub id: EntityId,

    /// Route this trip runs
    pub route_id: EntityId,

    /// Driver actually running it (may differ from the route's default)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<EntityId>,

    /// Lifecycle state
    #[serde(default)]
    pub status: TripStatus,

    /// Planned departure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_start: Option<DateTime<Utc>>,

    /// When the driver actually started
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    /// When the last stop was served
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Create payload for a trip
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDraft {
    pub route_id: EntityId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<EntityId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_start: Option<DateTime<Utc>>,
}

/// Partial update payload for a trip
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<EntityId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TripStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_start: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Entity for Trip {
    const KIND: EntityKind = EntityKind::Trip;
    type Draft = TripDraft;
    type Patch = TripPatch;

    fn id(&self) -> &EntityId {
        &self.id
    }
}
