//! Assignment entity type - a driver planned onto a route for a date

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::EntityId;
use crate::core::kind::EntityKind;

/// Planning state of an assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssignmentStatus {
    #[default]
    Planned,
    Confirmed,
    Cancelled,
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignmentStatus::Planned => write!(f, "PLANNED"),
            AssignmentStatus::Confirmed => write!(f, "CONFIRMED"),
            AssignmentStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

impl std::str::FromStr for AssignmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PLANNED" => Ok(AssignmentStatus::Planned),
            "CONFIRMED" => Ok(AssignmentStatus::Confirmed),
            "CANCELLED" => Ok(AssignmentStatus::Cancelled),
            _ => Err(format!("Unknown assignment status: {}", s)),
        }
    }
}

/// A scheduling record binding a driver to a route on a date
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    /// Unique identifier
    pub id: EntityId,

    /// Driver being scheduled
    pub driver_id: EntityId,

    /// Route they are scheduled onto
    pub route_id: EntityId,

    /// Service date
    pub date: NaiveDate,

    /// Planning state
    #[serde(default)]
    pub status: AssignmentStatus,
}

/// Create payload for an assignment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentDraft {
    pub driver_id: EntityId,
    pub route_id: EntityId,
    pub date: NaiveDate,
}

/// Partial update payload for an assignment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<EntityId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_id: Option<EntityId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AssignmentStatus>,
}

impl Entity for Assignment {
    const KIND: EntityKind = EntityKind::Assignment;
    type Draft = AssignmentDraft;
    type Patch = AssignmentPatch;

    fn id(&self) -> &EntityId {
        &self.id
    }
}
