//! Student entity type
//!
//! Students own the student↔route many-to-many edge: `assigned_routes` is the
//! single source of truth for route membership, and route rosters are always
//! derived by scanning students (a route never stores its own student list).

use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::EntityId;
use crate::core::kind::EntityKind;
use crate::entities::route::RouteType;

/// Boarding status of a student
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StudentStatus {
    /// Waiting to be picked up
    #[default]
    Waiting,
    /// On the bus
    OnBoard,
    /// Delivered for the day
    DroppedOff,
    /// Reported absent
    Absent,
    /// Soft-disabled by an operator; excluded from operational flows
    Disabled,
}

impl std::fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StudentStatus::Waiting => write!(f, "WAITING"),
            StudentStatus::OnBoard => write!(f, "ON_BOARD"),
            StudentStatus::DroppedOff => write!(f, "DROPPED_OFF"),
            StudentStatus::Absent => write!(f, "ABSENT"),
            StudentStatus::Disabled => write!(f, "DISABLED"),
        }
    }
}

impl std::str::FromStr for StudentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WAITING" => Ok(StudentStatus::Waiting),
            "ON_BOARD" => Ok(StudentStatus::OnBoard),
            "DROPPED_OFF" => Ok(StudentStatus::DroppedOff),
            "ABSENT" => Ok(StudentStatus::Absent),
            "DISABLED" => Ok(StudentStatus::Disabled),
            _ => Err(format!("Unknown student status: {}", s)),
        }
    }
}

/// A geocoded address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    /// Human-readable address line
    pub address: String,

    /// Latitude in decimal degrees
    pub lat: f64,

    /// Longitude in decimal degrees
    pub lng: f64,
}

/// Guardian contact details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GuardianContact {
    /// Guardian full name
    pub name: String,

    /// Guardian phone number
    pub phone: String,

    /// Guardian email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A transported student
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Unique identifier
    pub id: EntityId,

    /// Display name
    pub name: String,

    /// School display name (denormalized; scoping uses `Route.schoolId`)
    pub school: String,

    /// Grade label (e.g. "5th Grade")
    pub grade: String,

    /// Guardian contact
    pub guardian: GuardianContact,

    /// Boarding status
    #[serde(default)]
    pub status: StudentStatus,

    /// Morning pickup point
    pub pickup_location: GeoPoint,

    /// Afternoon dropoff point
    pub dropoff_location: GeoPoint,

    /// Routes this student rides, in assignment order (no duplicates)
    #[serde(default)]
    pub assigned_routes: Vec<EntityId>,
}

impl Student {
    /// Whether this student is assigned to the given route
    pub fn is_assigned_to(&self, route_id: &str) -> bool {
        self.assigned_routes.iter().any(|r| r == route_id)
    }

    /// Add the route if absent, remove it if present; returns true when added
    ///
    /// Keeps `assigned_routes` an ordered set: a route id never appears twice.
    pub fn toggle_assigned_route(&mut self, route_id: &str) -> bool {
        match self.assigned_routes.iter().position(|r| r == route_id) {
            Some(index) => {
                self.assigned_routes.remove(index);
                false
            }
            None => {
                self.assigned_routes.push(EntityId::from(route_id));
                true
            }
        }
    }

    /// The location used when the student is served in the given direction
    pub fn location_for(&self, direction: RouteType) -> &GeoPoint {
        match direction {
            RouteType::Pickup => &self.pickup_location,
            RouteType::Dropoff => &self.dropoff_location,
        }
    }
}

/// Create payload for a student
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDraft {
    pub name: String,
    pub school: String,
    pub grade: String,
    pub guardian: GuardianContact,
    pub pickup_location: GeoPoint,
    pub dropoff_location: GeoPoint,
}

/// Partial update payload for a student
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub guardian: Option<GuardianContact>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StudentStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_location: Option<GeoPoint>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropoff_location: Option<GeoPoint>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_routes: Option<Vec<EntityId>>,
}

/// Payload for moving a student to another school and/or grade
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentTransfer {
    /// New school display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,

    /// New grade label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
}

impl Entity for Student {
    const KIND: EntityKind = EntityKind::Student;
    type Draft = StudentDraft;
    type Patch = StudentPatch;

    fn id(&self) -> &EntityId {
        &self.id
    }
}
