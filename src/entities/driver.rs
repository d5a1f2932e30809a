//! Driver entity type, with the ephemeral one-time-code and QR payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::EntityId;
use crate::core::kind::EntityKind;

/// Duty status of a driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DriverStatus {
    /// Can be assigned to a route
    Available,
    /// Currently running a trip
    OnTrip,
    /// Off shift
    OffDuty,
    /// Account created but not yet activated (no app sign-in yet)
    #[default]
    Pending,
}

impl std::fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DriverStatus::Available => write!(f, "AVAILABLE"),
            DriverStatus::OnTrip => write!(f, "ON_TRIP"),
            DriverStatus::OffDuty => write!(f, "OFF_DUTY"),
            DriverStatus::Pending => write!(f, "PENDING"),
        }
    }
}

impl std::str::FromStr for DriverStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AVAILABLE" => Ok(DriverStatus::Available),
            "ON_TRIP" => Ok(DriverStatus::OnTrip),
            "OFF_DUTY" => Ok(DriverStatus::OffDuty),
            "PENDING" => Ok(DriverStatus::Pending),
            _ => Err(format!("Unknown driver status: {}", s)),
        }
    }
}

/// A bus driver
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    /// Unique identifier
    pub id: EntityId,

    /// Display name
    pub name: String,

    /// Vehicle description (make/model shown alongside the plate)
    pub vehicle: String,

    /// Contact phone number
    pub phone: String,

    /// Driver's license number
    pub license: String,

    /// Duty status
    #[serde(default)]
    pub status: DriverStatus,

    /// Avatar image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    /// Free-form dispatcher notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Create payload for a driver
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverDraft {
    pub name: String,
    pub vehicle: String,
    pub phone: String,
    pub license: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Partial update payload for a driver
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DriverStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Entity for Driver {
    const KIND: EntityKind = EntityKind::Driver;
    type Draft = DriverDraft;
    type Patch = DriverPatch;

    fn id(&self) -> &EntityId {
        &self.id
    }
}

/// One-time sign-in code for the driver app
///
/// Ephemeral: returned to the caller for display and never written into the
/// store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverOtp {
    /// The code the driver types into the app
    pub code: String,

    /// Server-side expiry, if the backend reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// QR sign-in payload for the driver app (ephemeral, like the OTP)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverQr {
    /// Encoded payload the console renders as a QR image
    pub data: String,
}
