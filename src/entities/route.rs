//! Route entity type
//!
//! A route belongs to exactly one school via `school_id`. Route membership is
//! owned by the student side (`Student.assigned_routes`); a route never
//! stores its own student list.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::EntityId;
use crate::core::kind::EntityKind;

/// Direction a route runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RouteType {
    /// Morning run: homes to school
    #[default]
    Pickup,
    /// Afternoon run: school to homes
    Dropoff,
}

impl std::fmt::Display for RouteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteType::Pickup => write!(f, "PICKUP"),
            RouteType::Dropoff => write!(f, "DROPOFF"),
        }
    }
}

impl std::str::FromStr for RouteType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PICKUP" => Ok(RouteType::Pickup),
            "DROPOFF" => Ok(RouteType::Dropoff),
            _ => Err(format!("Unknown route type: {}", s)),
        }
    }
}

/// Whether the route is currently operated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RouteStatus {
    #[default]
    Active,
    Inactive,
}

impl std::fmt::Display for RouteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteStatus::Active => write!(f, "ACTIVE"),
            RouteStatus::Inactive => write!(f, "INACTIVE"),
        }
    }
}

impl std::str::FromStr for RouteStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(RouteStatus::Active),
            "INACTIVE" => Ok(RouteStatus::Inactive),
            _ => Err(format!("Unknown route status: {}", s)),
        }
    }
}

/// Operational health rollup shown on route boards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RouteHealth {
    #[default]
    Normal,
    Delayed,
    Alert,
}

impl std::fmt::Display for RouteHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteHealth::Normal => write!(f, "NORMAL"),
            RouteHealth::Delayed => write!(f, "DELAYED"),
            RouteHealth::Alert => write!(f, "ALERT"),
        }
    }
}

impl std::str::FromStr for RouteHealth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NORMAL" => Ok(RouteHealth::Normal),
            "DELAYED" => Ok(RouteHealth::Delayed),
            "ALERT" => Ok(RouteHealth::Alert),
            _ => Err(format!("Unknown route health: {}", s)),
        }
    }
}

/// A bus route serving one school
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Unique identifier
    pub id: EntityId,

    /// Display name (e.g. "North Loop AM")
    pub name: String,

    /// School this route belongs to
    pub school_id: EntityId,

    /// Direction of the run
    #[serde(rename = "type", default)]
    pub route_type: RouteType,

    /// Whether the route is currently operated
    #[serde(default)]
    pub status: RouteStatus,

    /// Operational health rollup
    #[serde(default)]
    pub health: RouteHealth,

    /// License plate of the assigned vehicle
    pub vehicle_plate: String,

    /// Assigned driver, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<EntityId>,

    /// Scheduled departure of the run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
}

/// Create payload for a route
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDraft {
    pub name: String,
    pub school_id: EntityId,

    #[serde(rename = "type", default)]
    pub route_type: RouteType,

    pub vehicle_plate: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<EntityId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
}

/// Partial update payload for a route
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub school_id: Option<EntityId>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub route_type: Option<RouteType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RouteStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<RouteHealth>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_plate: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<EntityId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
}

impl Entity for Route {
    const KIND: EntityKind = EntityKind::Route;
    type Draft = RouteDraft;
    type Patch = RoutePatch;

    fn id(&self) -> &EntityId {
        &self.id
    }
}
