//! Entity kind enumeration and wire path names

use serde::{Deserialize, Serialize};

/// The eight entity types the sync core manages
///
/// Every store collection, status record, and backend resource group is keyed
/// by one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    School,
    Driver,
    Student,
    Route,
    Trip,
    Assignment,
    Shift,
    Notification,
}

impl EntityKind {
    /// All kinds, in bootstrap phase order
    pub const ALL: [EntityKind; 8] = [
        EntityKind::School,
        EntityKind::Driver,
        EntityKind::Student,
        EntityKind::Notification,
        EntityKind::Route,
        EntityKind::Trip,
        EntityKind::Assignment,
        EntityKind::Shift,
    ];

    /// Lowercase singular name (used in logs and error messages)
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::School => "school",
            EntityKind::Driver => "driver",
            EntityKind::Student => "student",
            EntityKind::Route => "route",
            EntityKind::Trip => "trip",
            EntityKind::Assignment => "assignment",
            EntityKind::Shift => "shift",
            EntityKind::Notification => "notification",
        }
    }

    /// Collection segment for the flat path convention (`/students/{id}`)
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::School => "schools",
            EntityKind::Driver => "drivers",
            EntityKind::Student => "students",
            EntityKind::Route => "routes",
            EntityKind::Trip => "trips",
            EntityKind::Assignment => "assignments",
            EntityKind::Shift => "shifts",
            EntityKind::Notification => "notifications",
        }
    }

    /// Controller segment for the verb-styled convention (`/v1/Student/List`)
    pub fn controller(&self) -> &'static str {
        match self {
            EntityKind::School => "School",
            EntityKind::Driver => "Driver",
            EntityKind::Student => "Student",
            EntityKind::Route => "Route",
            EntityKind::Trip => "Trip",
            EntityKind::Assignment => "Assignment",
            EntityKind::Shift => "Shift",
            EntityKind::Notification => "Notification",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "school" => Ok(EntityKind::School),
            "driver" => Ok(EntityKind::Driver),
            "student" => Ok(EntityKind::Student),
            "route" => Ok(EntityKind::Route),
            "trip" => Ok(EntityKind::Trip),
            "assignment" => Ok(EntityKind::Assignment),
            "shift" => Ok(EntityKind::Shift),
            "notification" => Ok(EntityKind::Notification),
            _ => Err(format!("Unknown entity kind: {}", s)),
        }
    }
}
