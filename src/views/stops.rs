//! Route stop-sequence derivation
//!
//! A route's stops are derived, never stored: scan the student collection in
//! iteration order, keep the students assigned to the route, and emit one
//! stop per student at the direction's location. Stop times come from a
//! synthetic clock (base + index * step) and are presentational, not a
//! transit plan. The scan is deliberately not geographically optimized.
//!
//! No caching here: an assignment toggle must show up in the very next
//! derivation, and the scan is cheap at console scale.

use chrono::NaiveTime;
use serde::Serialize;

use crate::core::config::StopClock;
use crate::core::identity::EntityId;
use crate::core::store::EntityStore;
use crate::entities::route::RouteType;
use crate::entities::Student;

/// One derived pickup or dropoff point, attributable to exactly one student
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    pub student_id: EntityId,
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub time: NaiveTime,
}

/// Students assigned to a route, in collection iteration order
pub fn students_on_route(store: &EntityStore, route_id: &str) -> Vec<Student> {
    store
        .all::<Student>()
        .iter()
        .filter(|s| s.is_assigned_to(route_id))
        .cloned()
        .collect()
}

/// Derive the ordered, timed stop sequence for a route
///
/// One stop per assigned student, always: `derive_stops(...).len()` equals
/// the number of students whose `assigned_routes` contains `route_id`.
pub fn derive_stops(
    store: &EntityStore,
    clock: &StopClock,
    route_id: &str,
    direction: RouteType,
) -> Vec<Stop> {
    let base = match direction {
        RouteType::Pickup => clock.pickup_base,
        RouteType::Dropoff => clock.dropoff_base,
    };
    students_on_route(store, route_id)
        .into_iter()
        .enumerate()
        .map(|(index, student)| {
            let location = student.location_for(direction);
            Stop {
                student_id: student.id.clone(),
                name: student.name.clone(),
                address: location.address.clone(),
                lat: location.lat,
                lng: location.lng,
                time: clock.slot_from(base, index),
            }
        })
        .collect()
}
