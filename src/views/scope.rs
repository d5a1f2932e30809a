//! School-scoped filtering, memoized
//!
//! `filtered_routes` is the routes whose `school_id` matches the selection;
//! `filtered_trips` is the transitive closure through the route. With no
//! selection both pass through unfiltered. Results are referentially stable:
//! as long as the underlying collections and the selection are unchanged,
//! repeated calls hand out the same `Arc`, so downstream consumers can skip
//! work on pointer equality.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::core::kind::EntityKind;
use crate::core::store::EntityStore;
use crate::entities::{Route, Trip};

/// Routes and trips visible under one school selection
#[derive(Debug, Clone)]
pub struct ScopedView {
    pub routes: Arc<Vec<Route>>,
    pub trips: Arc<Vec<Trip>>,
}

struct Memo {
    routes_generation: u64,
    trips_generation: u64,
    selected: Option<String>,
    view: ScopedView,
}

/// Memoized school-scope computation over the store
pub struct ScopeEngine {
    store: Arc<EntityStore>,
    memo: Mutex<Option<Memo>>,
}

impl ScopeEngine {
    pub fn new(store: Arc<EntityStore>) -> Self {
        Self {
            store,
            memo: Mutex::new(None),
        }
    }

    /// Routes scoped to the selected school (all routes when unset)
    pub fn filtered_routes(&self, selected_school_id: Option<&str>) -> Arc<Vec<Route>> {
        self.scoped(selected_school_id).routes
    }

    /// Trips whose route belongs to the selected school (all when unset)
    pub fn filtered_trips(&self, selected_school_id: Option<&str>) -> Arc<Vec<Trip>> {
        self.scoped(selected_school_id).trips
    }

    /// Both scoped collections, computed in one pass
    pub fn scoped(&self, selected_school_id: Option<&str>) -> ScopedView {
        let routes = self.store.all::<Route>();
        let trips = self.store.all::<Trip>();
        let routes_generation = self.store.generation(EntityKind::Route);
        let trips_generation = self.store.generation(EntityKind::Trip);

        let mut memo = self.memo.lock();
        if let Some(cached) = memo.as_ref() {
            if cached.routes_generation == routes_generation
                && cached.trips_generation == trips_generation
                && cached.selected.as_deref() == selected_school_id
            {
                return cached.view.clone();
            }
        }

        let view = match selected_school_id {
            // No selection: hand back the store snapshots themselves
            None => ScopedView { routes, trips },
            Some(school_id) => {
                let scoped_routes: Vec<Route> = routes
                    .iter()
                    .filter(|r| r.school_id == school_id)
                    .cloned()
                    .collect();
                let route_ids: HashSet<&str> =
                    scoped_routes.iter().map(|r| r.id.as_str()).collect();
                let scoped_trips: Vec<Trip> = trips
                    .iter()
                    .filter(|t| route_ids.contains(t.route_id.as_str()))
                    .cloned()
                    .collect();
                ScopedView {
                    routes: Arc::new(scoped_routes),
                    trips: Arc::new(scoped_trips),
                }
            }
        };

        *memo = Some(Memo {
            routes_generation,
            trips_generation,
            selected: selected_school_id.map(str::to_string),
            view: view.clone(),
        });
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::route::{RouteHealth, RouteStatus, RouteType};

    fn route(id: &str, school_id: &str) -> Route {
        Route {
            id: id.into(),
            name: format!("Route {}", id),
            school_id: school_id.into(),
            route_type: RouteType::Pickup,
            status: RouteStatus::Active,
            health: RouteHealth::Normal,
            vehicle_plate: "BUS-1".to_string(),
            driver_id: None,
            start_time: None,
        }
    }

    fn trip(id: &str, route_id: &str) -> Trip {
        Trip {
            id: id.into(),
            route_id: route_id.into(),
            driver_id: None,
            status: Default::default(),
            scheduled_start: None,
            started_at: None,
            completed_at: None,
        }
    }

    fn engine_with_fixture() -> ScopeEngine {
        let store = Arc::new(EntityStore::new());
        store.replace_all(vec![route("R1", "S1"), route("R2", "S2")]);
        store.replace_all(vec![trip("T1", "R1"), trip("T2", "R2")]);
        ScopeEngine::new(store)
    }

    #[test]
    fn test_selection_filters_routes_and_trips() {
        let engine = engine_with_fixture();
        let view = engine.scoped(Some("S1"));
        assert_eq!(view.routes.len(), 1);
        assert_eq!(view.routes[0].id, "R1");
        assert_eq!(view.trips.len(), 1);
        assert_eq!(view.trips[0].id, "T1");
    }

    #[test]
    fn test_no_selection_passes_everything_through() {
        let engine = engine_with_fixture();
        let view = engine.scoped(None);
        assert_eq!(view.routes.len(), 2);
        assert_eq!(view.trips.len(), 2);
    }

    #[test]
    fn test_unchanged_inputs_give_stable_references() {
        let engine = engine_with_fixture();
        let a = engine.filtered_routes(Some("S1"));
        let b = engine.filtered_routes(Some("S1"));
        assert!(Arc::ptr_eq(&a, &b));

        let t1 = engine.filtered_trips(Some("S1"));
        let t2 = engine.filtered_trips(Some("S1"));
        assert!(Arc::ptr_eq(&t1, &t2));
    }

    #[test]
    fn test_changing_selection_recomputes() {
        let engine = engine_with_fixture();
        let s1 = engine.filtered_routes(Some("S1"));
        let s2 = engine.filtered_routes(Some("S2"));
        assert_eq!(s1[0].id, "R1");
        assert_eq!(s2[0].id, "R2");
    }

    #[test]
    fn test_store_write_invalidates_memo() {
        let engine = engine_with_fixture();
        let before = engine.filtered_routes(Some("S1"));
        engine.store.upsert(route("R3", "S1"));
        let after = engine.filtered_routes(Some("S1"));
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(after.len(), 2);
    }

    #[test]
    fn test_unknown_school_scopes_to_nothing() {
        let engine = engine_with_fixture();
        let view = engine.scoped(Some("S404"));
        assert!(view.routes.is_empty());
        assert!(view.trips.is_empty());
    }
}
