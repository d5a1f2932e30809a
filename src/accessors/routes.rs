//! Route and trip facades: generic CRUD plus school scoping and stops

use std::ops::Deref;
use std::sync::Arc;

use crate::entities::{Route, RouteType, Trip};
use crate::views::{self, Stop};

use super::{Collection, SyncHub};

/// Per-entity facade for routes
pub struct Routes<'a> {
    collection: Collection<'a, Route>,
    hub: &'a SyncHub,
}

impl<'a> Routes<'a> {
    pub(crate) fn new(hub: &'a SyncHub) -> Self {
        Self {
            collection: Collection::new(hub),
            hub,
        }
    }

    /// Routes scoped to the selected school (all routes when unset)
    pub fn scoped(&self, selected_school_id: Option<&str>) -> Arc<Vec<Route>> {
        self.hub.scope().filtered_routes(selected_school_id)
    }

    /// Derive the route's ordered, timed stop sequence
    pub fn stops(&self, route_id: &str, direction: RouteType) -> Vec<Stop> {
        views::derive_stops(
            self.hub.store(),
            &self.hub.config().stop_clock,
            route_id,
            direction,
        )
    }
}

impl<'a> Deref for Routes<'a> {
    type Target = Collection<'a, Route>;

    fn deref(&self) -> &Self::Target {
        &self.collection
    }
}

/// Per-entity facade for trips
pub struct Trips<'a> {
    collection: Collection<'a, Trip>,
    hub: &'a SyncHub,
}

impl<'a> Trips<'a> {
    pub(crate) fn new(hub: &'a SyncHub) -> Self {
        Self {
            collection: Collection::new(hub),
            hub,
        }
    }

    /// Trips whose route belongs to the selected school (all when unset)
    pub fn scoped(&self, selected_school_id: Option<&str>) -> Arc<Vec<Trip>> {
        self.hub.scope().filtered_trips(selected_school_id)
    }
}

impl<'a> Deref for Trips<'a> {
    type Target = Collection<'a, Trip>;

    fn deref(&self) -> &Self::Target {
        &self.collection
    }
}
