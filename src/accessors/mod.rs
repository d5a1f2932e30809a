//! Thin per-entity facades over the sync core
//!
//! Pages consume these instead of wiring the orchestrator, gateway, and view
//! engine together themselves. [`Collection`] carries the generic fetch/CRUD
//! surface; entities with named actions or derivations get a wrapper that
//! derefs to it.

pub mod drivers;
pub mod hub;
pub mod notifications;
pub mod routes;
pub mod students;

use std::marker::PhantomData;
use std::sync::Arc;

use crate::core::entity::Entity;
use crate::core::store::EntityStatus;
use crate::sync::{FetchError, MutationError};

pub use drivers::Drivers;
pub use hub::SyncHub;
pub use notifications::Notifications;
pub use routes::{Routes, Trips};
pub use students::Students;

/// Generic facade over one entity collection
pub struct Collection<'a, E: Entity> {
    hub: &'a SyncHub,
    _marker: PhantomData<E>,
}

/// Schools have no named actions; the generic surface is the whole facade
pub type Schools<'a> = Collection<'a, crate::entities::School>;

/// Scheduling records are plain CRUD collections
pub type Assignments<'a> = Collection<'a, crate::entities::Assignment>;
pub type Shifts<'a> = Collection<'a, crate::entities::Shift>;

impl<'a, E: Entity> Collection<'a, E> {
    pub(crate) fn new(hub: &'a SyncHub) -> Self {
        Self {
            hub,
            _marker: PhantomData,
        }
    }

    /// Current snapshot from cache or network, per the force semantics
    pub async fn list(&self, force: bool) -> Result<Arc<Vec<E>>, FetchError> {
        self.hub.orchestrator().fetch::<E>(force).await
    }

    /// Cached record by id (no network)
    pub fn get(&self, id: &str) -> Option<E> {
        self.hub.store().get::<E>(id)
    }

    /// Re-fetch one record and upsert it
    pub async fn refresh(&self, id: &str) -> Result<E, FetchError> {
        self.hub.orchestrator().refresh_one::<E>(id).await
    }

    pub async fn create(&self, draft: E::Draft) -> Result<E, MutationError> {
        self.hub.gateway().create::<E>(draft).await
    }

    pub async fn update(&self, id: &str, patch: E::Patch) -> Result<E, MutationError> {
        self.hub.gateway().update::<E>(id, patch).await
    }

    pub async fn remove(&self, id: &str) -> Result<(), MutationError> {
        self.hub.gateway().remove::<E>(id).await
    }

    /// This collection's `{loading, error}` status
    pub fn status(&self) -> EntityStatus {
        self.hub.store().status(E::KIND)
    }
}
