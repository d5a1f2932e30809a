//! SyncHub - the composition root pages hold on to

use std::sync::Arc;

use crate::api::{ApiError, BackendApi, HttpBackend};
use crate::core::config::SyncConfig;
use crate::core::kind::EntityKind;
use crate::core::store::{EntityStatus, EntityStore};
use crate::sync::{FetchOrchestrator, InitReport, MutationGateway};
use crate::views::ScopeEngine;

use super::{Assignments, Collection, Drivers, Notifications, Routes, Schools, Shifts, Students, Trips};

/// One session's sync core: store, orchestrator, gateway, and view engine
///
/// Construct once per session, call [`initialize`](Self::initialize), then
/// hand out per-entity facades to pages.
pub struct SyncHub {
    config: SyncConfig,
    store: Arc<EntityStore>,
    orchestrator: FetchOrchestrator,
    gateway: MutationGateway,
    scope: ScopeEngine,
}

impl SyncHub {
    /// Connect to the backend named by the configuration
    pub fn connect(config: SyncConfig) -> Result<Self, ApiError> {
        let backend = Arc::new(HttpBackend::new(&config)?);
        Ok(Self::with_backend(config, backend))
    }

    /// Assemble the hub over any backend (tests inject a scripted one)
    pub fn with_backend(config: SyncConfig, api: Arc<dyn BackendApi>) -> Self {
        let store = Arc::new(EntityStore::new());
        Self {
            orchestrator: FetchOrchestrator::new(Arc::clone(&api), Arc::clone(&store)),
            gateway: MutationGateway::new(api, Arc::clone(&store)),
            scope: ScopeEngine::new(Arc::clone(&store)),
            store,
            config,
        }
    }

    /// Run the four-phase session bootstrap
    pub async fn initialize(&self) -> InitReport {
        self.orchestrator.initialize().await
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn orchestrator(&self) -> &FetchOrchestrator {
        &self.orchestrator
    }

    pub fn gateway(&self) -> &MutationGateway {
        &self.gateway
    }

    pub(crate) fn scope(&self) -> &ScopeEngine {
        &self.scope
    }

    /// `{loading, error}` status for any kind
    pub fn status(&self, kind: EntityKind) -> EntityStatus {
        self.store.status(kind)
    }

    pub fn schools(&self) -> Schools<'_> {
        Collection::new(self)
    }

    pub fn drivers(&self) -> Drivers<'_> {
        Drivers::new(self)
    }

    pub fn students(&self) -> Students<'_> {
        Students::new(self)
    }

    pub fn routes(&self) -> Routes<'_> {
        Routes::new(self)
    }

    pub fn trips(&self) -> Trips<'_> {
        Trips::new(self)
    }

    pub fn assignments(&self) -> Assignments<'_> {
        Collection::new(self)
    }

    pub fn shifts(&self) -> Shifts<'_> {
        Collection::new(self)
    }

    pub fn notifications(&self) -> Notifications<'_> {
        Notifications::new(self)
    }
}
