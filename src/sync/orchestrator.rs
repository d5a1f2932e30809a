//! FetchOrchestrator - reads with coalescing, caching, and phased bootstrap
//!
//! Populates the store with minimum redundant traffic. Per entity kind, at
//! most one list fetch is in flight at a time: concurrent callers await the
//! same shared task instead of issuing a second request. A populated cache
//! short-circuits non-forced fetches entirely; `force` always goes to the
//! network and replaces the cache on success.
//!
//! A failed fetch records the error on that kind's status and leaves any
//! previously cached collection untouched, so consumers keep stale data over
//! no data. No retries, no backoff, no cancellation: a started fetch runs to
//! completion or failure.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use thiserror::Error;

use crate::api::{ApiError, BackendApi};
use crate::core::entity::Entity;
use crate::core::kind::EntityKind;
use crate::core::store::{EntityStatus, EntityStore};

/// Errors from the read path
///
/// Clone because coalesced callers all receive the same result from the
/// shared in-flight task.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("Fetching {kind} failed: {source}")]
    Api {
        kind: EntityKind,
        #[source]
        source: ApiError,
    },

    #[error("Failed to decode {kind} record: {message}")]
    Decode { kind: EntityKind, message: String },
}

type InFlight = Shared<BoxFuture<'static, Result<(), FetchError>>>;

/// Outcome of the four-phase bootstrap
///
/// Per-entity `{loading, error}` statuses are recorded in the store
/// regardless; this report only saves the shell page a status scrape when it
/// wants to show a degraded-data banner.
#[derive(Debug, Clone, Default)]
pub struct InitReport {
    /// Kinds whose bootstrap fetch failed
    pub failed: Vec<EntityKind>,
}

impl InitReport {
    /// Whether every collection populated successfully
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    fn record<T>(&mut self, kind: EntityKind, result: &Result<T, FetchError>) {
        if result.is_err() {
            self.failed.push(kind);
        }
    }
}

/// Issues and coalesces read requests against the store
pub struct FetchOrchestrator {
    api: Arc<dyn BackendApi>,
    store: Arc<EntityStore>,
    in_flight: Arc<Mutex<HashMap<EntityKind, InFlight>>>,
}

impl FetchOrchestrator {
    pub fn new(api: Arc<dyn BackendApi>, store: Arc<EntityStore>) -> Self {
        Self {
            api,
            store,
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Fetch a collection, returning the post-fetch store snapshot
    ///
    /// An in-flight fetch for the same kind is always joined, forced or not.
    /// Otherwise a non-forced call with a populated cache resolves from the
    /// store without touching the network.
    pub async fn fetch<E: Entity>(&self, force: bool) -> Result<Arc<Vec<E>>, FetchError> {
        let joined = self.in_flight.lock().get(&E::KIND).cloned();
        if let Some(task) = joined {
            task.await?;
            return Ok(self.store.all::<E>());
        }

        if !force {
            let cached = self.store.all::<E>();
            if !cached.is_empty() {
                tracing::debug!(kind = %E::KIND, records = cached.len(), "fetch served from cache");
                return Ok(cached);
            }
        }

        self.list_task::<E>().await?;
        Ok(self.store.all::<E>())
    }

    /// Fetch one record by id and upsert it into the store
    ///
    /// Used by detail pages after navigation. A failure leaves the cached
    /// record (if any) in place, same as a failed list fetch.
    pub async fn refresh_one<E: Entity>(&self, id: &str) -> Result<E, FetchError> {
        let raw = self
            .api
            .get_by_id(E::KIND, id)
            .await
            .map_err(|source| FetchError::Api {
                kind: E::KIND,
                source,
            })?;
        let record: E = serde_json::from_value(raw).map_err(|e| FetchError::Decode {
            kind: E::KIND,
            message: e.to_string(),
        })?;
        self.store.upsert(record.clone());
        Ok(record)
    }

    /// Four-phase session bootstrap
    ///
    /// 1. School, Driver, Student, Notification in parallel.
    /// 2. Route (school names must be resolvable when routes render).
    /// 3. Trip (trip-route joins must be valid at read time).
    /// 4. Assignment and Shift in parallel.
    ///
    /// Each phase settles fully before the next starts. A failure in one
    /// kind's fetch never aborts its phase-mates or the later phases; the
    /// error lands on that kind's status and in the returned report.
    pub async fn initialize(&self) -> InitReport {
        use crate::entities::{Assignment, Driver, Notification, Route, School, Shift, Student, Trip};

        let mut report = InitReport::default();

        let (schools, drivers, students, notifications) = tokio::join!(
            self.fetch::<School>(false),
            self.fetch::<Driver>(false),
            self.fetch::<Student>(false),
            self.fetch::<Notification>(false),
        );
        report.record(EntityKind::School, &schools);
        report.record(EntityKind::Driver, &drivers);
        report.record(EntityKind::Student, &students);
        report.record(EntityKind::Notification, &notifications);

        let routes = self.fetch::<Route>(false).await;
        report.record(EntityKind::Route, &routes);

        let trips = self.fetch::<Trip>(false).await;
        report.record(EntityKind::Trip, &trips);

        let (assignments, shifts) =
            tokio::join!(self.fetch::<Assignment>(false), self.fetch::<Shift>(false));
        report.record(EntityKind::Assignment, &assignments);
        report.record(EntityKind::Shift, &shifts);

        if !report.is_complete() {
            tracing::warn!(failed = ?report.failed, "bootstrap completed with failures");
        }
        report
    }

    /// Start (or join) the single in-flight list fetch for a kind
    fn list_task<E: Entity>(&self) -> InFlight {
        let mut in_flight = self.in_flight.lock();
        if let Some(task) = in_flight.get(&E::KIND) {
            return task.clone();
        }

        let api = Arc::clone(&self.api);
        let store = Arc::clone(&self.store);
        let slots = Arc::clone(&self.in_flight);
        let task: InFlight = async move {
            store.set_status(E::KIND, EntityStatus::loading());
            let result = list_into_store::<E>(&*api, &store).await;
            slots.lock().remove(&E::KIND);
            match &result {
                Ok(count) => {
                    store.set_status(E::KIND, EntityStatus::ready());
                    tracing::debug!(kind = %E::KIND, records = count, "fetch settled");
                }
                Err(e) => {
                    // Stale cache stays; only the status records the failure
                    store.set_status(E::KIND, EntityStatus::failed(e.to_string()));
                    tracing::warn!(kind = %E::KIND, error = %e, "fetch failed");
                }
            }
            result.map(|_| ())
        }
        .boxed()
        .shared();

        in_flight.insert(E::KIND, task.clone());
        task
    }
}

async fn list_into_store<E: Entity>(
    api: &dyn BackendApi,
    store: &EntityStore,
) -> Result<usize, FetchError> {
    let raw = api.list(E::KIND).await.map_err(|source| FetchError::Api {
        kind: E::KIND,
        source,
    })?;
    let records = raw
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<Vec<E>, _>>()
        .map_err(|e| FetchError::Decode {
            kind: E::KIND,
            message: e.to_string(),
        })?;
    let count = records.len();
    store.replace_all(records);
    Ok(count)
}
