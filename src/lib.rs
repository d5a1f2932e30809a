//! Routeboard sync core
//!
//! The entity data-synchronization layer behind the Routeboard school
//! transport operations console: typed collections for the eight entity
//! kinds, a fetch orchestrator with request coalescing and a phased
//! bootstrap, a mutation gateway that reconciles against authoritative
//! server responses, and pure, memoized derived views (school scoping,
//! route stop sequences).
//!
//! Rendering, forms, maps, and every other presentation concern live in the
//! console shell; this crate only moves and derives data. A typical session:
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use routeboard::accessors::SyncHub;
//! use routeboard::core::SyncConfig;
//! use routeboard::entities::RouteType;
//!
//! let hub = SyncHub::connect(SyncConfig::new("https://ops.example.com/api"))?;
//! let report = hub.initialize().await;
//! assert!(report.is_complete());
//!
//! let routes = hub.routes().scoped(Some("S1"));
//! let stops = hub.routes().stops(routes[0].id.as_str(), RouteType::Pickup);
//! # Ok(())
//! # }
//! ```

pub mod accessors;
pub mod api;
pub mod core;
pub mod entities;
pub mod sync;
pub mod views;

pub use accessors::SyncHub;
pub use api::{ApiError, BackendApi, HttpBackend};
pub use core::{EntityId, EntityKind, EntityStatus, EntityStore, SyncConfig};
pub use sync::{FetchError, FetchOrchestrator, InitReport, MutationError, MutationGateway};
