//! Core module - fundamental types and the entity store

pub mod config;
pub mod entity;
pub mod identity;
pub mod kind;
pub mod store;

pub use config::{ConfigError, PathStyle, StopClock, SyncConfig, CONFIG_FILE};
pub use entity::Entity;
pub use identity::{EntityId, RequestIdentity};
pub use kind::EntityKind;
pub use store::{EntityStatus, EntityStore};
