//! EntityStore - canonical in-memory collections with per-entity status
//!
//! One collection per entity kind plus a parallel `{loading, error}` status
//! record. All writers (the fetch orchestrator, the mutation gateway) go
//! through `replace_all`/`upsert`/`remove`/`set_status`; nothing mutates a
//! collection in place. Every write swaps in a fresh snapshot under a single
//! lock, so readers never observe a partially applied change.
//!
//! Snapshots are handed out as `Arc<Vec<T>>`. A collection that has not
//! changed keeps handing out the same allocation, which is what lets the
//! derived-view layer detect "nothing changed" cheaply; the per-kind
//! generation counter is the explicit form of the same signal.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::core::entity::Entity;
use crate::core::kind::EntityKind;

/// Load state for one entity collection
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntityStatus {
    /// A list fetch for this kind is in flight
    pub loading: bool,

    /// Message from the most recent failed fetch, cleared on the next attempt
    pub error: Option<String>,
}

impl EntityStatus {
    /// Status while a fetch is in flight
    pub fn loading() -> Self {
        Self {
            loading: true,
            error: None,
        }
    }

    /// Status after a successful fetch
    pub fn ready() -> Self {
        Self {
            loading: false,
            error: None,
        }
    }

    /// Status after a failed fetch
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            loading: false,
            error: Some(message.into()),
        }
    }
}

/// Per-kind collection state: the snapshot, its status, and a write counter
#[derive(Default)]
struct Slot {
    /// `Arc<Vec<E>>` behind `dyn Any`; `None` until the first write
    records: Option<Box<dyn Any + Send + Sync>>,
    status: EntityStatus,
    generation: u64,
}

impl Slot {
    fn snapshot<E: Entity>(&self) -> Option<Arc<Vec<E>>> {
        self.records
            .as_ref()
            .and_then(|r| r.downcast_ref::<Arc<Vec<E>>>())
            .cloned()
    }

    fn install<E: Entity>(&mut self, records: Vec<E>) {
        self.records = Some(Box::new(Arc::new(records)));
        self.generation += 1;
    }
}

/// Canonical in-memory collections for all entity kinds
///
/// The store is the only shared mutable resource in the sync core. Reads are
/// snapshot reads and never block on network activity; writes are atomic
/// replacements keyed by record id, last writer wins.
#[derive(Default)]
pub struct EntityStore {
    slots: RwLock<HashMap<EntityKind, Slot>>,
}

impl EntityStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot of a collection (empty if never populated)
    pub fn all<E: Entity>(&self) -> Arc<Vec<E>> {
        let slots = self.slots.read();
        slots
            .get(&E::KIND)
            .and_then(Slot::snapshot)
            .unwrap_or_else(|| Arc::new(Vec::new()))
    }

    /// Look up a single record by id
    pub fn get<E: Entity>(&self, id: &str) -> Option<E> {
        self.all::<E>().iter().find(|e| e.id() == id).cloned()
    }

    /// Replace the record with a matching id, or append if absent
    pub fn upsert<E: Entity>(&self, record: E) {
        let mut slots = self.slots.write();
        let slot = slots.entry(E::KIND).or_default();
        let mut records: Vec<E> = slot
            .snapshot::<E>()
            .map(|r| r.as_ref().clone())
            .unwrap_or_default();
        match records.iter().position(|e| e.id() == record.id()) {
            Some(index) => records[index] = record,
            None => records.push(record),
        }
        slot.install(records);
    }

    /// Remove the record with the given id; returns whether one was removed
    pub fn remove<E: Entity>(&self, id: &str) -> bool {
        let mut slots = self.slots.write();
        let slot = slots.entry(E::KIND).or_default();
        let mut records: Vec<E> = slot
            .snapshot::<E>()
            .map(|r| r.as_ref().clone())
            .unwrap_or_default();
        let before = records.len();
        records.retain(|e| e.id() != id);
        let removed = records.len() != before;
        if removed {
            slot.install(records);
        }
        removed
    }

    /// Replace the whole collection with a fresh fetch result
    pub fn replace_all<E: Entity>(&self, records: Vec<E>) {
        let mut slots = self.slots.write();
        slots.entry(E::KIND).or_default().install(records);
    }

    /// Current `{loading, error}` status for a kind
    pub fn status(&self, kind: EntityKind) -> EntityStatus {
        let slots = self.slots.read();
        slots
            .get(&kind)
            .map(|s| s.status.clone())
            .unwrap_or_default()
    }

    /// Record a status change for a kind (does not touch the collection)
    pub fn set_status(&self, kind: EntityKind, status: EntityStatus) {
        let mut slots = self.slots.write();
        slots.entry(kind).or_default().status = status;
    }

    /// Monotonic write counter for a kind's collection
    ///
    /// Bumped by every `upsert`/`remove`/`replace_all`; status changes do not
    /// count. Derived views use this to decide whether cached results are
    /// still current.
    pub fn generation(&self, kind: EntityKind) -> u64 {
        let slots = self.slots.read();
        slots.get(&kind).map(|s| s.generation).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::school::School;

    fn school(id: &str, name: &str) -> School {
        School {
            id: id.into(),
            name: name.to_string(),
            address: None,
            contact_phone: None,
        }
    }

    #[test]
    fn test_empty_store_reads() {
        let store = EntityStore::new();
        assert!(store.all::<School>().is_empty());
        assert!(store.get::<School>("S1").is_none());
        assert_eq!(store.status(EntityKind::School), EntityStatus::default());
        assert_eq!(store.generation(EntityKind::School), 0);
    }

    #[test]
    fn test_upsert_appends_then_replaces() {
        let store = EntityStore::new();
        store.upsert(school("S1", "Lincoln Elementary"));
        store.upsert(school("S2", "Roosevelt Middle"));
        assert_eq!(store.all::<School>().len(), 2);

        store.upsert(school("S1", "Lincoln Elementary (North)"));
        let all = store.all::<School>();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Lincoln Elementary (North)");
        // Replacement keeps the record's position
        assert_eq!(all[0].id, "S1");
    }

    #[test]
    fn test_remove() {
        let store = EntityStore::new();
        store.upsert(school("S1", "Lincoln Elementary"));
        assert!(store.remove::<School>("S1"));
        assert!(!store.remove::<School>("S1"));
        assert!(store.all::<School>().is_empty());
    }

    #[test]
    fn test_replace_all_swaps_snapshot() {
        let store = EntityStore::new();
        store.upsert(school("S1", "Lincoln Elementary"));
        let before = store.all::<School>();

        store.replace_all(vec![school("S2", "Roosevelt Middle")]);
        let after = store.all::<School>();
        assert_eq!(before.len(), 1);
        assert_eq!(after.len(), 1);
        assert_eq!(after[0].id, "S2");
        assert!(!Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn test_snapshot_is_stable_without_writes() {
        let store = EntityStore::new();
        store.replace_all(vec![school("S1", "Lincoln Elementary")]);
        let a = store.all::<School>();
        let b = store.all::<School>();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_generation_counts_writes_only() {
        let store = EntityStore::new();
        assert_eq!(store.generation(EntityKind::School), 0);

        store.upsert(school("S1", "Lincoln Elementary"));
        assert_eq!(store.generation(EntityKind::School), 1);

        store.set_status(EntityKind::School, EntityStatus::loading());
        assert_eq!(store.generation(EntityKind::School), 1);

        store.remove::<School>("S1");
        assert_eq!(store.generation(EntityKind::School), 2);
    }

    #[test]
    fn test_status_roundtrip() {
        let store = EntityStore::new();
        store.set_status(EntityKind::Driver, EntityStatus::loading());
        assert!(store.status(EntityKind::Driver).loading);

        store.set_status(EntityKind::Driver, EntityStatus::failed("network down"));
        let status = store.status(EntityKind::Driver);
        assert!(!status.loading);
        assert_eq!(status.error.as_deref(), Some("network down"));

        store.set_status(EntityKind::Driver, EntityStatus::ready());
        assert_eq!(store.status(EntityKind::Driver), EntityStatus::ready());
    }
}
