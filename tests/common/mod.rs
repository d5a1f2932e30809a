//! Shared test fixtures: a scripted in-memory backend and a seeded world

// Not every test binary uses every helper
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};

use routeboard::accessors::SyncHub;
use routeboard::api::{ApiError, BackendApi};
use routeboard::core::{EntityKind, SyncConfig};

/// Scripted [`BackendApi`]: seeded JSON collections, per-operation call
/// counters, failure switches, artificial latency, and an event log for
/// ordering assertions.
#[derive(Default)]
pub struct MockBackend {
    data: Mutex<HashMap<EntityKind, Vec<Value>>>,
    calls: Mutex<HashMap<String, usize>>,
    failures: Mutex<HashSet<String>>,
    latency: Mutex<HashMap<EntityKind, Duration>>,
    events: Mutex<Vec<String>>,
    next_id: AtomicUsize,
    disabled_prior: Mutex<HashMap<String, Value>>,
}

fn op_key(op: &str, kind: EntityKind) -> String {
    format!("{}:{}", op, kind)
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection with records
    pub fn seed(&self, kind: EntityKind, records: Vec<Value>) {
        self.data.lock().insert(kind, records);
    }

    /// Make an operation fail until cleared (e.g. `"list"`, `"update"`)
    pub fn fail_on(&self, op: &str, kind: EntityKind) {
        self.failures.lock().insert(op_key(op, kind));
    }

    pub fn clear_failures(&self) {
        self.failures.lock().clear();
    }

    /// Delay list responses for a kind (for coalescing and ordering tests)
    pub fn set_list_latency(&self, kind: EntityKind, latency: Duration) {
        self.latency.lock().insert(kind, latency);
    }

    /// How many times an operation ran for a kind
    pub fn call_count(&self, op: &str, kind: EntityKind) -> usize {
        self.calls.lock().get(&op_key(op, kind)).copied().unwrap_or(0)
    }

    /// Chronological `start:`/`settle:` log of list calls
    pub fn events(&self) -> Vec<String> {
        self.events.lock().clone()
    }

    fn count(&self, op: &str, kind: EntityKind) {
        *self.calls.lock().entry(op_key(op, kind)).or_insert(0) += 1;
    }

    fn check_failure(&self, op: &str, kind: EntityKind) -> Result<(), ApiError> {
        if self.failures.lock().contains(&op_key(op, kind)) {
            return Err(ApiError::Status {
                url: format!("mock://{}/{}", kind.collection(), op),
                status: 500,
                body: "scripted failure".to_string(),
            });
        }
        Ok(())
    }

    fn mint_id(&self, kind: EntityKind) -> String {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{}-GEN{}", kind.controller(), n)
    }

    fn find(&self, kind: EntityKind, id: &str) -> Result<Value, ApiError> {
        self.data
            .lock()
            .get(&kind)
            .and_then(|records| {
                records
                    .iter()
                    .find(|r| r["id"].as_str() == Some(id))
                    .cloned()
            })
            .ok_or_else(|| ApiError::Status {
                url: format!("mock://{}/{}", kind.collection(), id),
                status: 404,
                body: "not found".to_string(),
            })
    }

    fn store_record(&self, kind: EntityKind, record: Value) {
        let mut data = self.data.lock();
        let records = data.entry(kind).or_default();
        let id = record["id"].as_str().unwrap_or_default().to_string();
        match records.iter().position(|r| r["id"].as_str() == Some(id.as_str())) {
            Some(index) => records[index] = record,
            None => records.push(record),
        }
    }
}

#[async_trait]
impl BackendApi for MockBackend {
    async fn list(&self, kind: EntityKind) -> Result<Vec<Value>, ApiError> {
        self.count("list", kind);
        self.events.lock().push(format!("start:{}", kind));
        let latency = self.latency.lock().get(&kind).copied();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        let result = self
            .check_failure("list", kind)
            .map(|_| self.data.lock().get(&kind).cloned().unwrap_or_default());
        self.events.lock().push(format!("settle:{}", kind));
        result
    }

    async fn get_by_id(&self, kind: EntityKind, id: &str) -> Result<Value, ApiError> {
        self.count("get", kind);
        self.check_failure("get", kind)?;
        self.find(kind, id)
    }

    async fn create(&self, kind: EntityKind, payload: Value) -> Result<Value, ApiError> {
        self.count("create", kind);
        self.check_failure("create", kind)?;
        let mut record = payload;
        record["id"] = json!(self.mint_id(kind));
        self.store_record(kind, record.clone());
        Ok(record)
    }

    async fn update(&self, kind: EntityKind, id: &str, payload: Value) -> Result<Value, ApiError> {
        self.count("update", kind);
        self.check_failure("update", kind)?;
        let mut record = self.find(kind, id)?;
        if let (Value::Object(target), Value::Object(patch)) = (&mut record, payload) {
            for (key, value) in patch {
                target.insert(key, value);
            }
        }
        self.store_record(kind, record.clone());
        Ok(record)
    }

    async fn delete(&self, kind: EntityKind, id: &str) -> Result<(), ApiError> {
        self.count("delete", kind);
        self.check_failure("delete", kind)?;
        self.find(kind, id)?;
        let mut data = self.data.lock();
        if let Some(records) = data.get_mut(&kind) {
            records.retain(|r| r["id"].as_str() != Some(id));
        }
        Ok(())
    }

    async fn record_action(
        &self,
        kind: EntityKind,
        id: &str,
        action: &str,
        payload: Value,
    ) -> Result<Value, ApiError> {
        self.count(action, kind);
        self.check_failure(action, kind)?;
        match action {
            "generate-otp" => Ok(json!({ "code": "483921" })),
            "qr-code" => Ok(json!({ "data": format!("rb-driver:{}", id) })),
            "disable" => {
                let mut record = self.find(kind, id)?;
                let mut prior = self.disabled_prior.lock();
                if record["status"] == json!("DISABLED") {
                    record["status"] = prior.remove(id).unwrap_or(json!("WAITING"));
                } else {
                    prior.insert(id.to_string(), record["status"].clone());
                    record["status"] = json!("DISABLED");
                }
                self.store_record(kind, record.clone());
                Ok(record)
            }
            "transfer" => {
                let mut record = self.find(kind, id)?;
                if let (Value::Object(target), Value::Object(patch)) = (&mut record, payload) {
                    for (key, value) in patch {
                        target.insert(key, value);
                    }
                }
                self.store_record(kind, record.clone());
                Ok(record)
            }
            other => Err(ApiError::Status {
                url: format!("mock://{}/{}/{}", kind.collection(), id, other),
                status: 404,
                body: "unknown action".to_string(),
            }),
        }
    }

    async fn collection_action(
        &self,
        kind: EntityKind,
        action: &str,
        payload: Value,
    ) -> Result<Value, ApiError> {
        self.count(action, kind);
        self.check_failure(action, kind)?;
        match action {
            "bulk-upload" => {
                let rows = payload["rows"].as_array().cloned().unwrap_or_default();
                let mut created = Vec::new();
                for row in rows {
                    let mut record = row;
                    record["id"] = json!(self.mint_id(kind));
                    self.store_record(kind, record.clone());
                    created.push(record);
                }
                Ok(Value::Array(created))
            }
            other => Err(ApiError::Status {
                url: format!("mock://{}/{}", kind.collection(), other),
                status: 404,
                body: "unknown action".to_string(),
            }),
        }
    }
}

pub fn student_json(id: &str, name: &str, routes: &[&str]) -> Value {
    json!({
        "id": id,
        "name": name,
        "school": "Lincoln Elementary",
        "grade": "5th Grade",
        "guardian": { "name": "Guardian", "phone": "555-0100" },
        "status": "WAITING",
        "pickupLocation": { "address": format!("{} pickup", name), "lat": 40.71, "lng": -74.0 },
        "dropoffLocation": { "address": format!("{} dropoff", name), "lat": 40.72, "lng": -74.01 },
        "assignedRoutes": routes,
    })
}

pub fn route_json(id: &str, school_id: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Route {}", id),
        "schoolId": school_id,
        "type": "PICKUP",
        "status": "ACTIVE",
        "health": "NORMAL",
        "vehiclePlate": "BUS-214",
    })
}

/// A small consistent world: two schools, one driver, two students, two
/// routes (one per school), two trips, one assignment, one shift, two
/// notifications (one unread).
pub fn seeded_backend() -> Arc<MockBackend> {
    let backend = MockBackend::new();

    backend.seed(
        EntityKind::School,
        vec![
            json!({ "id": "S1", "name": "Lincoln Elementary" }),
            json!({ "id": "S2", "name": "Roosevelt Middle" }),
        ],
    );
    backend.seed(
        EntityKind::Driver,
        vec![json!({
            "id": "D1",
            "name": "Maria Reyes",
            "vehicle": "Blue Bird Vision",
            "phone": "555-0199",
            "license": "CDL-88214",
            "status": "AVAILABLE",
        })],
    );
    backend.seed(
        EntityKind::Student,
        vec![
            student_json("STU1", "Amir Hassan", &[]),
            student_json("STU2", "Dana Cole", &["R1"]),
        ],
    );
    backend.seed(
        EntityKind::Route,
        vec![route_json("R1", "S1"), route_json("R2", "S2")],
    );
    backend.seed(
        EntityKind::Trip,
        vec![
            json!({ "id": "T1", "routeId": "R1", "status": "SCHEDULED" }),
            json!({ "id": "T2", "routeId": "R2", "status": "SCHEDULED" }),
        ],
    );
    backend.seed(
        EntityKind::Assignment,
        vec![json!({ "id": "A1", "driverId": "D1", "routeId": "R1", "date": "2026-03-02" })],
    );
    backend.seed(
        EntityKind::Shift,
        vec![json!({
            "id": "SH1",
            "driverId": "D1",
            "startsAt": "2026-03-02T06:00:00Z",
            "endsAt": "2026-03-02T10:00:00Z",
        })],
    );
    backend.seed(
        EntityKind::Notification,
        vec![
            json!({ "id": "N1", "type": "DELAY", "message": "Route R1 late", "read": false,
                    "timestamp": "2026-03-02T07:40:00Z" }),
            json!({ "id": "N2", "type": "INFO", "message": "Roster synced", "read": true,
                    "timestamp": "2026-03-01T16:00:00Z" }),
        ],
    );

    Arc::new(backend)
}

/// A hub over the seeded backend (not yet initialized)
pub fn seeded_hub() -> (SyncHub, Arc<MockBackend>) {
    let backend = seeded_backend();
    let hub = SyncHub::with_backend(
        SyncConfig::new("mock://backend"),
        Arc::clone(&backend) as Arc<dyn BackendApi>,
    );
    (hub, backend)
}
