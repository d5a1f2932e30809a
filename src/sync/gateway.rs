//! MutationGateway - writes reconciled against authoritative responses
//!
//! Every write goes to the backend first; the store is only touched with the
//! canonical record the backend returns. There is no optimistic path: a
//! rejected mutation leaves the store exactly as it was and hands the caller
//! a typed error. Presentation decides what to show the user.

use std::sync::Arc;

use futures::future::join_all;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use thiserror::Error;

use crate::api::{ApiError, BackendApi};
use crate::core::entity::Entity;
use crate::core::identity::EntityId;
use crate::core::kind::EntityKind;
use crate::core::store::EntityStore;
use crate::entities::{
    DriverOtp, DriverQr, Notification, NotificationPatch, Student, StudentTransfer,
};
use crate::sync::import::{self, RejectedRow, StudentImportRow};

/// Errors from the write path
#[derive(Debug, Error)]
pub enum MutationError {
    /// A store-local mutation referenced a record we do not hold
    #[error("{kind} {id} is not in the store")]
    NotFound { kind: EntityKind, id: String },

    /// The backend rejected the write; the store was left unchanged
    #[error("{kind} mutation rejected: {source}")]
    Api {
        kind: EntityKind,
        #[source]
        source: ApiError,
    },

    /// The backend accepted the write but returned an undecodable record
    #[error("Failed to decode {kind} response: {message}")]
    Decode { kind: EntityKind, message: String },
}

/// Outcome of a bulk student import
#[derive(Debug)]
pub struct BulkImport {
    /// Canonical records the backend created, already upserted into the store
    pub imported: Vec<Student>,

    /// Rows that failed client-side validation and were never submitted
    pub rejected: Vec<RejectedRow>,
}

/// Outcome of acknowledging every unread notification
#[derive(Debug, Default)]
pub struct MarkAllRead {
    /// Notifications successfully flipped to read
    pub updated: usize,

    /// Per-notification failures; the rest of the fan-out still completed
    pub failed: Vec<(EntityId, MutationError)>,
}

/// Applies creates, updates, deletes, and named actions
pub struct MutationGateway {
    api: Arc<dyn BackendApi>,
    store: Arc<EntityStore>,
}

impl MutationGateway {
    pub fn new(api: Arc<dyn BackendApi>, store: Arc<EntityStore>) -> Self {
        Self { api, store }
    }

    /// Create a record; the canonical server record (with its assigned id)
    /// is upserted and returned
    pub async fn create<E: Entity>(&self, draft: E::Draft) -> Result<E, MutationError> {
        let payload = encode(E::KIND, &draft)?;
        let raw = self
            .api
            .create(E::KIND, payload)
            .await
            .map_err(|source| api_error(E::KIND, source))?;
        let record: E = decode(E::KIND, raw)?;
        tracing::debug!(kind = %E::KIND, id = %record.id(), "created");
        self.store.upsert(record.clone());
        Ok(record)
    }

    /// Patch a record; reconciles the store with the post-mutation record
    pub async fn update<E: Entity>(&self, id: &str, patch: E::Patch) -> Result<E, MutationError> {
        let payload = encode(E::KIND, &patch)?;
        let raw = self
            .api
            .update(E::KIND, id, payload)
            .await
            .map_err(|source| api_error(E::KIND, source))?;
        let record: E = decode(E::KIND, raw)?;
        tracing::debug!(kind = %E::KIND, id = %record.id(), "updated");
        self.store.upsert(record.clone());
        Ok(record)
    }

    /// Delete a record; removed from the store on confirmed success only
    pub async fn remove<E: Entity>(&self, id: &str) -> Result<(), MutationError> {
        self.api
            .delete(E::KIND, id)
            .await
            .map_err(|source| api_error(E::KIND, source))?;
        tracing::debug!(kind = %E::KIND, id, "removed");
        self.store.remove::<E>(id);
        Ok(())
    }

    /// Generate a one-time sign-in code for a driver
    ///
    /// The code is ephemeral: returned to the caller, never stored.
    pub async fn generate_driver_otp(&self, driver_id: &str) -> Result<DriverOtp, MutationError> {
        let raw = self
            .api
            .record_action(EntityKind::Driver, driver_id, "generate-otp", Value::Null)
            .await
            .map_err(|source| api_error(EntityKind::Driver, source))?;
        decode(EntityKind::Driver, raw)
    }

    /// Fetch a driver's QR sign-in payload (ephemeral, like the OTP)
    pub async fn driver_qr_code(&self, driver_id: &str) -> Result<DriverQr, MutationError> {
        let raw = self
            .api
            .record_action(EntityKind::Driver, driver_id, "qr-code", Value::Null)
            .await
            .map_err(|source| api_error(EntityKind::Driver, source))?;
        decode(EntityKind::Driver, raw)
    }

    /// Flip a student between DISABLED and their prior operational status
    pub async fn toggle_student_disable(&self, id: &str) -> Result<Student, MutationError> {
        let raw = self
            .api
            .record_action(EntityKind::Student, id, "disable", Value::Null)
            .await
            .map_err(|source| api_error(EntityKind::Student, source))?;
        let student: Student = decode(EntityKind::Student, raw)?;
        tracing::debug!(id = %student.id, status = %student.status, "student disable toggled");
        self.store.upsert(student.clone());
        Ok(student)
    }

    /// Move a student to another school and/or grade
    pub async fn transfer_student(
        &self,
        id: &str,
        transfer: StudentTransfer,
    ) -> Result<Student, MutationError> {
        let payload = encode(EntityKind::Student, &transfer)?;
        let raw = self
            .api
            .record_action(EntityKind::Student, id, "transfer", payload)
            .await
            .map_err(|source| api_error(EntityKind::Student, source))?;
        let student: Student = decode(EntityKind::Student, raw)?;
        self.store.upsert(student.clone());
        Ok(student)
    }

    /// Validate roster rows and submit the valid ones as one batch
    ///
    /// Invalid rows are excluded, not fatal: the batch ships without them and
    /// they come back in `rejected` with their reasons. When no row survives
    /// validation, no network call is made.
    pub async fn bulk_upload_students(
        &self,
        rows: Vec<StudentImportRow>,
    ) -> Result<BulkImport, MutationError> {
        let (valid, rejected) = import::validate_rows(rows);
        for row in &rejected {
            tracing::warn!(line = row.line, reason = %row.reason, "import row rejected");
        }
        if valid.is_empty() {
            return Ok(BulkImport {
                imported: Vec::new(),
                rejected,
            });
        }

        let drafts: Vec<_> = valid.into_iter().map(StudentImportRow::into_draft).collect();
        let payload = encode(EntityKind::Student, &json!({ "rows": drafts }))?;
        let raw = self
            .api
            .collection_action(EntityKind::Student, "bulk-upload", payload)
            .await
            .map_err(|source| api_error(EntityKind::Student, source))?;
        let imported: Vec<Student> = decode(EntityKind::Student, raw)?;
        for student in &imported {
            self.store.upsert(student.clone());
        }
        tracing::debug!(imported = imported.len(), rejected = rejected.len(), "bulk import done");
        Ok(BulkImport { imported, rejected })
    }

    /// Toggle a student's membership on a route
    ///
    /// A pure store update: `assigned_routes` is the single source of truth
    /// for the student-route edge, and the toggle is idempotent under double
    /// application. Returns the updated student.
    pub fn toggle_student_assignment(
        &self,
        student_id: &str,
        route_id: &str,
    ) -> Result<Student, MutationError> {
        let mut student =
            self.store
                .get::<Student>(student_id)
                .ok_or_else(|| MutationError::NotFound {
                    kind: EntityKind::Student,
                    id: student_id.to_string(),
                })?;
        let added = student.toggle_assigned_route(route_id);
        tracing::debug!(student_id, route_id, added, "assignment toggled");
        self.store.upsert(student.clone());
        Ok(student)
    }

    /// Acknowledge one notification
    pub async fn mark_read(&self, id: &str) -> Result<Notification, MutationError> {
        self.update::<Notification>(id, NotificationPatch { read: Some(true) })
            .await
    }

    /// Acknowledge every unread notification
    ///
    /// Fans out one update per unread id; a failure on one id does not stop
    /// the others, and each failure is reported per-id.
    pub async fn mark_all_read(&self) -> MarkAllRead {
        let unread: Vec<EntityId> = self
            .store
            .all::<Notification>()
            .iter()
            .filter(|n| !n.read)
            .map(|n| n.id.clone())
            .collect();

        let results = join_all(unread.iter().map(|id| self.mark_read(id.as_str()))).await;

        let mut outcome = MarkAllRead::default();
        for (id, result) in unread.into_iter().zip(results) {
            match result {
                Ok(_) => outcome.updated += 1,
                Err(e) => outcome.failed.push((id, e)),
            }
        }
        outcome
    }
}

fn api_error(kind: EntityKind, source: ApiError) -> MutationError {
    MutationError::Api { kind, source }
}

fn encode<T: serde::Serialize>(kind: EntityKind, payload: &T) -> Result<Value, MutationError> {
    serde_json::to_value(payload).map_err(|e| MutationError::Decode {
        kind,
        message: e.to_string(),
    })
}

fn decode<T: DeserializeOwned>(kind: EntityKind, raw: Value) -> Result<T, MutationError> {
    serde_json::from_value(raw).map_err(|e| MutationError::Decode {
        kind,
        message: e.to_string(),
    })
}
