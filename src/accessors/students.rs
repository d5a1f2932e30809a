//! Student facade: generic CRUD plus roster actions and route membership

use std::ops::Deref;

use crate::entities::{Student, StudentTransfer};
use crate::sync::{BulkImport, MutationError, StudentImportRow};
use crate::views;

use super::{Collection, SyncHub};

/// Per-entity facade for students
pub struct Students<'a> {
    collection: Collection<'a, Student>,
    hub: &'a SyncHub,
}

impl<'a> Students<'a> {
    pub(crate) fn new(hub: &'a SyncHub) -> Self {
        Self {
            collection: Collection::new(hub),
            hub,
        }
    }

    /// Flip between DISABLED and the prior operational status
    pub async fn toggle_disable(&self, id: &str) -> Result<Student, MutationError> {
        self.hub.gateway().toggle_student_disable(id).await
    }

    /// Move a student to another school and/or grade
    pub async fn transfer(
        &self,
        id: &str,
        transfer: StudentTransfer,
    ) -> Result<Student, MutationError> {
        self.hub.gateway().transfer_student(id, transfer).await
    }

    /// Validate and submit a roster batch
    pub async fn bulk_upload(
        &self,
        rows: Vec<StudentImportRow>,
    ) -> Result<BulkImport, MutationError> {
        self.hub.gateway().bulk_upload_students(rows).await
    }

    /// Toggle the student's membership on a route (store-local)
    pub fn toggle_assignment(
        &self,
        student_id: &str,
        route_id: &str,
    ) -> Result<Student, MutationError> {
        self.hub
            .gateway()
            .toggle_student_assignment(student_id, route_id)
    }

    /// Students assigned to a route, in collection iteration order
    pub fn on_route(&self, route_id: &str) -> Vec<Student> {
        views::students_on_route(self.hub.store(), route_id)
    }
}

impl<'a> Deref for Students<'a> {
    type Target = Collection<'a, Student>;

    fn deref(&self) -> &Self::Target {
        &self.collection
    }
}
