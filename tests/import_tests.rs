//! Bulk roster import: CSV parsing, row validation, batch submission

mod common;

use common::seeded_hub;
use routeboard::core::EntityKind;
use routeboard::sync::{read_roster, StudentImportRow};

const ROSTER: &str = "\
first_name,last_name,guardian_name,guardian_phone,address,school,grade
Amir,Hassan,Layla Hassan,555-0134,12 Cedar Ave,Lincoln Elementary,5th Grade
Dana,Cole,,555-0177,1 Elm St,Lincoln Elementary,4th Grade
Joon,Park,Min Park,,77 Birch Rd,Lincoln Elementary,5th Grade
Mia,Santos,Rosa Santos,555-0150,9 Pine Ct,Lincoln Elementary,3rd Grade
";

#[tokio::test]
async fn valid_rows_are_submitted_and_upserted() {
    let (hub, backend) = seeded_hub();
    hub.initialize().await;
    let students_before = hub.students().list(false).await.unwrap().len();

    let rows = read_roster(ROSTER.as_bytes()).unwrap();
    let outcome = hub.students().bulk_upload(rows).await.unwrap();

    assert_eq!(outcome.imported.len(), 2);
    assert_eq!(outcome.rejected.len(), 2);
    assert_eq!(backend.call_count("bulk-upload", EntityKind::Student), 1);

    // Canonical records landed in the store with backend-assigned ids
    let students = hub.students().list(false).await.unwrap();
    assert_eq!(students.len(), students_before + 2);
    assert!(students.iter().any(|s| s.name == "Amir Hassan"));
    assert!(students.iter().any(|s| s.name == "Mia Santos"));
}

#[tokio::test]
async fn rejected_rows_carry_position_and_reason() {
    let (hub, _backend) = seeded_hub();
    hub.initialize().await;

    let rows = read_roster(ROSTER.as_bytes()).unwrap();
    let outcome = hub.students().bulk_upload(rows).await.unwrap();

    assert_eq!(outcome.rejected[0].line, 2);
    assert_eq!(outcome.rejected[0].reason, "missing guardian name");
    assert_eq!(outcome.rejected[1].line, 3);
    assert_eq!(outcome.rejected[1].reason, "missing guardian phone");
}

#[tokio::test]
async fn all_invalid_batch_issues_no_network_call() {
    let (hub, backend) = seeded_hub();
    hub.initialize().await;

    let rows = vec![StudentImportRow::default(), StudentImportRow::default()];
    let outcome = hub.students().bulk_upload(rows).await.unwrap();

    assert!(outcome.imported.is_empty());
    assert_eq!(outcome.rejected.len(), 2);
    assert_eq!(backend.call_count("bulk-upload", EntityKind::Student), 0);
}

#[tokio::test]
async fn imported_students_start_with_empty_assignments() {
    let (hub, _backend) = seeded_hub();
    hub.initialize().await;

    let rows = read_roster(ROSTER.as_bytes()).unwrap();
    let outcome = hub.students().bulk_upload(rows).await.unwrap();

    for student in &outcome.imported {
        assert!(student.assigned_routes.is_empty());
        assert!(!student.pickup_location.address.is_empty());
    }
}
