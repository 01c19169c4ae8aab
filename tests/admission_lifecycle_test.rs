// Document declarations and payments driving the admission status machine
mod common;

use admissions_backend::auth::Role;
use admissions_backend::errors::InternalError;
use admissions_backend::lifecycle::AdmissionStatus;
use admissions_backend::stores::{DocumentDeclaration, NewPayment};

fn declare(document_type_id: &str, declared: bool) -> DocumentDeclaration {
    DocumentDeclaration {
        document_type_id: document_type_id.to_string(),
        declared,
        notes: None,
    }
}

fn payment(receipt: &str, amount: i64) -> NewPayment {
    NewPayment {
        amount,
        mode: "CASH".to_string(),
        reference: None,
        receipt_number: receipt.to_string(),
        payment_date: "2025-07-01".to_string(),
    }
}

#[tokio::test]
async fn test_new_application_starts_at_application_entered() {
    let app = common::setup().await;
    let clerk = common::seed_user(&app, "clerk", Role::AdmissionStaff).await;
    let fixture = common::seed_academics(&app, 10_000).await;

    let student = common::seed_student(&app, &fixture.offering_id, &clerk.id).await;

    assert_eq!(student.status, "APPLICATION_ENTERED");
    assert_eq!(student.application_number, "APP20250001");
}

#[tokio::test]
async fn test_application_numbers_sequence_per_year() {
    let app = common::setup().await;
    let clerk = common::seed_user(&app, "clerk", Role::AdmissionStaff).await;
    let fixture = common::seed_academics(&app, 10_000).await;

    let first = common::seed_student(&app, &fixture.offering_id, &clerk.id).await;
    let second = common::seed_student(&app, &fixture.offering_id, &clerk.id).await;

    assert_eq!(first.application_number, "APP20250001");
    assert_eq!(second.application_number, "APP20250002");
}

#[tokio::test]
async fn test_partial_declaration_moves_to_documents_incomplete() {
    let app = common::setup().await;
    let officer = common::seed_user(&app, "doc-officer", Role::DocumentOfficer).await;
    let fixture = common::seed_academics(&app, 10_000).await;
    let student = common::seed_student(&app, &fixture.offering_id, &officer.id).await;
    let required = common::required_document_type_ids(&app).await;

    let outcome = app
        .document_store
        .declare_documents(&student.id, &[declare(&required[0], true)], &officer.id)
        .await
        .expect("declaration should succeed");

    assert_eq!(outcome.status, AdmissionStatus::DocumentsIncomplete);
    assert!(outcome.status_changed);
    assert_eq!(outcome.declared_count, 1);
    assert_eq!(outcome.total_required, 3);

    let reloaded = app.student_store.get_student(&student.id).await.unwrap();
    assert_eq!(reloaded.status, "DOCUMENTS_INCOMPLETE");
}

#[tokio::test]
async fn test_bulk_declaration_of_all_required_reaches_fee_pending() {
    let app = common::setup().await;
    let officer = common::seed_user(&app, "doc-officer", Role::DocumentOfficer).await;
    let fixture = common::seed_academics(&app, 10_000).await;
    let student = common::seed_student(&app, &fixture.offering_id, &officer.id).await;
    let required = common::required_document_type_ids(&app).await;

    let entries: Vec<_> = required.iter().map(|id| declare(id, true)).collect();
    let outcome = app
        .document_store
        .declare_documents(&student.id, &entries, &officer.id)
        .await
        .expect("bulk declaration should succeed");

    assert_eq!(outcome.status, AdmissionStatus::FeePending);
    assert!(outcome.status_changed);
    assert_eq!(outcome.declared_count, 3);
}

#[tokio::test]
async fn test_optional_documents_do_not_count_toward_required() {
    let app = common::setup().await;
    let officer = common::seed_user(&app, "doc-officer", Role::DocumentOfficer).await;
    let fixture = common::seed_academics(&app, 10_000).await;
    let student = common::seed_student(&app, &fixture.offering_id, &officer.id).await;
    let optional = common::optional_document_type_id(&app).await;

    let outcome = app
        .document_store
        .declare_documents(&student.id, &[declare(&optional, true)], &officer.id)
        .await
        .expect("declaration should succeed");

    assert_eq!(outcome.status, AdmissionStatus::ApplicationEntered);
    assert!(!outcome.status_changed);
    assert_eq!(outcome.declared_count, 0);
}

#[tokio::test]
async fn test_redeclaring_the_same_type_counts_once() {
    let app = common::setup().await;
    let officer = common::seed_user(&app, "doc-officer", Role::DocumentOfficer).await;
    let fixture = common::seed_academics(&app, 10_000).await;
    let student = common::seed_student(&app, &fixture.offering_id, &officer.id).await;
    let required = common::required_document_type_ids(&app).await;

    app.document_store
        .declare_documents(&student.id, &[declare(&required[0], true)], &officer.id)
        .await
        .unwrap();
    let outcome = app
        .document_store
        .declare_documents(&student.id, &[declare(&required[0], true)], &officer.id)
        .await
        .unwrap();

    assert_eq!(outcome.declared_count, 1);
    // Still one row per (student, type) after the upsert
    let documents = app
        .document_store
        .list_student_documents(&student.id)
        .await
        .unwrap();
    assert_eq!(documents.len(), 1);
}

#[tokio::test]
async fn test_withdrawing_a_declaration_regresses_within_document_stage() {
    let app = common::setup().await;
    let officer = common::seed_user(&app, "doc-officer", Role::DocumentOfficer).await;
    let fixture = common::seed_academics(&app, 10_000).await;
    let student = common::seed_student(&app, &fixture.offering_id, &officer.id).await;
    let required = common::required_document_type_ids(&app).await;

    app.document_store
        .declare_documents(
            &student.id,
            &[declare(&required[0], true), declare(&required[1], true)],
            &officer.id,
        )
        .await
        .unwrap();

    let outcome = app
        .document_store
        .declare_documents(&student.id, &[declare(&required[0], false)], &officer.id)
        .await
        .unwrap();

    assert_eq!(outcome.status, AdmissionStatus::DocumentsIncomplete);
    assert_eq!(outcome.declared_count, 1);
}

#[tokio::test]
async fn test_declarations_never_regress_a_fee_stage_student() {
    let app = common::setup().await;
    let officer = common::seed_user(&app, "doc-officer", Role::DocumentOfficer).await;
    let fixture = common::seed_academics(&app, 10_000).await;
    let student = common::seed_student(&app, &fixture.offering_id, &officer.id).await;
    let required = common::required_document_type_ids(&app).await;

    let entries: Vec<_> = required.iter().map(|id| declare(id, true)).collect();
    app.document_store
        .declare_documents(&student.id, &entries, &officer.id)
        .await
        .unwrap();

    // Student is now FEE_PENDING; withdrawing a document must not pull it back
    let outcome = app
        .document_store
        .declare_documents(&student.id, &[declare(&required[0], false)], &officer.id)
        .await
        .unwrap();

    assert_eq!(outcome.status, AdmissionStatus::FeePending);
    assert!(!outcome.status_changed);

    let reloaded = app.student_store.get_student(&student.id).await.unwrap();
    assert_eq!(reloaded.status, "FEE_PENDING");
}

#[tokio::test]
async fn test_empty_declaration_batch_is_rejected() {
    let app = common::setup().await;
    let officer = common::seed_user(&app, "doc-officer", Role::DocumentOfficer).await;
    let fixture = common::seed_academics(&app, 10_000).await;
    let student = common::seed_student(&app, &fixture.offering_id, &officer.id).await;

    let result = app
        .document_store
        .declare_documents(&student.id, &[], &officer.id)
        .await;

    assert!(matches!(result, Err(InternalError::Rule(_))));
}

#[tokio::test]
async fn test_declaration_for_unknown_student_is_not_found() {
    let app = common::setup().await;
    let officer = common::seed_user(&app, "doc-officer", Role::DocumentOfficer).await;
    common::seed_academics(&app, 10_000).await;
    let required = common::required_document_type_ids(&app).await;

    let result = app
        .document_store
        .declare_documents("no-such-student", &[declare(&required[0], true)], &officer.id)
        .await;

    assert!(matches!(result, Err(InternalError::NotFound { .. })));
}

async fn student_at_fee_pending(
    app: &admissions_backend::AppData,
    officer_id: &str,
    offering_id: &str,
) -> String {
    let student = common::seed_student(app, offering_id, officer_id).await;
    let required = common::required_document_type_ids(app).await;
    let entries: Vec<_> = required.iter().map(|id| declare(id, true)).collect();
    app.document_store
        .declare_documents(&student.id, &entries, officer_id)
        .await
        .expect("declaration should succeed");
    student.id
}

#[tokio::test]
async fn test_partial_payment_moves_to_fee_partial() {
    let app = common::setup().await;
    let accounts = common::seed_user(&app, "accounts", Role::AccountsOfficer).await;
    let fixture = common::seed_academics(&app, 10_000).await;
    let student_id = student_at_fee_pending(&app, &accounts.id, &fixture.offering_id).await;

    let (recorded, status) = app
        .fee_store
        .record_payment(&student_id, payment("RCPT-001", 4_000), &accounts.id)
        .await
        .expect("payment should succeed");

    assert_eq!(recorded.amount, 4_000);
    assert_eq!(status, AdmissionStatus::FeePartial);

    let summary = app.fee_store.fee_summary(&student_id).await.unwrap();
    assert_eq!(summary.total_paid, 4_000);
    assert_eq!(summary.balance, 6_000);
}

#[tokio::test]
async fn test_full_payment_reaches_fee_received_and_admit_succeeds() {
    let app = common::setup().await;
    let accounts = common::seed_user(&app, "accounts", Role::AccountsOfficer).await;
    let admin = common::seed_user(&app, "admin", Role::Admin).await;
    let fixture = common::seed_academics(&app, 10_000).await;
    let student_id = student_at_fee_pending(&app, &accounts.id, &fixture.offering_id).await;

    let (_, status) = app
        .fee_store
        .record_payment(&student_id, payment("RCPT-001", 4_000), &accounts.id)
        .await
        .unwrap();
    assert_eq!(status, AdmissionStatus::FeePartial);

    let (_, status) = app
        .fee_store
        .record_payment(&student_id, payment("RCPT-002", 6_000), &accounts.id)
        .await
        .unwrap();
    assert_eq!(status, AdmissionStatus::FeeReceived);

    let admitted = app
        .student_store
        .admit_student(&student_id, &admin.id)
        .await
        .expect("admit should succeed");
    assert_eq!(admitted.status, "ADMITTED");
}

#[tokio::test]
async fn test_admit_before_fee_received_is_rejected() {
    let app = common::setup().await;
    let accounts = common::seed_user(&app, "accounts", Role::AccountsOfficer).await;
    let admin = common::seed_user(&app, "admin", Role::Admin).await;
    let fixture = common::seed_academics(&app, 10_000).await;
    let student_id = student_at_fee_pending(&app, &accounts.id, &fixture.offering_id).await;

    app.fee_store
        .record_payment(&student_id, payment("RCPT-001", 4_000), &accounts.id)
        .await
        .unwrap();

    let result = app.student_store.admit_student(&student_id, &admin.id).await;
    assert!(matches!(result, Err(InternalError::Rule(_))));
}

#[tokio::test]
async fn test_duplicate_receipt_number_is_a_conflict() {
    let app = common::setup().await;
    let accounts = common::seed_user(&app, "accounts", Role::AccountsOfficer).await;
    let fixture = common::seed_academics(&app, 10_000).await;
    let student_id = student_at_fee_pending(&app, &accounts.id, &fixture.offering_id).await;

    app.fee_store
        .record_payment(&student_id, payment("RCPT-001", 4_000), &accounts.id)
        .await
        .unwrap();
    let result = app
        .fee_store
        .record_payment(&student_id, payment("RCPT-001", 1_000), &accounts.id)
        .await;

    assert!(matches!(result, Err(InternalError::Duplicate { .. })));

    // The rejected payment must not have counted
    let summary = app.fee_store.fee_summary(&student_id).await.unwrap();
    assert_eq!(summary.total_paid, 4_000);
}

#[tokio::test]
async fn test_payment_on_admitted_student_never_regresses_status() {
    let app = common::setup().await;
    let accounts = common::seed_user(&app, "accounts", Role::AccountsOfficer).await;
    let admin = common::seed_user(&app, "admin", Role::Admin).await;
    let fixture = common::seed_academics(&app, 10_000).await;
    let student_id = student_at_fee_pending(&app, &accounts.id, &fixture.offering_id).await;

    app.fee_store
        .record_payment(&student_id, payment("RCPT-001", 10_000), &accounts.id)
        .await
        .unwrap();
    app.student_store
        .admit_student(&student_id, &admin.id)
        .await
        .unwrap();

    let (_, status) = app
        .fee_store
        .record_payment(&student_id, payment("RCPT-002", 500), &accounts.id)
        .await
        .expect("late payment is recorded");
    assert_eq!(status, AdmissionStatus::Admitted);

    let reloaded = app.student_store.get_student(&student_id).await.unwrap();
    assert_eq!(reloaded.status, "ADMITTED");
}

#[tokio::test]
async fn test_zero_amount_payment_is_rejected() {
    let app = common::setup().await;
    let accounts = common::seed_user(&app, "accounts", Role::AccountsOfficer).await;
    let fixture = common::seed_academics(&app, 10_000).await;
    let student_id = student_at_fee_pending(&app, &accounts.id, &fixture.offering_id).await;

    let result = app
        .fee_store
        .record_payment(&student_id, payment("RCPT-001", 0), &accounts.id)
        .await;

    assert!(matches!(result, Err(InternalError::Rule(_))));
}
