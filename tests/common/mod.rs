// Shared fixtures for the integration suites
#![allow(dead_code)]

use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use sea_orm::Database;

use admissions_backend::app_data::AppData;
use admissions_backend::auth::Role;
use admissions_backend::config::BootstrapSettings;
use admissions_backend::stores::NewStudent;
use admissions_backend::types::db::{student, user};

pub const JWT_SECRET: &str = "test-secret-key-minimum-32-characters-long";
pub const PASSWORD_PEPPER: &str = "test-pepper-also-minimum-32-chars-long";

fn test_settings() -> BootstrapSettings {
    BootstrapSettings {
        database_url: "sqlite::memory:".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        jwt_secret: JWT_SECRET.to_string(),
        password_pepper: PASSWORD_PEPPER.to_string(),
        bootstrap_admin_password: None,
        bootstrap_admin_username: "superadmin".to_string(),
    }
}

/// Fresh in-memory database with migrations applied, wrapped in AppData
pub async fn setup() -> Arc<AppData> {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    Arc::new(AppData::init(db, &test_settings()))
}

/// Create a user with the given role; password is always "password-123"
pub async fn seed_user(app: &AppData, username: &str, role: Role) -> user::Model {
    app.user_store
        .create_user(
            username,
            &format!("{}@school.test", username),
            "password-123",
            role,
            "seed",
        )
        .await
        .expect("Failed to seed user")
}

/// Ids of the academic scaffolding one student enrollment needs
pub struct AcademicFixture {
    pub year_id: String,
    pub course_id: String,
    pub offering_id: String,
}

/// One academic year (2025-26), one course, one offering with a fee structure
pub async fn seed_academics(app: &AppData, total_fee: i64) -> AcademicFixture {
    let year = app
        .academic_store
        .create_year("2025-26", 2025)
        .await
        .expect("Failed to seed academic year");
    let course = app
        .academic_store
        .create_course("BSC-CS", "BSc Computer Science", 3)
        .await
        .expect("Failed to seed course");
    let offering = app
        .academic_store
        .create_offering(&course.id, &year.id, 60)
        .await
        .expect("Failed to seed offering");
    app.academic_store
        .create_fee_structure(&offering.id, total_fee)
        .await
        .expect("Failed to seed fee structure");

    AcademicFixture {
        year_id: year.id,
        course_id: course.id,
        offering_id: offering.id,
    }
}

pub async fn seed_student(app: &AppData, offering_id: &str, created_by: &str) -> student::Model {
    app.student_store
        .create_student(
            NewStudent {
                full_name: "Asha Verma".to_string(),
                date_of_birth: Some("2007-06-15".to_string()),
                phone: Some("9876500001".to_string()),
                email: None,
                guardian_name: Some("R. Verma".to_string()),
                course_offering_id: offering_id.to_string(),
            },
            created_by,
        )
        .await
        .expect("Failed to seed student")
}

/// Ids of the seeded document types that are required, in display order
pub async fn required_document_type_ids(app: &AppData) -> Vec<String> {
    app.document_store
        .list_document_types()
        .await
        .expect("Failed to list document types")
        .into_iter()
        .filter(|t| t.is_required)
        .map(|t| t.id)
        .collect()
}

/// Id of one seeded optional document type
pub async fn optional_document_type_id(app: &AppData) -> String {
    app.document_store
        .list_document_types()
        .await
        .expect("Failed to list document types")
        .into_iter()
        .find(|t| !t.is_required)
        .map(|t| t.id)
        .expect("Seeded data should include an optional document type")
}
