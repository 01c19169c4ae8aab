use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::lifecycle::AdmissionStatus;
use crate::stores::AuditStore;
use crate::types::db::{academic_year, course_offering, student};

/// Fields supplied when entering a new application
pub struct NewStudent {
    pub full_name: String,
    pub date_of_birth: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub guardian_name: Option<String>,
    pub course_offering_id: String,
}

/// StudentStore manages student records and the explicit admit operation.
/// Document- and fee-driven status changes live in DocumentStore/FeeStore.
pub struct StudentStore {
    db: DatabaseConnection,
    audit_store: Arc<AuditStore>,
}

impl StudentStore {
    pub fn new(db: DatabaseConnection, audit_store: Arc<AuditStore>) -> Self {
        Self { db, audit_store }
    }

    /// Enter a new application.
    ///
    /// The application number is generated inside the transaction as
    /// `APP<start_year><4-digit sequence>`, sequenced per academic year;
    /// the unique constraint on application_number backstops the rare race
    /// between two concurrent entries.
    pub async fn create_student(
        &self,
        new: NewStudent,
        created_by: &str,
    ) -> Result<student::Model, InternalError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| InternalError::database("begin_create_student", e))?;

        let offering = course_offering::Entity::find_by_id(&new.course_offering_id)
            .one(&txn)
            .await
            .map_err(|e| InternalError::database("get_course_offering", e))?
            .ok_or(InternalError::not_found("course offering"))?;

        let year = academic_year::Entity::find_by_id(&offering.academic_year_id)
            .one(&txn)
            .await
            .map_err(|e| InternalError::database("get_academic_year", e))?
            .ok_or(InternalError::not_found("academic year"))?;

        let sequence = student::Entity::find()
            .filter(student::Column::AcademicYearId.eq(&year.id))
            .count(&txn)
            .await
            .map_err(|e| InternalError::database("count_students", e))?
            + 1;
        let application_number = format!("APP{}{:04}", year.start_year, sequence);

        let now = Utc::now().timestamp();
        let new_student = student::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            application_number: Set(application_number),
            full_name: Set(new.full_name),
            date_of_birth: Set(new.date_of_birth),
            phone: Set(new.phone),
            email: Set(new.email),
            guardian_name: Set(new.guardian_name),
            course_offering_id: Set(offering.id),
            academic_year_id: Set(year.id),
            status: Set(AdmissionStatus::ApplicationEntered.as_str().to_string()),
            created_by: Set(created_by.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = new_student.insert(&txn).await.map_err(|e| {
            if InternalError::is_unique_violation(&e) {
                InternalError::duplicate("application number")
            } else {
                InternalError::database("insert_student", e)
            }
        })?;

        self.audit_store
            .record(
                &txn,
                created_by,
                "student_created",
                "student",
                &created.id,
                serde_json::json!({
                    "application_number": created.application_number,
                    "full_name": created.full_name,
                }),
            )
            .await?;

        txn.commit()
            .await
            .map_err(|e| InternalError::database("commit_create_student", e))?;

        Ok(created)
    }

    pub async fn get_student(&self, id: &str) -> Result<student::Model, InternalError> {
        student::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_student", e))?
            .ok_or(InternalError::not_found("student"))
    }

    pub async fn list_students(&self) -> Result<Vec<student::Model>, InternalError> {
        student::Entity::find()
            .order_by_asc(student::Column::ApplicationNumber)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_students", e))
    }

    /// Mark a student ADMITTED. Allowed only from FEE_RECEIVED.
    pub async fn admit_student(
        &self,
        id: &str,
        actor_id: &str,
    ) -> Result<student::Model, InternalError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| InternalError::database("begin_admit_student", e))?;

        let student = student::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| InternalError::database("get_student", e))?
            .ok_or(InternalError::not_found("student"))?;

        let status = AdmissionStatus::parse(&student.status)
            .ok_or_else(|| InternalError::State(format!("unknown status {}", student.status)))?;

        if status != AdmissionStatus::FeeReceived {
            return Err(InternalError::rule(
                "Student can only be admitted once the full fee is received",
            ));
        }

        let mut active: student::ActiveModel = student.into();
        active.status = Set(AdmissionStatus::Admitted.as_str().to_string());
        active.updated_at = Set(Utc::now().timestamp());
        let updated = active
            .update(&txn)
            .await
            .map_err(|e| InternalError::database("admit_student", e))?;

        self.audit_store
            .record(
                &txn,
                actor_id,
                "status_change",
                "student",
                id,
                serde_json::json!({
                    "old_status": AdmissionStatus::FeeReceived.as_str(),
                    "new_status": AdmissionStatus::Admitted.as_str(),
                }),
            )
            .await?;

        txn.commit()
            .await
            .map_err(|e| InternalError::database("commit_admit_student", e))?;

        Ok(updated)
    }
}
