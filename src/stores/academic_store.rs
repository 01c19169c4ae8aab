use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::types::db::{academic_year, course, course_offering, fee_structure, student};

/// AcademicStore manages reference data: academic years, courses, course
/// offerings and fee structures.
pub struct AcademicStore {
    db: DatabaseConnection,
}

impl AcademicStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    // --- academic years ---

    pub async fn create_year(
        &self,
        year_label: &str,
        start_year: i32,
    ) -> Result<academic_year::Model, InternalError> {
        let new_year = academic_year::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            year_label: Set(year_label.to_string()),
            start_year: Set(start_year),
            is_active: Set(false),
            created_at: Set(Utc::now().timestamp()),
        };

        new_year.insert(&self.db).await.map_err(|e| {
            if InternalError::is_unique_violation(&e) {
                InternalError::duplicate("academic year")
            } else {
                InternalError::database("insert_academic_year", e)
            }
        })
    }

    pub async fn list_years(&self) -> Result<Vec<academic_year::Model>, InternalError> {
        academic_year::Entity::find()
            .order_by_desc(academic_year::Column::StartYear)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_academic_years", e))
    }

    /// Activate one academic year, deactivating all others in the same
    /// transaction (the "one active year" convention lives on this write
    /// path, not in the schema).
    pub async fn activate_year(&self, id: &str) -> Result<academic_year::Model, InternalError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| InternalError::database("begin_activate_year", e))?;

        let year = academic_year::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| InternalError::database("get_academic_year", e))?
            .ok_or(InternalError::not_found("academic year"))?;

        academic_year::Entity::update_many()
            .col_expr(academic_year::Column::IsActive, Expr::value(false))
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("deactivate_academic_years", e))?;

        let mut active: academic_year::ActiveModel = year.into();
        active.is_active = Set(true);
        let updated = active
            .update(&txn)
            .await
            .map_err(|e| InternalError::database("activate_academic_year", e))?;

        txn.commit()
            .await
            .map_err(|e| InternalError::database("commit_activate_year", e))?;

        Ok(updated)
    }

    /// Delete an academic year.
    ///
    /// Rejected while the year is active, has course offerings, or has
    /// enrolled students - each a distinct failure.
    pub async fn delete_year(&self, id: &str) -> Result<(), InternalError> {
        let year = academic_year::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_academic_year", e))?
            .ok_or(InternalError::not_found("academic year"))?;

        if year.is_active {
            return Err(InternalError::rule(
                "Cannot delete the active academic year",
            ));
        }

        let offerings = course_offering::Entity::find()
            .filter(course_offering::Column::AcademicYearId.eq(id))
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_course_offerings", e))?;
        if offerings > 0 {
            return Err(InternalError::rule(
                "Cannot delete an academic year with course offerings",
            ));
        }

        let students = student::Entity::find()
            .filter(student::Column::AcademicYearId.eq(id))
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_students", e))?;
        if students > 0 {
            return Err(InternalError::rule(
                "Cannot delete an academic year with enrolled students",
            ));
        }

        year.delete(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_academic_year", e))?;

        Ok(())
    }

    // --- courses ---

    pub async fn create_course(
        &self,
        code: &str,
        name: &str,
        duration_years: i32,
    ) -> Result<course::Model, InternalError> {
        let new_course = course::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            code: Set(code.to_string()),
            name: Set(name.to_string()),
            duration_years: Set(duration_years),
            created_at: Set(Utc::now().timestamp()),
        };

        new_course.insert(&self.db).await.map_err(|e| {
            if InternalError::is_unique_violation(&e) {
                InternalError::duplicate("course code")
            } else {
                InternalError::database("insert_course", e)
            }
        })
    }

    pub async fn list_courses(&self) -> Result<Vec<course::Model>, InternalError> {
        course::Entity::find()
            .order_by_asc(course::Column::Code)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_courses", e))
    }

    // --- course offerings ---

    pub async fn create_offering(
        &self,
        course_id: &str,
        academic_year_id: &str,
        seats: i32,
    ) -> Result<course_offering::Model, InternalError> {
        course::Entity::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_course", e))?
            .ok_or(InternalError::not_found("course"))?;

        academic_year::Entity::find_by_id(academic_year_id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_academic_year", e))?
            .ok_or(InternalError::not_found("academic year"))?;

        let new_offering = course_offering::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            course_id: Set(course_id.to_string()),
            academic_year_id: Set(academic_year_id.to_string()),
            seats: Set(seats),
            created_at: Set(Utc::now().timestamp()),
        };

        new_offering.insert(&self.db).await.map_err(|e| {
            if InternalError::is_unique_violation(&e) {
                InternalError::duplicate("course offering")
            } else {
                InternalError::database("insert_course_offering", e)
            }
        })
    }

    pub async fn list_offerings(&self) -> Result<Vec<course_offering::Model>, InternalError> {
        course_offering::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_course_offerings", e))
    }

    // --- fee structures ---

    pub async fn create_fee_structure(
        &self,
        course_offering_id: &str,
        total_fee: i64,
    ) -> Result<fee_structure::Model, InternalError> {
        course_offering::Entity::find_by_id(course_offering_id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_course_offering", e))?
            .ok_or(InternalError::not_found("course offering"))?;

        if total_fee < 0 {
            return Err(InternalError::rule("Total fee cannot be negative"));
        }

        let new_structure = fee_structure::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            course_offering_id: Set(course_offering_id.to_string()),
            total_fee: Set(total_fee),
            created_at: Set(Utc::now().timestamp()),
        };

        new_structure.insert(&self.db).await.map_err(|e| {
            if InternalError::is_unique_violation(&e) {
                InternalError::duplicate("fee structure for this offering")
            } else {
                InternalError::database("insert_fee_structure", e)
            }
        })
    }

    pub async fn list_fee_structures(&self) -> Result<Vec<fee_structure::Model>, InternalError> {
        fee_structure::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_fee_structures", e))
    }
}
