use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::lifecycle::{advance_on_payment, AdmissionStatus};
use crate::stores::AuditStore;
use crate::types::db::{fee_adjustment, fee_payment, fee_structure, student};

/// Read-side fee position for one student
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeSummary {
    pub student_id: String,
    pub original_fee: i64,
    pub adjusted_fee: Option<i64>,
    pub effective_fee: i64,
    pub total_paid: i64,
    pub balance: i64,
}

/// Fields supplied when recording a payment
pub struct NewPayment {
    pub amount: i64,
    pub mode: String,
    pub reference: Option<String>,
    pub receipt_number: String,
    pub payment_date: String,
}

/// FeeStore manages fee adjustments, payments and the fee-driven part of
/// the admission lifecycle.
pub struct FeeStore {
    db: DatabaseConnection,
    audit_store: Arc<AuditStore>,
}

impl FeeStore {
    pub fn new(db: DatabaseConnection, audit_store: Arc<AuditStore>) -> Self {
        Self { db, audit_store }
    }

    pub async fn fee_summary(&self, student_id: &str) -> Result<FeeSummary, InternalError> {
        let student = student::Entity::find_by_id(student_id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_student", e))?
            .ok_or(InternalError::not_found("student"))?;

        compute_summary(&self.db, &student).await
    }

    /// Apply a one-time pre-payment discount.
    ///
    /// Preconditions, checked in order, each a distinct failure:
    /// a non-empty reason, 0 <= adjusted_fee < original fee, zero payments
    /// recorded so far, and no existing active adjustment. The partial
    /// unique index on (student_id) WHERE is_active backstops the last
    /// check under concurrent submission. The caller is responsible for
    /// the role check (AccountsOfficer only).
    pub async fn apply_adjustment(
        &self,
        student_id: &str,
        adjusted_fee: i64,
        reason: &str,
        approval_note: Option<String>,
        actor_id: &str,
    ) -> Result<fee_adjustment::Model, InternalError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| InternalError::database("begin_apply_adjustment", e))?;

        let student = student::Entity::find_by_id(student_id)
            .one(&txn)
            .await
            .map_err(|e| InternalError::database("get_student", e))?
            .ok_or(InternalError::not_found("student"))?;

        if reason.trim().is_empty() {
            return Err(InternalError::rule("Reason is required"));
        }

        let summary = compute_summary(&txn, &student).await?;

        if adjusted_fee < 0 {
            return Err(InternalError::rule("Adjusted fee cannot be negative"));
        }
        if adjusted_fee >= summary.original_fee {
            return Err(InternalError::rule(
                "Adjusted fee must be less than the original fee",
            ));
        }

        if summary.total_paid > 0 {
            return Err(InternalError::rule(
                "Cannot adjust fee after payments have been recorded",
            ));
        }

        let existing = fee_adjustment::Entity::find()
            .filter(fee_adjustment::Column::StudentId.eq(student_id))
            .filter(fee_adjustment::Column::IsActive.eq(true))
            .one(&txn)
            .await
            .map_err(|e| InternalError::database("get_active_adjustment", e))?;
        if existing.is_some() {
            return Err(InternalError::duplicate("active fee adjustment"));
        }

        let discount_amount = summary.original_fee - adjusted_fee;
        let discount_percentage = discount_amount as f64 / summary.original_fee as f64 * 100.0;

        let new_adjustment = fee_adjustment::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            student_id: Set(student_id.to_string()),
            original_fee: Set(summary.original_fee),
            adjusted_fee: Set(adjusted_fee),
            discount_amount: Set(discount_amount),
            discount_percentage: Set(discount_percentage),
            reason: Set(reason.trim().to_string()),
            approval_note: Set(approval_note),
            applied_by: Set(actor_id.to_string()),
            is_active: Set(true),
            created_at: Set(Utc::now().timestamp()),
        };

        let created = new_adjustment.insert(&txn).await.map_err(|e| {
            // The pre-check can race; the partial unique index decides
            if InternalError::is_unique_violation(&e) {
                InternalError::duplicate("active fee adjustment")
            } else {
                InternalError::database("insert_fee_adjustment", e)
            }
        })?;

        self.audit_store
            .record(
                &txn,
                actor_id,
                "fee_adjusted",
                "student",
                student_id,
                serde_json::json!({
                    "original_fee": summary.original_fee,
                    "adjusted_fee": adjusted_fee,
                    "reason": created.reason,
                }),
            )
            .await?;

        txn.commit()
            .await
            .map_err(|e| InternalError::database("commit_apply_adjustment", e))?;

        Ok(created)
    }

    /// Record a payment and advance the fee-driven status.
    ///
    /// Insert, recount of totals, and status write share one transaction;
    /// a duplicate receipt number surfaces as a conflict.
    pub async fn record_payment(
        &self,
        student_id: &str,
        new: NewPayment,
        actor_id: &str,
    ) -> Result<(fee_payment::Model, AdmissionStatus), InternalError> {
        if new.amount <= 0 {
            return Err(InternalError::rule("Payment amount must be positive"));
        }
        if new.receipt_number.trim().is_empty() {
            return Err(InternalError::rule("Receipt number is required"));
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| InternalError::database("begin_record_payment", e))?;

        let student = student::Entity::find_by_id(student_id)
            .one(&txn)
            .await
            .map_err(|e| InternalError::database("get_student", e))?
            .ok_or(InternalError::not_found("student"))?;

        let payment = fee_payment::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            student_id: Set(student_id.to_string()),
            amount: Set(new.amount),
            mode: Set(new.mode),
            reference: Set(new.reference),
            receipt_number: Set(new.receipt_number.trim().to_string()),
            payment_date: Set(new.payment_date),
            recorded_by: Set(actor_id.to_string()),
            created_at: Set(Utc::now().timestamp()),
        };

        let created = payment.insert(&txn).await.map_err(|e| {
            if InternalError::is_unique_violation(&e) {
                InternalError::duplicate("receipt number")
            } else {
                InternalError::database("insert_fee_payment", e)
            }
        })?;

        // Totals include the payment just inserted
        let summary = compute_summary(&txn, &student).await?;

        let current = AdmissionStatus::parse(&student.status)
            .ok_or_else(|| InternalError::State(format!("unknown status {}", student.status)))?;

        let next = advance_on_payment(current, summary.total_paid, summary.effective_fee);
        if let Some(next) = next {
            let mut active: student::ActiveModel = student.into();
            active.status = Set(next.as_str().to_string());
            active.updated_at = Set(Utc::now().timestamp());
            active
                .update(&txn)
                .await
                .map_err(|e| InternalError::database("update_student_status", e))?;

            self.audit_store
                .record(
                    &txn,
                    actor_id,
                    "status_change",
                    "student",
                    student_id,
                    serde_json::json!({
                        "old_status": current.as_str(),
                        "new_status": next.as_str(),
                        "total_paid": summary.total_paid,
                        "effective_fee": summary.effective_fee,
                    }),
                )
                .await?;
        }

        txn.commit()
            .await
            .map_err(|e| InternalError::database("commit_record_payment", e))?;

        Ok((created, next.unwrap_or(current)))
    }

    pub async fn list_payments(&self) -> Result<Vec<fee_payment::Model>, InternalError> {
        fee_payment::Entity::find()
            .order_by_desc(fee_payment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_payments", e))
    }
}

/// Derive the student's fee position from the fee structure, the active
/// adjustment (if any), and the payments recorded so far.
async fn compute_summary<C: ConnectionTrait>(
    conn: &C,
    student: &student::Model,
) -> Result<FeeSummary, InternalError> {
    let original_fee = fee_structure::Entity::find()
        .filter(fee_structure::Column::CourseOfferingId.eq(&student.course_offering_id))
        .one(conn)
        .await
        .map_err(|e| InternalError::database("get_fee_structure", e))?
        .map(|fs| fs.total_fee)
        .unwrap_or(0);

    let adjusted_fee = fee_adjustment::Entity::find()
        .filter(fee_adjustment::Column::StudentId.eq(&student.id))
        .filter(fee_adjustment::Column::IsActive.eq(true))
        .one(conn)
        .await
        .map_err(|e| InternalError::database("get_active_adjustment", e))?
        .map(|adj| adj.adjusted_fee);

    let total_paid: i64 = fee_payment::Entity::find()
        .filter(fee_payment::Column::StudentId.eq(&student.id))
        .all(conn)
        .await
        .map_err(|e| InternalError::database("list_student_payments", e))?
        .iter()
        .map(|p| p.amount)
        .sum();

    let effective_fee = adjusted_fee.unwrap_or(original_fee);

    Ok(FeeSummary {
        student_id: student.id.clone(),
        original_fee,
        adjusted_fee,
        effective_fee,
        total_paid,
        balance: effective_fee - total_paid,
    })
}
