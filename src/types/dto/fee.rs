use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::{Deserialize, Serialize};

use crate::stores::FeeSummary;
use crate::types::db::{fee_adjustment, fee_payment};

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct FeeSummaryResponse {
    pub student_id: String,
    pub original_fee: i64,
    pub adjusted_fee: Option<i64>,
    pub effective_fee: i64,
    pub total_paid: i64,
    pub balance: i64,
}

impl From<FeeSummary> for FeeSummaryResponse {
    fn from(s: FeeSummary) -> Self {
        Self {
            student_id: s.student_id,
            original_fee: s.original_fee,
            adjusted_fee: s.adjusted_fee,
            effective_fee: s.effective_fee,
            total_paid: s.total_paid,
            balance: s.balance,
        }
    }
}

/// Request model for applying a fee adjustment
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateAdjustmentRequest {
    /// New total fee; must be >= 0 and below the original fee
    pub adjusted_fee: i64,

    /// Why the discount is being granted
    pub reason: String,

    pub approval_note: Option<String>,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct AdjustmentResponse {
    pub id: String,
    pub student_id: String,
    pub original_fee: i64,
    pub adjusted_fee: i64,
    pub discount_amount: i64,
    pub discount_percentage: f64,
    pub reason: String,
    pub approval_note: Option<String>,
    pub applied_by: String,
    pub is_active: bool,
    pub created_at: i64,
}

impl From<fee_adjustment::Model> for AdjustmentResponse {
    fn from(a: fee_adjustment::Model) -> Self {
        Self {
            id: a.id,
            student_id: a.student_id,
            original_fee: a.original_fee,
            adjusted_fee: a.adjusted_fee,
            discount_amount: a.discount_amount,
            discount_percentage: a.discount_percentage,
            reason: a.reason,
            approval_note: a.approval_note,
            applied_by: a.applied_by,
            is_active: a.is_active,
            created_at: a.created_at,
        }
    }
}

#[derive(ApiResponse)]
pub enum CreateAdjustmentApiResponse {
    /// Fee adjustment applied
    #[oai(status = 201)]
    Created(Json<AdjustmentResponse>),
}

/// Request model for recording a payment
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RecordPaymentRequest {
    /// Amount in whole currency units, > 0
    pub amount: i64,

    /// Payment mode, e.g. "CASH", "UPI", "BANK_TRANSFER"
    pub mode: String,

    /// External reference (transaction id, cheque number)
    pub reference: Option<String>,

    /// Unique receipt number
    pub receipt_number: String,

    /// Payment date (ISO 8601 date)
    pub payment_date: String,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct PaymentResponse {
    pub id: String,
    pub student_id: String,
    pub amount: i64,
    pub mode: String,
    pub reference: Option<String>,
    pub receipt_number: String,
    pub payment_date: String,
    pub recorded_by: String,
    pub created_at: i64,
}

impl From<fee_payment::Model> for PaymentResponse {
    fn from(p: fee_payment::Model) -> Self {
        Self {
            id: p.id,
            student_id: p.student_id,
            amount: p.amount,
            mode: p.mode,
            reference: p.reference,
            receipt_number: p.receipt_number,
            payment_date: p.payment_date,
            recorded_by: p.recorded_by,
            created_at: p.created_at,
        }
    }
}

/// Payment plus the admission status it produced
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RecordPaymentResponse {
    pub payment: PaymentResponse,

    /// Admission status after the payment
    pub status: String,
}

#[derive(ApiResponse)]
pub enum RecordPaymentApiResponse {
    /// Payment recorded
    #[oai(status = 201)]
    Created(Json<RecordPaymentResponse>),
}
