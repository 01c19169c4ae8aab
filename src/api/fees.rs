use std::sync::Arc;

use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};

use crate::api::{authenticate, CookieAuth};
use crate::auth::Capability;
use crate::errors::ApiError;
use crate::services::TokenService;
use crate::stores::{FeeStore, NewPayment};
use crate::types::dto::fee::{
    CreateAdjustmentApiResponse, CreateAdjustmentRequest, PaymentResponse,
    RecordPaymentApiResponse, RecordPaymentRequest, RecordPaymentResponse,
};

/// Fee adjustment and payment endpoints
pub struct FeesApi {
    fee_store: Arc<FeeStore>,
    token_service: Arc<TokenService>,
}

impl FeesApi {
    pub fn new(fee_store: Arc<FeeStore>, token_service: Arc<TokenService>) -> Self {
        Self {
            fee_store,
            token_service,
        }
    }
}

#[derive(Tags)]
enum FeeTags {
    /// Fee adjustments and payments
    Fees,
}

#[OpenApi(prefix_path = "/")]
impl FeesApi {
    /// Apply a fee adjustment for a student before any payment exists
    #[oai(
        path = "/students/:student_id/fee-adjustments",
        method = "post",
        tag = "FeeTags::Fees"
    )]
    async fn apply_adjustment(
        &self,
        auth: CookieAuth,
        student_id: Path<String>,
        body: Json<CreateAdjustmentRequest>,
    ) -> Result<CreateAdjustmentApiResponse, ApiError> {
        let principal = authenticate(&self.token_service, &auth)?;
        principal.authorize(Capability::AdjustFees)?;

        let body = body.0;
        let adjustment = self
            .fee_store
            .apply_adjustment(
                &student_id.0,
                body.adjusted_fee,
                &body.reason,
                body.approval_note,
                &principal.id,
            )
            .await?;
        Ok(CreateAdjustmentApiResponse::Created(Json(adjustment.into())))
    }

    /// Record a payment, advancing the admission status when fees clear
    #[oai(
        path = "/students/:student_id/payments",
        method = "post",
        tag = "FeeTags::Fees"
    )]
    async fn record_payment(
        &self,
        auth: CookieAuth,
        student_id: Path<String>,
        body: Json<RecordPaymentRequest>,
    ) -> Result<RecordPaymentApiResponse, ApiError> {
        let principal = authenticate(&self.token_service, &auth)?;
        principal.authorize(Capability::RecordPayments)?;

        let body = body.0;
        let (payment, status) = self
            .fee_store
            .record_payment(
                &student_id.0,
                NewPayment {
                    amount: body.amount,
                    mode: body.mode,
                    reference: body.reference,
                    receipt_number: body.receipt_number,
                    payment_date: body.payment_date,
                },
                &principal.id,
            )
            .await?;

        Ok(RecordPaymentApiResponse::Created(Json(RecordPaymentResponse {
            payment: payment.into(),
            status: status.as_str().to_string(),
        })))
    }

    /// List every recorded payment
    #[oai(path = "/payments", method = "get", tag = "FeeTags::Fees")]
    async fn list_payments(
        &self,
        auth: CookieAuth,
    ) -> Result<Json<Vec<PaymentResponse>>, ApiError> {
        let principal = authenticate(&self.token_service, &auth)?;
        principal.authorize(Capability::ViewPayments)?;

        let payments = self.fee_store.list_payments().await?;
        Ok(Json(payments.into_iter().map(PaymentResponse::from).collect()))
    }
}
