use sea_orm::entity::prelude::*;

/// One-time pre-payment discount. At most one row with is_active = true per
/// student, enforced by a partial unique index as the race backstop.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "fee_adjustments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
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

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
