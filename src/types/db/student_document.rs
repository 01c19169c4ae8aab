use sea_orm::entity::prelude::*;

/// Declaration record for a (student, document type) pair, unique together.
/// Re-submission overwrites in place; no history is retained.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_documents")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub student_id: String,
    pub document_type_id: String,
    pub declared: bool,
    pub notes: Option<String>,
    pub added_by: String,
    pub added_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
