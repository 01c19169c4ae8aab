use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::lifecycle::{recompute_document_status, AdmissionStatus};
use crate::stores::AuditStore;
use crate::types::db::{document_type, student, student_document};

/// One declaration in a submission batch
#[derive(Debug, Clone)]
pub struct DocumentDeclaration {
    pub document_type_id: String,
    pub declared: bool,
    pub notes: Option<String>,
}

/// Result of a declaration batch: the recount and the status it produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationOutcome {
    pub status: AdmissionStatus,
    pub status_changed: bool,
    pub declared_count: u64,
    pub total_required: u64,
}

/// DocumentStore manages document-type reference data and the declaration
/// writes that drive the document stage of the admission lifecycle.
pub struct DocumentStore {
    db: DatabaseConnection,
    audit_store: Arc<AuditStore>,
}

impl DocumentStore {
    pub fn new(db: DatabaseConnection, audit_store: Arc<AuditStore>) -> Self {
        Self { db, audit_store }
    }

    pub async fn create_document_type(
        &self,
        code: &str,
        name: &str,
        is_required: bool,
        display_order: i32,
    ) -> Result<document_type::Model, InternalError> {
        let new_type = document_type::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            code: Set(code.to_string()),
            name: Set(name.to_string()),
            is_required: Set(is_required),
            display_order: Set(display_order),
        };

        new_type.insert(&self.db).await.map_err(|e| {
            if InternalError::is_unique_violation(&e) {
                InternalError::duplicate("document type code")
            } else {
                InternalError::database("insert_document_type", e)
            }
        })
    }

    pub async fn list_document_types(&self) -> Result<Vec<document_type::Model>, InternalError> {
        document_type::Entity::find()
            .order_by_asc(document_type::Column::DisplayOrder)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_document_types", e))
    }

    pub async fn list_student_documents(
        &self,
        student_id: &str,
    ) -> Result<Vec<student_document::Model>, InternalError> {
        student::Entity::find_by_id(student_id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_student", e))?
            .ok_or(InternalError::not_found("student"))?;

        student_document::Entity::find()
            .filter(student_document::Column::StudentId.eq(student_id))
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_student_documents", e))
    }

    /// Upsert a batch of declarations and recompute the student's status.
    ///
    /// Single-document and bulk submission both come through here: the
    /// upserts and exactly one recount run in one transaction, so a batch
    /// produces one consistent status write, and a failure anywhere rolls
    /// the whole batch back.
    pub async fn declare_documents(
        &self,
        student_id: &str,
        entries: &[DocumentDeclaration],
        actor_id: &str,
    ) -> Result<DeclarationOutcome, InternalError> {
        if entries.is_empty() {
            return Err(InternalError::rule(
                "At least one document entry is required",
            ));
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| InternalError::database("begin_declare_documents", e))?;

        let student = student::Entity::find_by_id(student_id)
            .one(&txn)
            .await
            .map_err(|e| InternalError::database("get_student", e))?
            .ok_or(InternalError::not_found("student"))?;

        for entry in entries {
            self.upsert_declaration(&txn, student_id, entry, actor_id)
                .await?;
        }

        let (declared_count, total_required) = recount(&txn, student_id).await?;

        let current = AdmissionStatus::parse(&student.status)
            .ok_or_else(|| InternalError::State(format!("unknown status {}", student.status)))?;

        let next = recompute_document_status(current, declared_count, total_required);
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
                        "declared_count": declared_count,
                        "total_required": total_required,
                    }),
                )
                .await?;
        }

        txn.commit()
            .await
            .map_err(|e| InternalError::database("commit_declare_documents", e))?;

        Ok(DeclarationOutcome {
            status: next.unwrap_or(current),
            status_changed: next.is_some(),
            declared_count,
            total_required,
        })
    }

    /// Insert-or-update the (student, document type) pair.
    /// Last writer wins; no declaration history is kept.
    async fn upsert_declaration<C: ConnectionTrait>(
        &self,
        conn: &C,
        student_id: &str,
        entry: &DocumentDeclaration,
        actor_id: &str,
    ) -> Result<(), InternalError> {
        document_type::Entity::find_by_id(&entry.document_type_id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("get_document_type", e))?
            .ok_or(InternalError::not_found("document type"))?;

        let existing = student_document::Entity::find()
            .filter(student_document::Column::StudentId.eq(student_id))
            .filter(student_document::Column::DocumentTypeId.eq(&entry.document_type_id))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("get_student_document", e))?;

        let now = Utc::now().timestamp();
        match existing {
            Some(row) => {
                let mut active: student_document::ActiveModel = row.into();
                active.declared = Set(entry.declared);
                active.notes = Set(entry.notes.clone());
                active.added_by = Set(actor_id.to_string());
                active.added_at = Set(now);
                active
                    .update(conn)
                    .await
                    .map_err(|e| InternalError::database("update_student_document", e))?;
            }
            None => {
                let row = student_document::ActiveModel {
                    id: Set(Uuid::new_v4().to_string()),
                    student_id: Set(student_id.to_string()),
                    document_type_id: Set(entry.document_type_id.clone()),
                    declared: Set(entry.declared),
                    notes: Set(entry.notes.clone()),
                    added_by: Set(actor_id.to_string()),
                    added_at: Set(now),
                };
                row.insert(conn).await.map_err(|e| {
                    if InternalError::is_unique_violation(&e) {
                        InternalError::duplicate("student document")
                    } else {
                        InternalError::database("insert_student_document", e)
                    }
                })?;
            }
        }

        Ok(())
    }
}

/// Count required document types vs. required types declared for the student
async fn recount<C: ConnectionTrait>(
    conn: &C,
    student_id: &str,
) -> Result<(u64, u64), InternalError> {
    let required_ids: HashSet<String> = document_type::Entity::find()
        .filter(document_type::Column::IsRequired.eq(true))
        .all(conn)
        .await
        .map_err(|e| InternalError::database("list_required_document_types", e))?
        .into_iter()
        .map(|t| t.id)
        .collect();

    let declared_rows = student_document::Entity::find()
        .filter(student_document::Column::StudentId.eq(student_id))
        .filter(student_document::Column::Declared.eq(true))
        .all(conn)
        .await
        .map_err(|e| InternalError::database("list_declared_documents", e))?;

    let declared_count = declared_rows
        .iter()
        .filter(|row| required_ids.contains(&row.document_type_id))
        .count() as u64;

    Ok((declared_count, required_ids.len() as u64))
}
