use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::{Deserialize, Serialize};

use crate::stores::document_store::DeclarationOutcome;
use crate::types::db::{document_type, student_document};

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct DocumentTypeResponse {
    pub id: String,
    pub code: String,
    pub name: String,
    pub is_required: bool,
    pub display_order: i32,
}

impl From<document_type::Model> for DocumentTypeResponse {
    fn from(t: document_type::Model) -> Self {
        Self {
            id: t.id,
            code: t.code,
            name: t.name,
            is_required: t.is_required,
            display_order: t.display_order,
        }
    }
}

/// Request model for document type creation
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateDocumentTypeRequest {
    pub code: String,
    pub name: String,
    pub is_required: bool,
    pub display_order: i32,
}

#[derive(ApiResponse)]
pub enum CreateDocumentTypeApiResponse {
    /// Document type created
    #[oai(status = 201)]
    Created(Json<DocumentTypeResponse>),
}

/// One document declaration
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct DeclareDocumentRequest {
    pub document_type_id: String,

    /// true = applicant has submitted this document type
    pub declared: bool,

    pub notes: Option<String>,
}

/// Request model for bulk declaration
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct BulkDeclareRequest {
    pub documents: Vec<DeclareDocumentRequest>,
}

/// Result of a declaration write: the recount and resulting status
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct DeclarationResponse {
    /// Admission status after the recount
    pub status: String,

    /// Whether this write changed the status
    pub status_changed: bool,

    pub declared_count: u64,
    pub total_required: u64,
}

impl From<DeclarationOutcome> for DeclarationResponse {
    fn from(outcome: DeclarationOutcome) -> Self {
        Self {
            status: outcome.status.as_str().to_string(),
            status_changed: outcome.status_changed,
            declared_count: outcome.declared_count,
            total_required: outcome.total_required,
        }
    }
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct StudentDocumentResponse {
    pub id: String,
    pub student_id: String,
    pub document_type_id: String,
    pub declared: bool,
    pub notes: Option<String>,
    pub added_by: String,
    pub added_at: i64,
}

impl From<student_document::Model> for StudentDocumentResponse {
    fn from(d: student_document::Model) -> Self {
        Self {
            id: d.id,
            student_id: d.student_id,
            document_type_id: d.document_type_id,
            declared: d.declared,
            notes: d.notes,
            added_by: d.added_by,
            added_at: d.added_at,
        }
    }
}
