use std::sync::Arc;

use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};

use crate::api::{authenticate, CookieAuth};
use crate::auth::Capability;
use crate::errors::ApiError;
use crate::services::TokenService;
use crate::stores::{DocumentDeclaration, DocumentStore};
use crate::types::dto::document::{
    BulkDeclareRequest, CreateDocumentTypeApiResponse, CreateDocumentTypeRequest,
    DeclarationResponse, DeclareDocumentRequest, DocumentTypeResponse, StudentDocumentResponse,
};

/// Document declaration endpoints
pub struct DocumentsApi {
    document_store: Arc<DocumentStore>,
    token_service: Arc<TokenService>,
}

impl DocumentsApi {
    pub fn new(document_store: Arc<DocumentStore>, token_service: Arc<TokenService>) -> Self {
        Self {
            document_store,
            token_service,
        }
    }
}

#[derive(Tags)]
enum DocumentTags {
    /// Document declarations
    Documents,
}

fn to_entry(request: DeclareDocumentRequest) -> DocumentDeclaration {
    DocumentDeclaration {
        document_type_id: request.document_type_id,
        declared: request.declared,
        notes: request.notes,
    }
}

#[OpenApi(prefix_path = "/")]
impl DocumentsApi {
    /// List document types in display order
    #[oai(path = "/document-types", method = "get", tag = "DocumentTags::Documents")]
    async fn list_document_types(
        &self,
        auth: CookieAuth,
    ) -> Result<Json<Vec<DocumentTypeResponse>>, ApiError> {
        let principal = authenticate(&self.token_service, &auth)?;
        principal.authorize(Capability::ViewStudents)?;

        let types = self.document_store.list_document_types().await?;
        Ok(Json(types.into_iter().map(DocumentTypeResponse::from).collect()))
    }

    /// Add a document type to the checklist
    #[oai(path = "/document-types", method = "post", tag = "DocumentTags::Documents")]
    async fn create_document_type(
        &self,
        auth: CookieAuth,
        body: Json<CreateDocumentTypeRequest>,
    ) -> Result<CreateDocumentTypeApiResponse, ApiError> {
        let principal = authenticate(&self.token_service, &auth)?;
        principal.authorize(Capability::ManageAcademics)?;

        let doc_type = self
            .document_store
            .create_document_type(&body.code, &body.name, body.is_required, body.display_order)
            .await?;
        Ok(CreateDocumentTypeApiResponse::Created(Json(doc_type.into())))
    }

    /// List a student's declarations
    #[oai(
        path = "/students/:student_id/documents",
        method = "get",
        tag = "DocumentTags::Documents"
    )]
    async fn list_student_documents(
        &self,
        auth: CookieAuth,
        student_id: Path<String>,
    ) -> Result<Json<Vec<StudentDocumentResponse>>, ApiError> {
        let principal = authenticate(&self.token_service, &auth)?;
        principal.authorize(Capability::ViewStudents)?;

        let documents = self
            .document_store
            .list_student_documents(&student_id.0)
            .await?;
        Ok(Json(
            documents.into_iter().map(StudentDocumentResponse::from).collect(),
        ))
    }

    /// Declare a single document and recount the student's status
    #[oai(
        path = "/students/:student_id/documents",
        method = "post",
        tag = "DocumentTags::Documents"
    )]
    async fn declare_document(
        &self,
        auth: CookieAuth,
        student_id: Path<String>,
        body: Json<DeclareDocumentRequest>,
    ) -> Result<Json<DeclarationResponse>, ApiError> {
        let principal = authenticate(&self.token_service, &auth)?;
        principal.authorize(Capability::DeclareDocuments)?;

        let outcome = self
            .document_store
            .declare_documents(&student_id.0, &[to_entry(body.0)], &principal.id)
            .await?;
        Ok(Json(outcome.into()))
    }

    /// Declare a batch of documents with one recount at the end
    #[oai(
        path = "/students/:student_id/documents/bulk",
        method = "post",
        tag = "DocumentTags::Documents"
    )]
    async fn declare_documents_bulk(
        &self,
        auth: CookieAuth,
        student_id: Path<String>,
        body: Json<BulkDeclareRequest>,
    ) -> Result<Json<DeclarationResponse>, ApiError> {
        let principal = authenticate(&self.token_service, &auth)?;
        principal.authorize(Capability::DeclareDocuments)?;

        let entries: Vec<DocumentDeclaration> =
            body.0.documents.into_iter().map(to_entry).collect();
        let outcome = self
            .document_store
            .declare_documents(&student_id.0, &entries, &principal.id)
            .await?;
        Ok(Json(outcome.into()))
    }
}
