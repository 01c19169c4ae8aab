use std::sync::Arc;

use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};

use crate::api::{authenticate, CookieAuth};
use crate::auth::Capability;
use crate::errors::ApiError;
use crate::services::TokenService;
use crate::stores::{FeeStore, NewStudent, StudentStore};
use crate::types::dto::fee::FeeSummaryResponse;
use crate::types::dto::student::{CreateStudentApiResponse, CreateStudentRequest, StudentResponse};

/// Student application endpoints
pub struct StudentsApi {
    student_store: Arc<StudentStore>,
    fee_store: Arc<FeeStore>,
    token_service: Arc<TokenService>,
}

impl StudentsApi {
    pub fn new(
        student_store: Arc<StudentStore>,
        fee_store: Arc<FeeStore>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            student_store,
            fee_store,
            token_service,
        }
    }
}

#[derive(Tags)]
enum StudentTags {
    /// Student applications
    Students,
}

#[OpenApi(prefix_path = "/students")]
impl StudentsApi {
    /// Enter a new application; generates the application number
    #[oai(path = "/", method = "post", tag = "StudentTags::Students")]
    async fn create_student(
        &self,
        auth: CookieAuth,
        body: Json<CreateStudentRequest>,
    ) -> Result<CreateStudentApiResponse, ApiError> {
        let principal = authenticate(&self.token_service, &auth)?;
        principal.authorize(Capability::EnterApplications)?;

        let body = body.0;
        let student = self
            .student_store
            .create_student(
                NewStudent {
                    full_name: body.full_name,
                    date_of_birth: body.date_of_birth,
                    phone: body.phone,
                    email: body.email,
                    guardian_name: body.guardian_name,
                    course_offering_id: body.course_offering_id,
                },
                &principal.id,
            )
            .await?;

        Ok(CreateStudentApiResponse::Created(Json(student.into())))
    }

    /// List students
    #[oai(path = "/", method = "get", tag = "StudentTags::Students")]
    async fn list_students(
        &self,
        auth: CookieAuth,
    ) -> Result<Json<Vec<StudentResponse>>, ApiError> {
        let principal = authenticate(&self.token_service, &auth)?;
        principal.authorize(Capability::ViewStudents)?;

        let students = self.student_store.list_students().await?;
        Ok(Json(students.into_iter().map(StudentResponse::from).collect()))
    }

    /// Fetch one student
    #[oai(path = "/:id", method = "get", tag = "StudentTags::Students")]
    async fn get_student(
        &self,
        auth: CookieAuth,
        id: Path<String>,
    ) -> Result<Json<StudentResponse>, ApiError> {
        let principal = authenticate(&self.token_service, &auth)?;
        principal.authorize(Capability::ViewStudents)?;

        let student = self.student_store.get_student(&id.0).await?;
        Ok(Json(student.into()))
    }

    /// Fee position for a student: original, effective, paid, balance
    #[oai(path = "/:id/fee-summary", method = "get", tag = "StudentTags::Students")]
    async fn fee_summary(
        &self,
        auth: CookieAuth,
        id: Path<String>,
    ) -> Result<Json<FeeSummaryResponse>, ApiError> {
        let principal = authenticate(&self.token_service, &auth)?;
        principal.authorize(Capability::ViewPayments)?;

        let summary = self.fee_store.fee_summary(&id.0).await?;
        Ok(Json(summary.into()))
    }

    /// Admit a fully-paid student
    #[oai(path = "/:id/admit", method = "post", tag = "StudentTags::Students")]
    async fn admit_student(
        &self,
        auth: CookieAuth,
        id: Path<String>,
    ) -> Result<Json<StudentResponse>, ApiError> {
        let principal = authenticate(&self.token_service, &auth)?;
        principal.authorize(Capability::ManageAcademics)?;

        let student = self.student_store.admit_student(&id.0, &principal.id).await?;
        Ok(Json(student.into()))
    }
}
