use std::sync::Arc;

use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};

use crate::api::{authenticate, CookieAuth};
use crate::auth::Capability;
use crate::errors::ApiError;
use crate::services::TokenService;
use crate::stores::AcademicStore;
use crate::types::dto::academic::{
    AcademicYearResponse, CourseResponse, CreateAcademicYearApiResponse,
    CreateAcademicYearRequest, CreateCourseApiResponse, CreateCourseRequest,
    CreateFeeStructureApiResponse, CreateFeeStructureRequest, CreateOfferingApiResponse,
    CreateOfferingRequest, FeeStructureResponse, OfferingResponse,
};
use crate::types::dto::common::MessageResponse;

/// Academic structure endpoints: years, courses, offerings, fee structures
pub struct AcademicsApi {
    academic_store: Arc<AcademicStore>,
    token_service: Arc<TokenService>,
}

impl AcademicsApi {
    pub fn new(academic_store: Arc<AcademicStore>, token_service: Arc<TokenService>) -> Self {
        Self {
            academic_store,
            token_service,
        }
    }
}

#[derive(Tags)]
enum AcademicTags {
    /// Academic structure administration
    Academics,
}

#[OpenApi(prefix_path = "/academics")]
impl AcademicsApi {
    /// Create an academic year
    #[oai(path = "/years", method = "post", tag = "AcademicTags::Academics")]
    async fn create_year(
        &self,
        auth: CookieAuth,
        body: Json<CreateAcademicYearRequest>,
    ) -> Result<CreateAcademicYearApiResponse, ApiError> {
        let principal = authenticate(&self.token_service, &auth)?;
        principal.authorize(Capability::ManageAcademics)?;

        let year = self
            .academic_store
            .create_year(&body.year_label, body.start_year)
            .await?;
        Ok(CreateAcademicYearApiResponse::Created(Json(year.into())))
    }

    /// List academic years
    #[oai(path = "/years", method = "get", tag = "AcademicTags::Academics")]
    async fn list_years(
        &self,
        auth: CookieAuth,
    ) -> Result<Json<Vec<AcademicYearResponse>>, ApiError> {
        let principal = authenticate(&self.token_service, &auth)?;
        principal.authorize(Capability::ManageAcademics)?;

        let years = self.academic_store.list_years().await?;
        Ok(Json(years.into_iter().map(AcademicYearResponse::from).collect()))
    }

    /// Activate an academic year, deactivating every other one
    #[oai(path = "/years/:id/activate", method = "post", tag = "AcademicTags::Academics")]
    async fn activate_year(
        &self,
        auth: CookieAuth,
        id: Path<String>,
    ) -> Result<Json<AcademicYearResponse>, ApiError> {
        let principal = authenticate(&self.token_service, &auth)?;
        principal.authorize(Capability::ManageAcademics)?;

        let year = self.academic_store.activate_year(&id.0).await?;
        Ok(Json(year.into()))
    }

    /// Delete an academic year with no offerings, students, or active flag
    #[oai(path = "/years/:id", method = "delete", tag = "AcademicTags::Academics")]
    async fn delete_year(
        &self,
        auth: CookieAuth,
        id: Path<String>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let principal = authenticate(&self.token_service, &auth)?;
        principal.authorize(Capability::ManageAcademics)?;

        self.academic_store.delete_year(&id.0).await?;
        Ok(Json(MessageResponse::new("Academic year deleted")))
    }

    /// Create a course
    #[oai(path = "/courses", method = "post", tag = "AcademicTags::Academics")]
    async fn create_course(
        &self,
        auth: CookieAuth,
        body: Json<CreateCourseRequest>,
    ) -> Result<CreateCourseApiResponse, ApiError> {
        let principal = authenticate(&self.token_service, &auth)?;
        principal.authorize(Capability::ManageAcademics)?;

        let course = self
            .academic_store
            .create_course(&body.code, &body.name, body.duration_years)
            .await?;
        Ok(CreateCourseApiResponse::Created(Json(course.into())))
    }

    /// List courses
    #[oai(path = "/courses", method = "get", tag = "AcademicTags::Academics")]
    async fn list_courses(&self, auth: CookieAuth) -> Result<Json<Vec<CourseResponse>>, ApiError> {
        let principal = authenticate(&self.token_service, &auth)?;
        principal.authorize(Capability::ManageAcademics)?;

        let courses = self.academic_store.list_courses().await?;
        Ok(Json(courses.into_iter().map(CourseResponse::from).collect()))
    }

    /// Offer a course in an academic year
    #[oai(path = "/offerings", method = "post", tag = "AcademicTags::Academics")]
    async fn create_offering(
        &self,
        auth: CookieAuth,
        body: Json<CreateOfferingRequest>,
    ) -> Result<CreateOfferingApiResponse, ApiError> {
        let principal = authenticate(&self.token_service, &auth)?;
        principal.authorize(Capability::ManageAcademics)?;

        let offering = self
            .academic_store
            .create_offering(&body.course_id, &body.academic_year_id, body.seats)
            .await?;
        Ok(CreateOfferingApiResponse::Created(Json(offering.into())))
    }

    /// List course offerings
    #[oai(path = "/offerings", method = "get", tag = "AcademicTags::Academics")]
    async fn list_offerings(
        &self,
        auth: CookieAuth,
    ) -> Result<Json<Vec<OfferingResponse>>, ApiError> {
        let principal = authenticate(&self.token_service, &auth)?;
        principal.authorize(Capability::ManageAcademics)?;

        let offerings = self.academic_store.list_offerings().await?;
        Ok(Json(offerings.into_iter().map(OfferingResponse::from).collect()))
    }

    /// Attach a fee structure to a course offering
    #[oai(path = "/fee-structures", method = "post", tag = "AcademicTags::Academics")]
    async fn create_fee_structure(
        &self,
        auth: CookieAuth,
        body: Json<CreateFeeStructureRequest>,
    ) -> Result<CreateFeeStructureApiResponse, ApiError> {
        let principal = authenticate(&self.token_service, &auth)?;
        principal.authorize(Capability::ManageAcademics)?;

        let fee_structure = self
            .academic_store
            .create_fee_structure(&body.course_offering_id, body.total_fee)
            .await?;
        Ok(CreateFeeStructureApiResponse::Created(Json(fee_structure.into())))
    }

    /// List fee structures
    #[oai(path = "/fee-structures", method = "get", tag = "AcademicTags::Academics")]
    async fn list_fee_structures(
        &self,
        auth: CookieAuth,
    ) -> Result<Json<Vec<FeeStructureResponse>>, ApiError> {
        let principal = authenticate(&self.token_service, &auth)?;
        principal.authorize(Capability::ManageAcademics)?;

        let fee_structures = self.academic_store.list_fee_structures().await?;
        Ok(Json(
            fee_structures.into_iter().map(FeeStructureResponse::from).collect(),
        ))
    }
}
