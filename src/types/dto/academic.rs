use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::{Deserialize, Serialize};

use crate::types::db::{academic_year, course, course_offering, fee_structure};

/// Request model for academic year creation
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateAcademicYearRequest {
    /// Display label, e.g. "2025-26"
    pub year_label: String,

    /// First calendar year, e.g. 2025
    pub start_year: i32,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct AcademicYearResponse {
    pub id: String,
    pub year_label: String,
    pub start_year: i32,
    pub is_active: bool,
    pub created_at: i64,
}

impl From<academic_year::Model> for AcademicYearResponse {
    fn from(y: academic_year::Model) -> Self {
        Self {
            id: y.id,
            year_label: y.year_label,
            start_year: y.start_year,
            is_active: y.is_active,
            created_at: y.created_at,
        }
    }
}

#[derive(ApiResponse)]
pub enum CreateAcademicYearApiResponse {
    /// Academic year created
    #[oai(status = 201)]
    Created(Json<AcademicYearResponse>),
}

/// Request model for course creation
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateCourseRequest {
    /// Unique course code, e.g. "BSC-CS"
    pub code: String,
    pub name: String,
    pub duration_years: i32,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CourseResponse {
    pub id: String,
    pub code: String,
    pub name: String,
    pub duration_years: i32,
    pub created_at: i64,
}

impl From<course::Model> for CourseResponse {
    fn from(c: course::Model) -> Self {
        Self {
            id: c.id,
            code: c.code,
            name: c.name,
            duration_years: c.duration_years,
            created_at: c.created_at,
        }
    }
}

#[derive(ApiResponse)]
pub enum CreateCourseApiResponse {
    /// Course created
    #[oai(status = 201)]
    Created(Json<CourseResponse>),
}

/// Request model for course offering creation
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateOfferingRequest {
    pub course_id: String,
    pub academic_year_id: String,
    pub seats: i32,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct OfferingResponse {
    pub id: String,
    pub course_id: String,
    pub academic_year_id: String,
    pub seats: i32,
    pub created_at: i64,
}

impl From<course_offering::Model> for OfferingResponse {
    fn from(o: course_offering::Model) -> Self {
        Self {
            id: o.id,
            course_id: o.course_id,
            academic_year_id: o.academic_year_id,
            seats: o.seats,
            created_at: o.created_at,
        }
    }
}

#[derive(ApiResponse)]
pub enum CreateOfferingApiResponse {
    /// Course offering created
    #[oai(status = 201)]
    Created(Json<OfferingResponse>),
}

/// Request model for fee structure creation
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateFeeStructureRequest {
    pub course_offering_id: String,

    /// Total fee in whole currency units
    pub total_fee: i64,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct FeeStructureResponse {
    pub id: String,
    pub course_offering_id: String,
    pub total_fee: i64,
    pub created_at: i64,
}

impl From<fee_structure::Model> for FeeStructureResponse {
    fn from(f: fee_structure::Model) -> Self {
        Self {
            id: f.id,
            course_offering_id: f.course_offering_id,
            total_fee: f.total_fee,
            created_at: f.created_at,
        }
    }
}

#[derive(ApiResponse)]
pub enum CreateFeeStructureApiResponse {
    /// Fee structure created
    #[oai(status = 201)]
    Created(Json<FeeStructureResponse>),
}
