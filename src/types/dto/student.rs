use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::{Deserialize, Serialize};

use crate::types::db::student;

/// Request model for entering a new application
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateStudentRequest {
    pub full_name: String,
    pub date_of_birth: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub guardian_name: Option<String>,
    pub course_offering_id: String,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct StudentResponse {
    pub id: String,

    /// Generated application number, e.g. "APP20250001"
    pub application_number: String,

    pub full_name: String,
    pub date_of_birth: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub guardian_name: Option<String>,
    pub course_offering_id: String,
    pub academic_year_id: String,

    /// Current admission status, e.g. "DOCUMENTS_INCOMPLETE"
    pub status: String,

    pub created_at: i64,
    pub updated_at: i64,
}

impl From<student::Model> for StudentResponse {
    fn from(s: student::Model) -> Self {
        Self {
            id: s.id,
            application_number: s.application_number,
            full_name: s.full_name,
            date_of_birth: s.date_of_birth,
            phone: s.phone,
            email: s.email,
            guardian_name: s.guardian_name,
            course_offering_id: s.course_offering_id,
            academic_year_id: s.academic_year_id,
            status: s.status,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

#[derive(ApiResponse)]
pub enum CreateStudentApiResponse {
    /// Application entered
    #[oai(status = 201)]
    Created(Json<StudentResponse>),
}
