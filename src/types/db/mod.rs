// Database entity definitions (sea-orm)
pub mod academic_year;
pub mod audit_log;
pub mod course;
pub mod course_offering;
pub mod document_type;
pub mod fee_adjustment;
pub mod fee_payment;
pub mod fee_structure;
pub mod student;
pub mod student_document;
pub mod user;
