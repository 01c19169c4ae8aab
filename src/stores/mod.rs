// Stores layer - database access per aggregate
pub mod academic_store;
pub mod audit_store;
pub mod document_store;
pub mod fee_store;
pub mod student_store;
pub mod user_store;

pub use academic_store::AcademicStore;
pub use audit_store::AuditStore;
pub use document_store::{DocumentDeclaration, DocumentStore};
pub use fee_store::{FeeStore, FeeSummary, NewPayment};
pub use student_store::{NewStudent, StudentStore};
pub use user_store::UserStore;
