pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_identity_tables;
mod m20250301_000002_create_academic_tables;
mod m20250301_000003_create_student_tables;
mod m20250301_000004_create_fee_tables;
mod m20250301_000005_create_audit_log;
mod m20250301_000006_seed_document_types;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_identity_tables::Migration),
            Box::new(m20250301_000002_create_academic_tables::Migration),
            Box::new(m20250301_000003_create_student_tables::Migration),
            Box::new(m20250301_000004_create_fee_tables::Migration),
            Box::new(m20250301_000005_create_audit_log::Migration),
            Box::new(m20250301_000006_seed_document_types::Migration),
        ]
    }
}
