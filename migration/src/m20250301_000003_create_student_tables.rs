use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create students table
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Students::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Students::ApplicationNumber).string().not_null().unique_key())
                    .col(ColumnDef::new(Students::FullName).string().not_null())
                    .col(ColumnDef::new(Students::DateOfBirth).string().null())
                    .col(ColumnDef::new(Students::Phone).string().null())
                    .col(ColumnDef::new(Students::Email).string().null())
                    .col(ColumnDef::new(Students::GuardianName).string().null())
                    .col(ColumnDef::new(Students::CourseOfferingId).string().not_null())
                    .col(ColumnDef::new(Students::AcademicYearId).string().not_null())
                    .col(ColumnDef::new(Students::Status).string().not_null())
                    .col(ColumnDef::new(Students::CreatedBy).string().not_null())
                    .col(ColumnDef::new(Students::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Students::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_students_course_offering_id")
                            .from(Students::Table, Students::CourseOfferingId)
                            .to(CourseOfferings::Table, CourseOfferings::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_students_academic_year_id")
                            .from(Students::Table, Students::AcademicYearId)
                            .to(AcademicYears::Table, AcademicYears::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_students_created_by")
                            .from(Students::Table, Students::CreatedBy)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_students_academic_year_id")
                    .table(Students::Table)
                    .col(Students::AcademicYearId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_students_status")
                    .table(Students::Table)
                    .col(Students::Status)
                    .to_owned(),
            )
            .await?;

        // Create document_types table (reference data)
        manager
            .create_table(
                Table::create()
                    .table(DocumentTypes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(DocumentTypes::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(DocumentTypes::Code).string().not_null().unique_key())
                    .col(ColumnDef::new(DocumentTypes::Name).string().not_null())
                    .col(ColumnDef::new(DocumentTypes::IsRequired).boolean().not_null().default(false))
                    .col(ColumnDef::new(DocumentTypes::DisplayOrder).integer().not_null().default(0))
                    .to_owned(),
            )
            .await?;

        // Create student_documents table (declaration per student x type)
        manager
            .create_table(
                Table::create()
                    .table(StudentDocuments::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(StudentDocuments::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(StudentDocuments::StudentId).string().not_null())
                    .col(ColumnDef::new(StudentDocuments::DocumentTypeId).string().not_null())
                    .col(ColumnDef::new(StudentDocuments::Declared).boolean().not_null().default(false))
                    .col(ColumnDef::new(StudentDocuments::Notes).string().null())
                    .col(ColumnDef::new(StudentDocuments::AddedBy).string().not_null())
                    .col(ColumnDef::new(StudentDocuments::AddedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_documents_student_id")
                            .from(StudentDocuments::Table, StudentDocuments::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_documents_document_type_id")
                            .from(StudentDocuments::Table, StudentDocuments::DocumentTypeId)
                            .to(DocumentTypes::Table, DocumentTypes::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_documents_added_by")
                            .from(StudentDocuments::Table, StudentDocuments::AddedBy)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_student_documents_student_type")
                    .table(StudentDocuments::Table)
                    .col(StudentDocuments::StudentId)
                    .col(StudentDocuments::DocumentTypeId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StudentDocuments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DocumentTypes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Students {
    Table,
    Id,
    ApplicationNumber,
    FullName,
    DateOfBirth,
    Phone,
    Email,
    GuardianName,
    CourseOfferingId,
    AcademicYearId,
    Status,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum DocumentTypes {
    Table,
    Id,
    Code,
    Name,
    IsRequired,
    DisplayOrder,
}

#[derive(Iden)]
enum StudentDocuments {
    Table,
    Id,
    StudentId,
    DocumentTypeId,
    Declared,
    Notes,
    AddedBy,
    AddedAt,
}

#[derive(Iden)]
enum CourseOfferings {
    Table,
    Id,
}

#[derive(Iden)]
enum AcademicYears {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
