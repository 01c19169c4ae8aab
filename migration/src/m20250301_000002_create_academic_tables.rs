use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create academic_years table
        manager
            .create_table(
                Table::create()
                    .table(AcademicYears::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(AcademicYears::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(AcademicYears::YearLabel).string().not_null().unique_key())
                    .col(ColumnDef::new(AcademicYears::StartYear).integer().not_null())
                    .col(ColumnDef::new(AcademicYears::IsActive).boolean().not_null().default(false))
                    .col(ColumnDef::new(AcademicYears::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Create courses table
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Courses::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Courses::Code).string().not_null().unique_key())
                    .col(ColumnDef::new(Courses::Name).string().not_null())
                    .col(ColumnDef::new(Courses::DurationYears).integer().not_null())
                    .col(ColumnDef::new(Courses::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Create course_offerings table (course x academic year, unique pairing)
        manager
            .create_table(
                Table::create()
                    .table(CourseOfferings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CourseOfferings::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(CourseOfferings::CourseId).string().not_null())
                    .col(ColumnDef::new(CourseOfferings::AcademicYearId).string().not_null())
                    .col(ColumnDef::new(CourseOfferings::Seats).integer().not_null())
                    .col(ColumnDef::new(CourseOfferings::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_offerings_course_id")
                            .from(CourseOfferings::Table, CourseOfferings::CourseId)
                            .to(Courses::Table, Courses::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_offerings_academic_year_id")
                            .from(CourseOfferings::Table, CourseOfferings::AcademicYearId)
                            .to(AcademicYears::Table, AcademicYears::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_course_offerings_course_year")
                    .table(CourseOfferings::Table)
                    .col(CourseOfferings::CourseId)
                    .col(CourseOfferings::AcademicYearId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create fee_structures table (one per offering)
        manager
            .create_table(
                Table::create()
                    .table(FeeStructures::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(FeeStructures::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(FeeStructures::CourseOfferingId).string().not_null().unique_key())
                    .col(ColumnDef::new(FeeStructures::TotalFee).big_integer().not_null())
                    .col(ColumnDef::new(FeeStructures::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_fee_structures_course_offering_id")
                            .from(FeeStructures::Table, FeeStructures::CourseOfferingId)
                            .to(CourseOfferings::Table, CourseOfferings::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FeeStructures::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CourseOfferings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AcademicYears::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum AcademicYears {
    Table,
    Id,
    YearLabel,
    StartYear,
    IsActive,
    CreatedAt,
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
    Code,
    Name,
    DurationYears,
    CreatedAt,
}

#[derive(Iden)]
enum CourseOfferings {
    Table,
    Id,
    CourseId,
    AcademicYearId,
    Seats,
    CreatedAt,
}

#[derive(Iden)]
enum FeeStructures {
    Table,
    Id,
    CourseOfferingId,
    TotalFee,
    CreatedAt,
}
