use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create fee_adjustments table
        manager
            .create_table(
                Table::create()
                    .table(FeeAdjustments::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(FeeAdjustments::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(FeeAdjustments::StudentId).string().not_null())
                    .col(ColumnDef::new(FeeAdjustments::OriginalFee).big_integer().not_null())
                    .col(ColumnDef::new(FeeAdjustments::AdjustedFee).big_integer().not_null())
                    .col(ColumnDef::new(FeeAdjustments::DiscountAmount).big_integer().not_null())
                    .col(ColumnDef::new(FeeAdjustments::DiscountPercentage).double().not_null())
                    .col(ColumnDef::new(FeeAdjustments::Reason).string().not_null())
                    .col(ColumnDef::new(FeeAdjustments::ApprovalNote).string().null())
                    .col(ColumnDef::new(FeeAdjustments::AppliedBy).string().not_null())
                    .col(ColumnDef::new(FeeAdjustments::IsActive).boolean().not_null().default(true))
                    .col(ColumnDef::new(FeeAdjustments::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_fee_adjustments_student_id")
                            .from(FeeAdjustments::Table, FeeAdjustments::StudentId)
                            .to(Students::Table, Students::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_fee_adjustments_applied_by")
                            .from(FeeAdjustments::Table, FeeAdjustments::AppliedBy)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Race-safety backstop for the "one active adjustment per student" rule.
        // Partial indexes are not expressible through the schema builder, so raw SQL.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX idx_fee_adjustments_one_active \
                 ON fee_adjustments (student_id) WHERE is_active",
            )
            .await?;

        // Create fee_payments table
        manager
            .create_table(
                Table::create()
                    .table(FeePayments::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(FeePayments::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(FeePayments::StudentId).string().not_null())
                    .col(ColumnDef::new(FeePayments::Amount).big_integer().not_null())
                    .col(ColumnDef::new(FeePayments::Mode).string().not_null())
                    .col(ColumnDef::new(FeePayments::Reference).string().null())
                    .col(ColumnDef::new(FeePayments::ReceiptNumber).string().not_null().unique_key())
                    .col(ColumnDef::new(FeePayments::PaymentDate).string().not_null())
                    .col(ColumnDef::new(FeePayments::RecordedBy).string().not_null())
                    .col(ColumnDef::new(FeePayments::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_fee_payments_student_id")
                            .from(FeePayments::Table, FeePayments::StudentId)
                            .to(Students::Table, Students::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_fee_payments_recorded_by")
                            .from(FeePayments::Table, FeePayments::RecordedBy)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_fee_payments_student_id")
                    .table(FeePayments::Table)
                    .col(FeePayments::StudentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FeePayments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FeeAdjustments::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum FeeAdjustments {
    Table,
    Id,
    StudentId,
    OriginalFee,
    AdjustedFee,
    DiscountAmount,
    DiscountPercentage,
    Reason,
    ApprovalNote,
    AppliedBy,
    IsActive,
    CreatedAt,
}

#[derive(Iden)]
enum FeePayments {
    Table,
    Id,
    StudentId,
    Amount,
    Mode,
    Reference,
    ReceiptNumber,
    PaymentDate,
    RecordedBy,
    CreatedAt,
}

#[derive(Iden)]
enum Students {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
