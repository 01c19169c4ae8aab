use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// (code, name, is_required, display_order)
const DOCUMENT_TYPES: &[(&str, &str, bool, i32)] = &[
    ("TC", "Transfer Certificate", true, 1),
    ("MARKSHEET", "Previous Marksheet", true, 2),
    ("ID_PROOF", "Identity Proof", true, 3),
    ("PHOTO", "Passport Photo", false, 4),
    ("CASTE_CERT", "Caste Certificate", false, 5),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (idx, (code, name, is_required, display_order)) in DOCUMENT_TYPES.iter().enumerate() {
            let insert = Query::insert()
                .into_table(DocumentTypes::Table)
                .columns([
                    DocumentTypes::Id,
                    DocumentTypes::Code,
                    DocumentTypes::Name,
                    DocumentTypes::IsRequired,
                    DocumentTypes::DisplayOrder,
                ])
                .values_panic([
                    format!("doctype-{:02}", idx + 1).into(),
                    (*code).into(),
                    (*name).into(),
                    (*is_required).into(),
                    (*display_order).into(),
                ])
                .to_owned();

            manager.exec_stmt(insert).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let codes: Vec<String> = DOCUMENT_TYPES.iter().map(|(code, ..)| (*code).to_string()).collect();
        let delete = Query::delete()
            .from_table(DocumentTypes::Table)
            .cond_where(Expr::col(DocumentTypes::Code).is_in(codes))
            .to_owned();

        manager.exec_stmt(delete).await?;

        Ok(())
    }
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
