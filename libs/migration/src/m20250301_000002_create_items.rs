use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Status and category are plain strings checked in the application
        // layer, so the schema stays portable across backends.
        manager
            .create_table(
                Table::create()
                    .table(Items::Table)
                    .if_not_exists()
                    .col(pk_uuid(Items::Id))
                    .col(text(Items::Title))
                    .col(text(Items::Description))
                    .col(string_len(Items::Category, 32))
                    .col(text(Items::Location))
                    .col(text(Items::Date))
                    .col(string_len(Items::Status, 16))
                    .col(text_null(Items::ImageUrl))
                    .col(uuid(Items::ReporterId))
                    .col(text(Items::ContactInfo))
                    .col(boolean(Items::IsResolved).default(false))
                    .col(
                        timestamp_with_time_zone(Items::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_items_reporter_id")
                            .from(Items::Table, Items::ReporterId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Covers the fixed is_resolved = false clause plus the default sort
        manager
            .create_index(
                Index::create()
                    .name("idx_items_active_created_at")
                    .table(Items::Table)
                    .col(Items::IsResolved)
                    .col(Items::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_items_status")
                    .table(Items::Table)
                    .col(Items::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_items_category")
                    .table(Items::Table)
                    .col(Items::Category)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_items_reporter_id")
                    .table(Items::Table)
                    .col(Items::ReporterId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Items::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Items {
    Table,
    Id,
    Title,
    Description,
    Category,
    Location,
    Date,
    Status,
    ImageUrl,
    ReporterId,
    ContactInfo,
    IsResolved,
    CreatedAt,
}
