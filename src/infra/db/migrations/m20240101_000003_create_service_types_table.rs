//! Migration: Create service_types table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceTypes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ServiceTypes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(ServiceTypes::Title).string().not_null())
                    .col(
                        ColumnDef::new(ServiceTypes::Status)
                            .string_len(16)
                            .not_null()
                            .default("enabled"),
                    )
                    .col(
                        ColumnDef::new(ServiceTypes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ServiceTypes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ServiceTypes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub(crate) enum ServiceTypes {
    Table,
    Id,
    Title,
    Status,
    CreatedAt,
    UpdatedAt,
}
