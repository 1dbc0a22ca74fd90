//! Migration: Create barbershops table.

use sea_orm_migration::prelude::*;

use super::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Barbershops::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Barbershops::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Barbershops::OwnerId).uuid().not_null())
                    .col(ColumnDef::new(Barbershops::Name).string().not_null())
                    .col(ColumnDef::new(Barbershops::Address).string().not_null())
                    .col(ColumnDef::new(Barbershops::Slogan).string().null())
                    .col(ColumnDef::new(Barbershops::Description).text().null())
                    .col(
                        ColumnDef::new(Barbershops::Status)
                            .string_len(16)
                            .not_null()
                            .default("enabled"),
                    )
                    .col(
                        ColumnDef::new(Barbershops::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Barbershops::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_barbershops_owner")
                            .from(Barbershops::Table, Barbershops::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_barbershops_owner_id")
                    .table(Barbershops::Table)
                    .col(Barbershops::OwnerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Barbershops::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub(crate) enum Barbershops {
    Table,
    Id,
    OwnerId,
    Name,
    Address,
    Slogan,
    Description,
    Status,
    CreatedAt,
    UpdatedAt,
}
