//! Migration: Create barber_services table.

use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_barbershops_table::Barbershops;
use super::m20240101_000003_create_service_types_table::ServiceTypes;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BarberServices::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(BarberServices::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(BarberServices::BarbershopId).uuid().not_null())
                    .col(ColumnDef::new(BarberServices::ServiceTypeId).uuid().not_null())
                    .col(ColumnDef::new(BarberServices::Title).string().not_null())
                    .col(ColumnDef::new(BarberServices::Price).big_integer().not_null())
                    .col(
                        ColumnDef::new(BarberServices::Status)
                            .string_len(16)
                            .not_null()
                            .default("enabled"),
                    )
                    .col(
                        ColumnDef::new(BarberServices::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BarberServices::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_barber_services_barbershop")
                            .from(BarberServices::Table, BarberServices::BarbershopId)
                            .to(Barbershops::Table, Barbershops::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_barber_services_service_type")
                            .from(BarberServices::Table, BarberServices::ServiceTypeId)
                            .to(ServiceTypes::Table, ServiceTypes::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_barber_services_price")
                    .table(BarberServices::Table)
                    .col(BarberServices::Price)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BarberServices::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub(crate) enum BarberServices {
    Table,
    Id,
    BarbershopId,
    ServiceTypeId,
    Title,
    Price,
    Status,
    CreatedAt,
    UpdatedAt,
}
