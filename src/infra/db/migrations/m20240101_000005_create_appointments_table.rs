//! Migration: Create appointments table.

use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_barbershops_table::Barbershops;
use super::m20240101_000004_create_barber_services_table::BarberServices;
use super::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Appointments::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Appointments::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Appointments::ClientId).uuid().not_null())
                    .col(ColumnDef::new(Appointments::ServiceId).uuid().not_null())
                    .col(ColumnDef::new(Appointments::BarbershopId).uuid().not_null())
                    .col(
                        ColumnDef::new(Appointments::Date)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Appointments::Status)
                            .string_len(16)
                            .not_null()
                            .default("enabled"),
                    )
                    .col(
                        ColumnDef::new(Appointments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Appointments::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointments_client")
                            .from(Appointments::Table, Appointments::ClientId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointments_service")
                            .from(Appointments::Table, Appointments::ServiceId)
                            .to(BarberServices::Table, BarberServices::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointments_barbershop")
                            .from(Appointments::Table, Appointments::BarbershopId)
                            .to(Barbershops::Table, Barbershops::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_appointments_client_id")
                    .table(Appointments::Table)
                    .col(Appointments::ClientId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_appointments_barbershop_id")
                    .table(Appointments::Table)
                    .col(Appointments::BarbershopId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Appointments::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Appointments {
    Table,
    Id,
    ClientId,
    ServiceId,
    BarbershopId,
    Date,
    Status,
    CreatedAt,
    UpdatedAt,
}
