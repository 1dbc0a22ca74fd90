//! Barber service database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{BarberService, EntityStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "barber_services")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub barbershop_id: Uuid,
    pub service_type_id: Uuid,
    pub title: String,
    /// Minor currency units
    pub price: i64,
    pub status: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for BarberService {
    fn from(model: Model) -> Self {
        BarberService {
            id: model.id,
            barbershop_id: model.barbershop_id,
            service_type_id: model.service_type_id,
            title: model.title,
            price: model.price,
            status: EntityStatus::from(model.status.as_str()),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
