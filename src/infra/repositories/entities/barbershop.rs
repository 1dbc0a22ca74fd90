//! Barbershop database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Barbershop, EntityStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "barbershops")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub address: String,
    pub slogan: Option<String>,
    pub description: Option<String>,
    pub status: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Barbershop {
    fn from(model: Model) -> Self {
        Barbershop {
            id: model.id,
            owner_id: model.owner_id,
            name: model.name,
            address: model.address,
            slogan: model.slogan,
            description: model.description,
            status: EntityStatus::from(model.status.as_str()),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
