//! Barber service: a priced offering of one barbershop.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::barbershop::non_empty;
use super::EntityStatus;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BarberService {
    pub id: Uuid,
    /// Providing barbershop
    pub barbershop_id: Uuid,
    pub service_type_id: Uuid,
    #[schema(example = "Classic cut")]
    pub title: String,
    /// Price in minor currency units
    #[schema(example = 2500)]
    pub price: i64,
    pub status: EntityStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BarberService {
    pub fn new(barbershop_id: Uuid, service_type_id: Uuid, title: String, price: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            barbershop_id,
            service_type_id,
            title,
            price,
            status: EntityStatus::Enabled,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, changes: BarberServiceChanges) {
        if let Some(title) = non_empty(changes.title) {
            self.title = title;
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(service_type_id) = changes.service_type_id {
            self.service_type_id = service_type_id;
        }
    }
}

/// Update for an existing barber service
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct BarberServiceChanges {
    pub title: Option<String>,
    pub price: Option<i64>,
    pub service_type_id: Option<Uuid>,
}

/// Search criteria for listing barber services. Price bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceFilter {
    pub barbershop_id: Option<Uuid>,
    pub service_type_id: Option<Uuid>,
    pub price_min: Option<i64>,
    pub price_max: Option<i64>,
}

impl ServiceFilter {
    /// In-memory form of the finder query. Stores filter in SQL instead.
    #[doc(hidden)]
    pub fn matches(&self, service: &BarberService) -> bool {
        self.barbershop_id.map_or(true, |id| service.barbershop_id == id)
            && self.service_type_id.map_or(true, |id| service.service_type_id == id)
            && self.price_min.map_or(true, |min| service.price >= min)
            && self.price_max.map_or(true, |max| service.price <= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_price_bounds_are_inclusive() {
        let service = BarberService::new(Uuid::new_v4(), Uuid::new_v4(), "Cut".into(), 2000);
        let filter = ServiceFilter {
            price_min: Some(2000),
            price_max: Some(2000),
            ..Default::default()
        };

        assert!(filter.matches(&service));
        assert!(!ServiceFilter {
            price_min: Some(2001),
            ..Default::default()
        }
        .matches(&service));
    }

    #[test]
    fn test_filter_by_barbershop() {
        let shop = Uuid::new_v4();
        let service = BarberService::new(shop, Uuid::new_v4(), "Cut".into(), 2000);

        assert!(ServiceFilter { barbershop_id: Some(shop), ..Default::default() }.matches(&service));
        assert!(!ServiceFilter {
            barbershop_id: Some(Uuid::new_v4()),
            ..Default::default()
        }
        .matches(&service));
    }
}
