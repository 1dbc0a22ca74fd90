//! Unit of Work: one handle over every repository.
//!
//! Services depend on [`UnitOfWork`] rather than on individual stores so
//! they can be wired with a single value and mocked as a whole in tests.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::repositories::{
    AppointmentRepository, AppointmentStore, BarberServiceRepository, BarberServiceStore,
    BarbershopRepository, BarbershopStore, ServiceTypeRepository, ServiceTypeStore,
    UserRepository, UserStore,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Centralized repository access for the service layer.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn barbershops(&self) -> Arc<dyn BarbershopRepository>;

    fn service_types(&self) -> Arc<dyn ServiceTypeRepository>;

    fn barber_services(&self) -> Arc<dyn BarberServiceRepository>;

    fn appointments(&self) -> Arc<dyn AppointmentRepository>;
}

/// Concrete implementation of UnitOfWork backed by a SeaORM connection
pub struct Persistence {
    users: Arc<UserStore>,
    barbershops: Arc<BarbershopStore>,
    service_types: Arc<ServiceTypeStore>,
    barber_services: Arc<BarberServiceStore>,
    appointments: Arc<AppointmentStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: Arc::new(UserStore::new(db.clone())),
            barbershops: Arc::new(BarbershopStore::new(db.clone())),
            service_types: Arc::new(ServiceTypeStore::new(db.clone())),
            barber_services: Arc::new(BarberServiceStore::new(db.clone())),
            appointments: Arc::new(AppointmentStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn barbershops(&self) -> Arc<dyn BarbershopRepository> {
        self.barbershops.clone()
    }

    fn service_types(&self) -> Arc<dyn ServiceTypeRepository> {
        self.service_types.clone()
    }

    fn barber_services(&self) -> Arc<dyn BarberServiceRepository> {
        self.barber_services.clone()
    }

    fn appointments(&self) -> Arc<dyn AppointmentRepository> {
        self.appointments.clone()
    }
}
