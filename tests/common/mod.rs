//! In-memory persistence and wiring shared by the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Duration;
use sea_orm::DatabaseConnection;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use barbershop_api::domain::{
    Appointment, BarberService, Barbershop, EntityStatus, PasswordDigest, ServiceFilter,
    ServiceType, User,
};
use barbershop_api::errors::{AppError, AppResult};
use barbershop_api::infra::{
    AppointmentRepository, BarberServiceRepository, BarbershopRepository, Database, LogMailer,
    Mailer, ServiceTypeRepository, UnitOfWork, UserRepository,
};
use barbershop_api::services::{
    AppointmentManager, Authenticator, BarbershopManager, CatalogManager, JwtSigner,
    PasswordResetter, ResetMailSettings, ServiceTypeManager, TokenService, UserManager,
};
use barbershop_api::types::PaginationParams;
use barbershop_api::AppState;

pub const TEST_SECRET: &[u8] = b"integration-test-secret-at-least-32-bytes";

/// Lowercase hex SHA-256 of `plain`, the way a client prepares passwords
pub fn sha256_hex(plain: &str) -> String {
    hex::encode(Sha256::digest(plain.as_bytes()))
}

pub fn signer() -> Arc<JwtSigner> {
    Arc::new(JwtSigner::new(
        TEST_SECRET,
        Duration::hours(24),
        Duration::minutes(30),
    ))
}

pub fn user_with_password(email: &str, plain: &str) -> User {
    User::new(
        email.to_string(),
        "Test Client".to_string(),
        PasswordDigest::from_stored(sha256_hex(plain)),
    )
}

/// A table of records that soft delete through their status
struct Table<T> {
    rows: Mutex<Vec<T>>,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
        }
    }

    fn find(&self, pred: impl Fn(&T) -> bool) -> Option<T> {
        self.rows.lock().unwrap().iter().find(|row| pred(row)).cloned()
    }

    fn filter(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|row| pred(row))
            .cloned()
            .collect()
    }

    fn upsert(&self, row: T, same: impl Fn(&T, &T) -> bool) -> T {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|existing| same(existing, &row)) {
            Some(existing) => *existing = row.clone(),
            None => rows.push(row.clone()),
        }
        row
    }

    fn update(&self, pred: impl Fn(&T) -> bool, change: impl FnOnce(&mut T)) -> AppResult<T> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows.iter_mut().find(|row| pred(row)).ok_or(AppError::NotFound)?;
        change(row);
        Ok(row.clone())
    }
}

/// User table that also records every save
pub struct MemoryUsers {
    table: Table<User>,
    pub saves: Mutex<Vec<User>>,
}

impl MemoryUsers {
    pub fn stored(&self, id: Uuid) -> Option<User> {
        self.table.find(|u| u.id == id)
    }

    pub fn save_count(&self) -> usize {
        self.saves.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.table.find(|u| u.id == id && u.status.is_visible()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.table.find(|u| u.email == email && u.status.is_visible()))
    }

    async fn find_by_email_with_deleted(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.table.find(|u| u.email == email))
    }

    async fn save(&self, user: User) -> AppResult<User> {
        self.saves.lock().unwrap().push(user.clone());
        Ok(self.table.upsert(user, |a, b| a.id == b.id))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        Ok(self.table.filter(|u| u.status.is_visible()))
    }

    async fn set_status(&self, id: Uuid, status: EntityStatus) -> AppResult<User> {
        self.table
            .update(|u| u.id == id && u.status.is_visible(), |u| u.status = status)
    }
}

pub struct MemoryBarbershops(Table<Barbershop>);

#[async_trait]
impl BarbershopRepository for MemoryBarbershops {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Barbershop>> {
        Ok(self.0.find(|b| b.id == id && b.status.is_visible()))
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Option<Barbershop>> {
        Ok(self.0.find(|b| b.owner_id == owner_id && b.status.is_visible()))
    }

    async fn list(&self, params: &PaginationParams) -> AppResult<(Vec<Barbershop>, u64)> {
        let visible = self.0.filter(|b| b.status.is_visible());
        let total = visible.len() as u64;
        let skip = (params.page.saturating_sub(1) * params.limit()) as usize;
        let page = visible
            .into_iter()
            .skip(skip)
            .take(params.limit() as usize)
            .collect();
        Ok((page, total))
    }

    async fn save(&self, barbershop: Barbershop) -> AppResult<Barbershop> {
        Ok(self.0.upsert(barbershop, |a, b| a.id == b.id))
    }

    async fn set_status(&self, id: Uuid, status: EntityStatus) -> AppResult<Barbershop> {
        self.0
            .update(|b| b.id == id && b.status.is_visible(), |b| b.status = status)
    }
}

pub struct MemoryServiceTypes(Table<ServiceType>);

#[async_trait]
impl ServiceTypeRepository for MemoryServiceTypes {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ServiceType>> {
        Ok(self.0.find(|t| t.id == id && t.status.is_visible()))
    }

    async fn list(&self) -> AppResult<Vec<ServiceType>> {
        Ok(self.0.filter(|t| t.status.is_visible()))
    }

    async fn save(&self, service_type: ServiceType) -> AppResult<ServiceType> {
        Ok(self.0.upsert(service_type, |a, b| a.id == b.id))
    }

    async fn set_status(&self, id: Uuid, status: EntityStatus) -> AppResult<ServiceType> {
        self.0
            .update(|t| t.id == id && t.status.is_visible(), |t| t.status = status)
    }
}

pub struct MemoryBarberServices(Table<BarberService>);

#[async_trait]
impl BarberServiceRepository for MemoryBarberServices {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<BarberService>> {
        Ok(self.0.find(|s| s.id == id && s.status.is_visible()))
    }

    async fn search(&self, filter: ServiceFilter) -> AppResult<Vec<BarberService>> {
        let mut found = self
            .0
            .filter(|s| s.status.is_visible() && filter.matches(s));
        found.sort_by_key(|s| s.price);
        Ok(found)
    }

    async fn save(&self, service: BarberService) -> AppResult<BarberService> {
        Ok(self.0.upsert(service, |a, b| a.id == b.id))
    }

    async fn set_status(&self, id: Uuid, status: EntityStatus) -> AppResult<BarberService> {
        self.0
            .update(|s| s.id == id && s.status.is_visible(), |s| s.status = status)
    }
}

pub struct MemoryAppointments(Table<Appointment>);

#[async_trait]
impl AppointmentRepository for MemoryAppointments {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Appointment>> {
        Ok(self.0.find(|a| a.id == id && a.status.is_visible()))
    }

    async fn list_by_client(&self, client_id: Uuid) -> AppResult<Vec<Appointment>> {
        Ok(self
            .0
            .filter(|a| a.client_id == client_id && a.status.is_visible()))
    }

    async fn list_by_barbershop(&self, barbershop_id: Uuid) -> AppResult<Vec<Appointment>> {
        Ok(self
            .0
            .filter(|a| a.barbershop_id == barbershop_id && a.status.is_visible()))
    }

    async fn save(&self, appointment: Appointment) -> AppResult<Appointment> {
        Ok(self.0.upsert(appointment, |a, b| a.id == b.id))
    }

    async fn set_status(&self, id: Uuid, status: EntityStatus) -> AppResult<Appointment> {
        self.0
            .update(|a| a.id == id && a.status.is_visible(), |a| a.status = status)
    }
}

/// Unit of work over in-memory tables
pub struct MemoryUnitOfWork {
    pub users: Arc<MemoryUsers>,
    pub barbershops: Arc<MemoryBarbershops>,
    pub service_types: Arc<MemoryServiceTypes>,
    pub barber_services: Arc<MemoryBarberServices>,
    pub appointments: Arc<MemoryAppointments>,
}

impl MemoryUnitOfWork {
    pub fn new() -> Self {
        Self {
            users: Arc::new(MemoryUsers {
                table: Table::new(),
                saves: Mutex::new(Vec::new()),
            }),
            barbershops: Arc::new(MemoryBarbershops(Table::new())),
            service_types: Arc::new(MemoryServiceTypes(Table::new())),
            barber_services: Arc::new(MemoryBarberServices(Table::new())),
            appointments: Arc::new(MemoryAppointments(Table::new())),
        }
    }

    /// Insert a user without recording a save
    pub fn seed_user(&self, user: User) -> User {
        self.users.table.upsert(user, |a, b| a.id == b.id)
    }
}

impl UnitOfWork for MemoryUnitOfWork {
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

pub fn reset_settings() -> ResetMailSettings {
    ResetMailSettings {
        from: "noreply@example.com".to_string(),
        reset_url: "http://localhost:3000/reset-password".to_string(),
    }
}

/// Application state wired with the real services over in-memory storage.
///
/// The database handle is disconnected, so only the health check touches it.
pub fn app_state(uow: Arc<MemoryUnitOfWork>, tokens: Arc<JwtSigner>) -> AppState {
    let tokens: Arc<dyn TokenService> = tokens;
    let mailer: Arc<dyn Mailer> = Arc::new(LogMailer);

    AppState {
        auth_service: Arc::new(Authenticator::new(uow.clone(), tokens.clone())),
        password_reset_service: Arc::new(PasswordResetter::new(
            uow.clone(),
            tokens,
            mailer,
            reset_settings(),
        )),
        user_service: Arc::new(UserManager::new(uow.clone())),
        barbershop_service: Arc::new(BarbershopManager::new(uow.clone())),
        service_type_service: Arc::new(ServiceTypeManager::new(uow.clone())),
        catalog_service: Arc::new(CatalogManager::new(uow.clone())),
        appointment_service: Arc::new(AppointmentManager::new(uow)),
        database: Arc::new(Database::from_connection(DatabaseConnection::Disconnected)),
    }
}
