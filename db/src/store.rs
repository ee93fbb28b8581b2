use std::sync::Arc;

use async_trait::async_trait;
use common::error::Res;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    dtos::{driver::DriverCreateRequest, passenger::PassengerCreateRequest},
    models::{
        credentials::AuthCredentials,
        driver::{Driver, DriverStatus},
        passenger::Passenger,
    },
};

/// Handle shared by every request handler.
pub type SharedStore = Arc<dyn AccountStore>;

/// Persistence for driver and passenger accounts.
///
/// Phone numbers are unique per role. Inserts must enforce this themselves
/// and fail with `AppError::Conflict`, even when a caller already checked
/// `exists_*_by_phone`.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn exists_driver_by_phone(&self, phone_number: &str) -> Res<bool>;
    async fn insert_driver(&self, data: DriverCreateRequest) -> Res<Driver>;
    async fn get_driver_with_password_hash(
        &self,
        phone_number: &str,
    ) -> Res<Option<(Driver, AuthCredentials)>>;
    async fn get_driver_by_id(&self, driver_id: Uuid) -> Res<Option<Driver>>;
    async fn get_drivers_by_status(&self, status: DriverStatus) -> Res<Vec<Driver>>;
    async fn update_driver_status(
        &self,
        driver_id: Uuid,
        status: DriverStatus,
    ) -> Res<Option<Driver>>;

    async fn exists_passenger_by_phone(&self, phone_number: &str) -> Res<bool>;
    async fn insert_passenger(&self, data: PassengerCreateRequest) -> Res<Passenger>;
    async fn get_passenger_with_password_hash(
        &self,
        phone_number: &str,
    ) -> Res<Option<(Passenger, AuthCredentials)>>;
    async fn get_passenger_by_id(&self, passenger_id: Uuid) -> Res<Option<Passenger>>;
    async fn get_passengers(&self) -> Res<Vec<Passenger>>;
}

/// Postgres-backed store. Uniqueness comes from the table constraints.
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn exists_driver_by_phone(&self, phone_number: &str) -> Res<bool> {
        crate::driver::exists_driver_by_phone(&self.pool, phone_number).await
    }

    async fn insert_driver(&self, data: DriverCreateRequest) -> Res<Driver> {
        crate::driver::insert_driver(&self.pool, data).await
    }

    async fn get_driver_with_password_hash(
        &self,
        phone_number: &str,
    ) -> Res<Option<(Driver, AuthCredentials)>> {
        crate::driver::get_driver_with_password_hash(&self.pool, phone_number).await
    }

    async fn get_driver_by_id(&self, driver_id: Uuid) -> Res<Option<Driver>> {
        crate::driver::get_driver_by_id(&self.pool, driver_id).await
    }

    async fn get_drivers_by_status(&self, status: DriverStatus) -> Res<Vec<Driver>> {
        crate::driver::get_drivers_by_status(&self.pool, status).await
    }

    async fn update_driver_status(
        &self,
        driver_id: Uuid,
        status: DriverStatus,
    ) -> Res<Option<Driver>> {
        crate::driver::update_driver_status(&self.pool, driver_id, status).await
    }

    async fn exists_passenger_by_phone(&self, phone_number: &str) -> Res<bool> {
        crate::passenger::exists_passenger_by_phone(&self.pool, phone_number).await
    }

    async fn insert_passenger(&self, data: PassengerCreateRequest) -> Res<Passenger> {
        crate::passenger::insert_passenger(&self.pool, data).await
    }

    async fn get_passenger_with_password_hash(
        &self,
        phone_number: &str,
    ) -> Res<Option<(Passenger, AuthCredentials)>> {
        crate::passenger::get_passenger_with_password_hash(&self.pool, phone_number).await
    }

    async fn get_passenger_by_id(&self, passenger_id: Uuid) -> Res<Option<Passenger>> {
        crate::passenger::get_passenger_by_id(&self.pool, passenger_id).await
    }

    async fn get_passengers(&self) -> Res<Vec<Passenger>> {
        crate::passenger::get_passengers(&self.pool).await
    }
}
