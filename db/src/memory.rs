use async_trait::async_trait;
use chrono::Utc;
use common::error::{AppError, Res};
use dashmap::{DashMap, mapref::entry::Entry};
use uuid::Uuid;

use crate::{
    PHONE_NUMBER_TAKEN,
    dtos::{driver::DriverCreateRequest, passenger::PassengerCreateRequest},
    models::{
        credentials::AuthCredentials,
        driver::{Driver, DriverStatus},
        passenger::Passenger,
    },
    store::AccountStore,
};

struct Stored<T> {
    account: T,
    password_hash: String,
}

impl<T: Clone> Stored<T> {
    fn with_credentials(&self, account_id: Uuid) -> (T, AuthCredentials) {
        (
            self.account.clone(),
            AuthCredentials {
                account_id,
                password_hash: self.password_hash.clone(),
            },
        )
    }
}

/// In-process store keyed by phone number, used for local runs and tests.
/// The entry API makes the uniqueness check and the insert one atomic step.
#[derive(Default)]
pub struct MemoryAccountStore {
    drivers: DashMap<String, Stored<Driver>>,
    passengers: DashMap<String, Stored<Passenger>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn exists_driver_by_phone(&self, phone_number: &str) -> Res<bool> {
        Ok(self.drivers.contains_key(phone_number))
    }

    async fn insert_driver(&self, data: DriverCreateRequest) -> Res<Driver> {
        match self.drivers.entry(data.phone_number.clone()) {
            Entry::Occupied(_) => Err(AppError::Conflict(PHONE_NUMBER_TAKEN.to_string())),
            Entry::Vacant(slot) => {
                let now = Utc::now().naive_utc();
                let driver = Driver {
                    id: Uuid::new_v4(),
                    first_name: data.first_name,
                    last_name: data.last_name,
                    phone_number: data.phone_number,
                    dob: data.dob,
                    email: data.email,
                    license_number: data.license_number,
                    vehicle_model: data.vehicle_model,
                    profile_picture: data.profile_picture,
                    vehicle_front_picture: data.vehicle_front_picture,
                    license_certificate: data.license_certificate,
                    status: DriverStatus::Pending,
                    created_at: now,
                    updated_at: now,
                };
                slot.insert(Stored {
                    account: driver.clone(),
                    password_hash: data.password_hash,
                });
                Ok(driver)
            }
        }
    }

    async fn get_driver_with_password_hash(
        &self,
        phone_number: &str,
    ) -> Res<Option<(Driver, AuthCredentials)>> {
        Ok(self
            .drivers
            .get(phone_number)
            .map(|stored| stored.with_credentials(stored.account.id)))
    }

    async fn get_driver_by_id(&self, driver_id: Uuid) -> Res<Option<Driver>> {
        Ok(self
            .drivers
            .iter()
            .find(|entry| entry.account.id == driver_id)
            .map(|entry| entry.account.clone()))
    }

    async fn get_drivers_by_status(&self, status: DriverStatus) -> Res<Vec<Driver>> {
        let mut drivers: Vec<Driver> = self
            .drivers
            .iter()
            .filter(|entry| entry.account.status == status)
            .map(|entry| entry.account.clone())
            .collect();
        drivers.sort_by_key(|driver| (driver.created_at, driver.id));
        Ok(drivers)
    }

    async fn update_driver_status(
        &self,
        driver_id: Uuid,
        status: DriverStatus,
    ) -> Res<Option<Driver>> {
        Ok(self
            .drivers
            .iter_mut()
            .find(|entry| entry.account.id == driver_id)
            .map(|mut entry| {
                entry.account.status = status;
                entry.account.updated_at = Utc::now().naive_utc();
                entry.account.clone()
            }))
    }

    async fn exists_passenger_by_phone(&self, phone_number: &str) -> Res<bool> {
        Ok(self.passengers.contains_key(phone_number))
    }

    async fn insert_passenger(&self, data: PassengerCreateRequest) -> Res<Passenger> {
        match self.passengers.entry(data.phone_number.clone()) {
            Entry::Occupied(_) => Err(AppError::Conflict(PHONE_NUMBER_TAKEN.to_string())),
            Entry::Vacant(slot) => {
                let now = Utc::now().naive_utc();
                let passenger = Passenger {
                    id: Uuid::new_v4(),
                    first_name: data.first_name,
                    last_name: data.last_name,
                    phone_number: data.phone_number,
                    dob: data.dob,
                    email: data.email,
                    created_at: now,
                    updated_at: now,
                };
                slot.insert(Stored {
                    account: passenger.clone(),
                    password_hash: data.password_hash,
                });
                Ok(passenger)
            }
        }
    }

    async fn get_passenger_with_password_hash(
        &self,
        phone_number: &str,
    ) -> Res<Option<(Passenger, AuthCredentials)>> {
        Ok(self
            .passengers
            .get(phone_number)
            .map(|stored| stored.with_credentials(stored.account.id)))
    }

    async fn get_passenger_by_id(&self, passenger_id: Uuid) -> Res<Option<Passenger>> {
        Ok(self
            .passengers
            .iter()
            .find(|entry| entry.account.id == passenger_id)
            .map(|entry| entry.account.clone()))
    }

    async fn get_passengers(&self) -> Res<Vec<Passenger>> {
        let mut passengers: Vec<Passenger> = self
            .passengers
            .iter()
            .map(|entry| entry.account.clone())
            .collect();
        passengers.sort_by_key(|passenger| (passenger.created_at, passenger.id));
        Ok(passengers)
    }
}
