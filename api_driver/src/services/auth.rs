use common::{
    auth::PhoneCredentials,
    error::{AppError, Res},
    password::verify_password,
};
use db::{
    models::driver::{Driver, DriverStatus},
    store::AccountStore,
};

/// Authenticates a driver by phone number and password.
/// If no driver has the phone number, returns 407
/// If the password does not match the stored hash, returns 403
/// If the password matches but the driver is not approved yet, returns 401
pub async fn authenticate_driver(
    store: &dyn AccountStore,
    credentials: &PhoneCredentials,
) -> Res<Driver> {
    let (driver, stored) = store
        .get_driver_with_password_hash(&credentials.phone_number)
        .await?
        .ok_or_else(|| {
            AppError::AccountNotFound("Driver not found invalid phone number".to_string())
        })?;

    if !verify_password(&credentials.password, &stored.password_hash) {
        return Err(AppError::InvalidCredentials("Invalid password".to_string()));
    }

    if driver.status != DriverStatus::Approved {
        return Err(AppError::ApprovalPending(
            "You're not approved yet".to_string(),
        ));
    }

    Ok(driver)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use common::password::hash_password;
    use db::{dtos::driver::DriverCreateRequest, memory::MemoryAccountStore};

    use super::*;

    async fn seeded_store() -> (MemoryAccountStore, Driver) {
        let store = MemoryAccountStore::new();
        let driver = store
            .insert_driver(DriverCreateRequest {
                first_name: "Bilal".to_string(),
                last_name: "Khan".to_string(),
                phone_number: "03001234567".to_string(),
                dob: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
                email: None,
                license_number: "LHR-22-4411".to_string(),
                vehicle_model: "Suzuki Cultus".to_string(),
                profile_picture: "memory://profile".to_string(),
                vehicle_front_picture: "memory://front".to_string(),
                license_certificate: "memory://license".to_string(),
                password_hash: hash_password("hunter22").unwrap(),
            })
            .await
            .unwrap();
        (store, driver)
    }

    fn credentials(phone_number: &str, password: &str) -> PhoneCredentials {
        PhoneCredentials {
            phone_number: phone_number.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn pending_driver_is_told_only_after_correct_password() {
        let (store, _) = seeded_store().await;

        let err = authenticate_driver(&store, &credentials("03001234567", "wrong-one"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials(_)));

        let err = authenticate_driver(&store, &credentials("03001234567", "hunter22"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ApprovalPending(_)));
    }

    #[tokio::test]
    async fn approved_driver_logs_in_and_unknown_phone_is_not_found() {
        let (store, driver) = seeded_store().await;
        store
            .update_driver_status(driver.id, DriverStatus::Approved)
            .await
            .unwrap();

        let found = authenticate_driver(&store, &credentials("03001234567", "hunter22"))
            .await
            .unwrap();
        assert_eq!(found.id, driver.id);

        let err = authenticate_driver(&store, &credentials("03009999999", "hunter22"))
            .await
            .unwrap_err();
        assert_eq!(err.status().as_u16(), 407);
    }
}
