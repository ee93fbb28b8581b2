use common::{
    error::{AppError, Res},
    password::hash_password,
};
use db::{
    PHONE_NUMBER_TAKEN, dtos::passenger::PassengerCreateRequest, models::passenger::Passenger,
    store::AccountStore,
};

use crate::dtos::passenger::PassengerRegistration;

/// Creates a passenger account. Passengers can log in right away.
pub async fn register_passenger(
    store: &dyn AccountStore,
    registration: PassengerRegistration,
) -> Res<Passenger> {
    if store
        .exists_passenger_by_phone(&registration.phone_number)
        .await?
    {
        return Err(AppError::Conflict(PHONE_NUMBER_TAKEN.to_string()));
    }

    let passenger = store
        .insert_passenger(PassengerCreateRequest {
            password_hash: hash_password(&registration.password)?,
            first_name: registration.first_name,
            last_name: registration.last_name,
            phone_number: registration.phone_number,
            dob: registration.dob,
            email: registration.email,
        })
        .await?;

    log::info!("Passenger {} registered", passenger.id);
    Ok(passenger)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use db::memory::MemoryAccountStore;

    use super::*;

    fn registration() -> PassengerRegistration {
        PassengerRegistration {
            first_name: "Sana".to_string(),
            last_name: "Malik".to_string(),
            password: "s3cret!".to_string(),
            phone_number: "03111234567".to_string(),
            dob: NaiveDate::from_ymd_opt(1998, 1, 2).unwrap(),
            email: "sana@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn stores_a_hash_and_rejects_duplicates() {
        let store = MemoryAccountStore::new();
        let passenger = register_passenger(&store, registration()).await.unwrap();

        let (_, credentials) = store
            .get_passenger_with_password_hash("03111234567")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(credentials.account_id, passenger.id);
        assert_ne!(credentials.password_hash, "s3cret!");

        let err = register_passenger(&store, registration()).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref m) if m == PHONE_NUMBER_TAKEN));
    }
}
