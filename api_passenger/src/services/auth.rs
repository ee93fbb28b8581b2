use common::{
    auth::PhoneCredentials,
    error::{AppError, Res},
    password::verify_password,
};
use db::{models::passenger::Passenger, store::AccountStore};

/// Authenticates a passenger by phone number and password.
/// If no passenger has the phone number, returns 407
/// If the password does not match the stored hash, returns 403
pub async fn authenticate_passenger(
    store: &dyn AccountStore,
    credentials: &PhoneCredentials,
) -> Res<Passenger> {
    let (passenger, stored) = store
        .get_passenger_with_password_hash(&credentials.phone_number)
        .await?
        .ok_or_else(|| {
            AppError::AccountNotFound("Passenger not found invalid phone number".to_string())
        })?;

    if verify_password(&credentials.password, &stored.password_hash) {
        Ok(passenger)
    } else {
        Err(AppError::InvalidCredentials("Invalid password".to_string()))
    }
}
