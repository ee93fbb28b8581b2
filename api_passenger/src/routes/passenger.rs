use actix_web::{Responder, get, web};
use common::{
    error::{AppError, Res},
    http::Success,
    jwt::SessionClaims,
    misc::Role,
};
use db::store::SharedStore;

use crate::dtos::passenger::{CurrentPassengerResponse, PassengerRosterResponse};

/// Lists every passenger, oldest registration first.
#[get("")]
pub async fn get_passengers(store: web::Data<SharedStore>) -> Res<impl Responder> {
    let passengers = store.get_passengers().await?;
    Success::ok(PassengerRosterResponse {
        count: passengers.len(),
        passengers,
    })
}

#[get("/me")]
pub async fn get_me(
    claims: SessionClaims,
    store: web::Data<SharedStore>,
) -> Res<impl Responder> {
    let passenger_id = claims.require_role(Role::Passenger)?;
    let passenger = store
        .get_passenger_by_id(passenger_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Session account no longer exists".to_string()))?;
    Success::ok(CurrentPassengerResponse { passenger })
}
