use actix_web::{Responder, get, web};
use common::{
    error::{AppError, Res},
    http::Success,
    jwt::SessionClaims,
    misc::Role,
};
use db::{models::driver::DriverStatus, store::SharedStore};

use crate::dtos::driver::{CurrentDriverResponse, DriverRosterResponse};

async fn roster(store: &SharedStore, status: DriverStatus) -> Res<DriverRosterResponse> {
    let drivers = store.get_drivers_by_status(status).await?;
    Ok(DriverRosterResponse {
        count: drivers.len(),
        drivers,
    })
}

/// Lists approved drivers, oldest registration first.
#[get("")]
pub async fn get_approved(store: web::Data<SharedStore>) -> Res<impl Responder> {
    Success::ok(roster(&store, DriverStatus::Approved).await?)
}

/// Lists drivers waiting for approval.
#[get("/pending")]
pub async fn get_pending(store: web::Data<SharedStore>) -> Res<impl Responder> {
    Success::ok(roster(&store, DriverStatus::Pending).await?)
}

/// Returns the driver the session belongs to.
///
/// # Output
/// - Success: 200 with `{ driver }`
/// - Error: 401 without a driver session or when the account no longer exists
#[get("/me")]
pub async fn get_me(
    claims: SessionClaims,
    store: web::Data<SharedStore>,
) -> Res<impl Responder> {
    let driver_id = claims.require_role(Role::Driver)?;
    let driver = store
        .get_driver_by_id(driver_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Session account no longer exists".to_string()))?;
    Success::ok(CurrentDriverResponse { driver })
}
