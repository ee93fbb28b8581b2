use actix_web::{Responder, patch, web};
use common::{
    error::{AppError, Res},
    http::Success,
};
use db::store::SharedStore;
use uuid::Uuid;

use crate::dtos::driver::{DriverStatusResponse, UpdateDriverStatusRequest};

/// Moves a driver between `pending` and `approved`.
///
/// # Input
/// - `path`: driver id
/// - `req`: JSON payload `{ "status": "approved" | "pending" }`
/// - header `x-api-key`, checked by the admin key middleware
///
/// # Output
/// - Success: 200 with the updated driver
/// - Error: 400 for a missing or unknown status, 404 if no driver has the id
///
/// # Example
/// ```bash
/// curl -X PATCH http://localhost:3000/api/admins/driver/$ID/status \
///   -H "x-api-key: $ADMIN_API_KEY" \
///   -H "Content-Type: application/json" \
///   -d '{"status":"approved"}'
/// ```
#[patch("/driver/{id}/status")]
pub async fn patch_driver_status(
    path: web::Path<String>,
    req: web::Json<UpdateDriverStatusRequest>,
    store: web::Data<SharedStore>,
) -> Res<impl Responder> {
    let status = req
        .into_inner()
        .status
        .ok_or_else(|| AppError::Validation("Details missing: status".to_string()))?;
    let not_found = || AppError::NotFound("Driver not found".to_string());
    let driver_id = Uuid::parse_str(&path.into_inner()).map_err(|_| not_found())?;

    let driver = store
        .update_driver_status(driver_id, status)
        .await?
        .ok_or_else(not_found)?;
    log::info!("Driver {} is now {}", driver.id, driver.status.as_str());

    Success::ok(DriverStatusResponse {
        message: "Driver status updated".to_string(),
        driver,
    })
}
