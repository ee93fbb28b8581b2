use db::models::driver::{Driver, DriverStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct UpdateDriverStatusRequest {
    pub status: Option<DriverStatus>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DriverStatusResponse {
    pub message: String,
    pub driver: Driver,
}
