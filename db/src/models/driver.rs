use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Approval state of a driver account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "driver_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DriverStatus {
    Pending,
    Approved,
}

impl DriverStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriverStatus::Pending => "pending",
            DriverStatus::Approved => "approved",
        }
    }
}

/// A driver account as exposed to clients. The password hash lives in
/// `AuthCredentials` and is never part of this struct.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub dob: NaiveDate,
    pub email: Option<String>,
    pub license_number: String,
    pub vehicle_model: String,
    pub profile_picture: String,
    pub vehicle_front_picture: String,
    pub license_certificate: String,
    pub status: DriverStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
