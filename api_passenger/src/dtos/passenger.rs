use chrono::NaiveDate;
use common::{
    error::{AppError, Res},
    validation::{parse_dob, require_fields, validate_email, validate_password, validate_phone_number},
};
use db::models::passenger::Passenger;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/passenger/register`.
///
/// Every field is optional at the serde level so that missing fields are
/// reported together instead of failing on the first one.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegisterPassengerRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
    pub phone_number: Option<String>,
    pub dob: Option<String>,
    pub email: Option<String>,
}

/// A passenger registration that passed boundary validation.
#[derive(Debug)]
pub struct PassengerRegistration {
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub phone_number: String,
    pub dob: NaiveDate,
    pub email: String,
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl TryFrom<RegisterPassengerRequest> for PassengerRegistration {
    type Error = AppError;

    fn try_from(req: RegisterPassengerRequest) -> Res<Self> {
        let first_name = trimmed(req.first_name);
        let last_name = trimmed(req.last_name);
        let phone_number = trimmed(req.phone_number);
        let dob = trimmed(req.dob);
        let email = trimmed(req.email);
        let password = req.password.filter(|p| !p.trim().is_empty());

        require_fields(&[
            ("firstName", first_name.as_deref()),
            ("lastName", last_name.as_deref()),
            ("password", password.as_deref()),
            ("phoneNumber", phone_number.as_deref()),
            ("dob", dob.as_deref()),
            ("email", email.as_deref()),
        ])?;

        let phone_number = phone_number.unwrap_or_default();
        let password = password.unwrap_or_default();
        let email = email.unwrap_or_default();
        validate_phone_number(&phone_number)?;
        validate_password(&password)?;
        validate_email(&email)?;

        Ok(PassengerRegistration {
            first_name: first_name.unwrap_or_default(),
            last_name: last_name.unwrap_or_default(),
            password,
            phone_number,
            dob: parse_dob(&dob.unwrap_or_default())?,
            email,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct PassengerResponse {
    pub message: String,
    pub passenger: Passenger,
}

#[derive(Debug, Serialize)]
pub struct PassengerRosterResponse {
    pub count: usize,
    pub passengers: Vec<Passenger>,
}

#[derive(Debug, Serialize)]
pub struct CurrentPassengerResponse {
    pub passenger: Passenger,
}
