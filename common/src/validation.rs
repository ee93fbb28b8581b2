use std::sync::LazyLock;

use chrono::{NaiveDate, Utc};
use regex::Regex;

use crate::error::{AppError, Res};

pub const PHONE_NUMBER_DIGITS: usize = 11;
pub const MIN_PASSWORD_LENGTH: usize = 6;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// Collects the names of required fields that are absent or blank.
pub fn missing_fields<'a>(fields: &[(&'a str, Option<&str>)]) -> Vec<&'a str> {
    fields
        .iter()
        .filter(|(_, value)| value.is_none_or(|v| v.trim().is_empty()))
        .map(|(name, _)| *name)
        .collect()
}

/// Fails with `Details missing: ...` when any required field is absent.
pub fn require_fields(fields: &[(&str, Option<&str>)]) -> Res<()> {
    let missing = missing_fields(fields);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Details missing: {}",
            missing.join(", ")
        )))
    }
}

pub fn validate_phone_number(phone_number: &str) -> Res<()> {
    let valid = phone_number.len() == PHONE_NUMBER_DIGITS
        && phone_number.bytes().all(|b| b.is_ascii_digit());
    if valid {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Phone number must be {} digits",
            PHONE_NUMBER_DIGITS
        )))
    }
}

pub fn validate_password(password: &str) -> Res<()> {
    if password.chars().count() >= MIN_PASSWORD_LENGTH {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )))
    }
}

pub fn validate_email(email: &str) -> Res<()> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(AppError::Validation("Invalid email format".to_string()))
    }
}

/// Parses a date of birth in `DD/MM/YYYY` (what the app's sign-up form sends)
/// or ISO `YYYY-MM-DD`. The date must lie in the past.
pub fn parse_dob(dob: &str) -> Res<NaiveDate> {
    let dob = dob.trim();
    let date = NaiveDate::parse_from_str(dob, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(dob, "%Y-%m-%d"))
        .map_err(|_| {
            AppError::Validation("Date of birth must be DD/MM/YYYY or YYYY-MM-DD".to_string())
        })?;
    if date >= Utc::now().date_naive() {
        return Err(AppError::Validation(
            "Date of birth must be in the past".to_string(),
        ));
    }
    Ok(date)
}
