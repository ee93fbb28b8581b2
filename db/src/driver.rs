use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    dtos::driver::DriverCreateRequest,
    map_unique_violation,
    models::{
        credentials::AuthCredentials,
        driver::{Driver, DriverStatus},
    },
};

const DRIVER_COLUMNS: &str = "id, first_name, last_name, phone_number, dob, email, \
     license_number, vehicle_model, profile_picture, vehicle_front_picture, \
     license_certificate, status, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct DriverWithHash {
    #[sqlx(flatten)]
    driver: Driver,
    password_hash: String,
}

pub async fn exists_driver_by_phone<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    phone_number: &str,
) -> Res<bool> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM drivers WHERE phone_number = $1)")
        .bind(phone_number)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}

pub async fn insert_driver<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: DriverCreateRequest,
) -> Res<Driver> {
    let query = format!(
        r#"
        INSERT INTO drivers (first_name, last_name, phone_number, dob, email, license_number,
            vehicle_model, profile_picture, vehicle_front_picture, license_certificate,
            password_hash, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING {DRIVER_COLUMNS}
        "#
    );
    sqlx::query_as::<_, Driver>(&query)
        .bind(data.first_name)
        .bind(data.last_name)
        .bind(data.phone_number)
        .bind(data.dob)
        .bind(data.email)
        .bind(data.license_number)
        .bind(data.vehicle_model)
        .bind(data.profile_picture)
        .bind(data.vehicle_front_picture)
        .bind(data.license_certificate)
        .bind(data.password_hash)
        .bind(DriverStatus::Pending)
        .fetch_one(executor)
        .await
        .map_err(map_unique_violation)
}

pub async fn get_driver_with_password_hash<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    phone_number: &str,
) -> Res<Option<(Driver, AuthCredentials)>> {
    let query = format!("SELECT {DRIVER_COLUMNS}, password_hash FROM drivers WHERE phone_number = $1");
    let row = sqlx::query_as::<_, DriverWithHash>(&query)
        .bind(phone_number)
        .fetch_optional(executor)
        .await?;
    Ok(row.map(|row| {
        let credentials = AuthCredentials {
            account_id: row.driver.id,
            password_hash: row.password_hash,
        };
        (row.driver, credentials)
    }))
}

pub async fn get_driver_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    driver_id: Uuid,
) -> Res<Option<Driver>> {
    let query = format!("SELECT {DRIVER_COLUMNS} FROM drivers WHERE id = $1");
    sqlx::query_as::<_, Driver>(&query)
        .bind(driver_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_drivers_by_status<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    status: DriverStatus,
) -> Res<Vec<Driver>> {
    let query = format!(
        "SELECT {DRIVER_COLUMNS} FROM drivers WHERE status = $1 ORDER BY created_at, id"
    );
    sqlx::query_as::<_, Driver>(&query)
        .bind(status)
        .fetch_all(executor)
        .await
        .map_err(AppError::from)
}

pub async fn update_driver_status<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    driver_id: Uuid,
    status: DriverStatus,
) -> Res<Option<Driver>> {
    let query = format!(
        r#"
        UPDATE drivers
        SET status = $2, updated_at = (now() AT TIME ZONE 'utc')
        WHERE id = $1
        RETURNING {DRIVER_COLUMNS}
        "#
    );
    sqlx::query_as::<_, Driver>(&query)
        .bind(driver_id)
        .bind(status)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}
