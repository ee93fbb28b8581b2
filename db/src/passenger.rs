use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    dtos::passenger::PassengerCreateRequest,
    map_unique_violation,
    models::{credentials::AuthCredentials, passenger::Passenger},
};

const PASSENGER_COLUMNS: &str =
    "id, first_name, last_name, phone_number, dob, email, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct PassengerWithHash {
    #[sqlx(flatten)]
    passenger: Passenger,
    password_hash: String,
}

pub async fn exists_passenger_by_phone<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    phone_number: &str,
) -> Res<bool> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM passengers WHERE phone_number = $1)")
        .bind(phone_number)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}

pub async fn insert_passenger<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: PassengerCreateRequest,
) -> Res<Passenger> {
    let query = format!(
        r#"
        INSERT INTO passengers (first_name, last_name, phone_number, dob, email, password_hash)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {PASSENGER_COLUMNS}
        "#
    );
    sqlx::query_as::<_, Passenger>(&query)
        .bind(data.first_name)
        .bind(data.last_name)
        .bind(data.phone_number)
        .bind(data.dob)
        .bind(data.email)
        .bind(data.password_hash)
        .fetch_one(executor)
        .await
        .map_err(map_unique_violation)
}

pub async fn get_passenger_with_password_hash<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    phone_number: &str,
) -> Res<Option<(Passenger, AuthCredentials)>> {
    let query = format!(
        "SELECT {PASSENGER_COLUMNS}, password_hash FROM passengers WHERE phone_number = $1"
    );
    let row = sqlx::query_as::<_, PassengerWithHash>(&query)
        .bind(phone_number)
        .fetch_optional(executor)
        .await?;
    Ok(row.map(|row| {
        let credentials = AuthCredentials {
            account_id: row.passenger.id,
            password_hash: row.password_hash,
        };
        (row.passenger, credentials)
    }))
}

pub async fn get_passenger_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    passenger_id: Uuid,
) -> Res<Option<Passenger>> {
    let query = format!("SELECT {PASSENGER_COLUMNS} FROM passengers WHERE id = $1");
    sqlx::query_as::<_, Passenger>(&query)
        .bind(passenger_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_passengers<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
) -> Res<Vec<Passenger>> {
    let query = format!("SELECT {PASSENGER_COLUMNS} FROM passengers ORDER BY created_at, id");
    sqlx::query_as::<_, Passenger>(&query)
        .fetch_all(executor)
        .await
        .map_err(AppError::from)
}
