use common::error::AppError;
use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions, PgSslMode},
};
use std::str::FromStr;

pub mod driver;
pub mod memory;
pub mod passenger;
pub mod store;

pub mod models {
    pub mod credentials;
    pub mod driver;
    pub mod passenger;
}

pub mod dtos {
    pub mod driver;
    pub mod passenger;
}

/// Message returned when a phone number is already registered for a role.
pub const PHONE_NUMBER_TAKEN: &str = "Phone number already exists";

/// Connects to Postgres and applies pending migrations.
pub async fn setup(
    database_url: &str,
    max_connections: u32,
    require_ssl: bool,
) -> Result<PgPool, Box<dyn std::error::Error>> {
    let mut options = PgConnectOptions::from_str(database_url)?;
    if require_ssl {
        options = options.ssl_mode(PgSslMode::Require);
    }

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    log::info!("Database ready ({} max connections)", max_connections);

    Ok(pool)
}

/// Unique-constraint violations can only come from the phone number columns.
pub(crate) fn map_unique_violation(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::Conflict(PHONE_NUMBER_TAKEN.to_string())
        }
        _ => AppError::from(err),
    }
}
