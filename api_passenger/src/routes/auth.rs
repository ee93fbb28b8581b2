use std::sync::Arc;

use actix_web::{HttpResponse, Responder, post, web};
use common::{
    auth::LoginRequest,
    env_config::Config,
    error::Res,
    http::MessageResponse,
    jwt::{self, ClaimsSpec},
    misc::Role,
};
use db::store::SharedStore;

use crate::{
    dtos::passenger::{PassengerRegistration, PassengerResponse, RegisterPassengerRequest},
    services,
};

/// Registers a new passenger.
///
/// # Input
/// - `req`: JSON payload with `firstName`, `lastName`, `password`,
///   `phoneNumber`, `dob` and `email`, all required
/// - `store`: Account store
///
/// # Output
/// - Success: 200 with the created passenger
/// - Error: 400 for missing or malformed input, 407 if the phone number is taken
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/api/passenger/register', {
///   method: 'POST',
///   headers: { 'Content-Type': 'application/json' },
///   body: JSON.stringify({
///     firstName: 'Sana',
///     lastName: 'Malik',
///     password: 's3cret!',
///     phoneNumber: '03111234567',
///     dob: '02/01/1998',
///     email: 'sana@example.com'
///   })
/// });
/// ```
#[post("/register")]
pub async fn post_register(
    req: web::Json<RegisterPassengerRequest>,
    store: web::Data<SharedStore>,
) -> Res<impl Responder> {
    let registration = PassengerRegistration::try_from(req.into_inner())?;
    let passenger = services::registration::register_passenger(&***store, registration).await?;

    Ok(HttpResponse::Ok().json(PassengerResponse {
        message: "Registration complete".to_string(),
        passenger,
    }))
}

/// Logs a passenger in and sets the `token` session cookie.
///
/// # Output
/// - Success: 200 with the passenger
/// - Error: 407 unknown phone number, 403 wrong password
#[post("/login")]
pub async fn post_login(
    login_data: web::Json<LoginRequest>,
    store: web::Data<SharedStore>,
    config: web::Data<Arc<Config>>,
) -> Res<impl Responder> {
    let credentials = login_data.into_inner().into_credentials()?;
    let passenger = services::auth::authenticate_passenger(&***store, &credentials).await?;
    let token = jwt::generate_jwt(
        ClaimsSpec {
            account_id: passenger.id,
            role: Role::Passenger,
        },
        &config.jwt_config,
    )?;

    Ok(HttpResponse::Ok()
        .cookie(jwt::session_cookie(
            token,
            &config.jwt_config,
            config.cookie_secure,
        ))
        .json(PassengerResponse {
            message: "Passenger Logged In".to_string(),
            passenger,
        }))
}

#[post("/logout")]
pub async fn post_logout(config: web::Data<Arc<Config>>) -> Res<impl Responder> {
    Ok(HttpResponse::Ok()
        .cookie(jwt::removal_cookie(config.cookie_secure))
        .json(MessageResponse::new(format!(
            "{} logged out",
            Role::Passenger.title()
        ))))
}
