use std::sync::Arc;

use actix_multipart::Multipart;
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
use storage::SharedStorage;

use crate::{
    dtos::driver::{DriverRegistration, DriverResponse},
    misc::form::read_registration_form,
    services,
};

/// Registers a new driver from a multipart form.
///
/// # Input
/// - `payload`: multipart form with the text fields `firstName`, `lastName`,
///   `password`, `phoneNumber`, `dob`, `licenseNumber`, `vehicleModel`,
///   optional `email`, and the image files `profilePicture`,
///   `vehicleFrontPicture` and `licenseCertificatePicture`
/// - `store`: Account store
/// - `storage`: Document storage
/// - `config`: Application configuration
///
/// # Output
/// - Success: 200 with the created driver in `pending` status
/// - Error: 400 for missing or malformed input, 407 if the phone number is taken
///
/// # Frontend Example
/// ```javascript
/// const form = new FormData();
/// form.append('firstName', 'Bilal');
/// form.append('lastName', 'Khan');
/// form.append('password', 'hunter22');
/// form.append('phoneNumber', '03001234567');
/// form.append('dob', '17/05/1990');
/// form.append('licenseNumber', 'LHR-22-4411');
/// form.append('vehicleModel', 'Suzuki Cultus');
/// form.append('profilePicture', profileFile);
/// form.append('vehicleFrontPicture', frontFile);
/// form.append('licenseCertificatePicture', licenseFile);
///
/// const response = await fetch('/api/driver/register', { method: 'POST', body: form });
/// const { message, driver } = await response.json();
/// ```
#[post("/register")]
pub async fn post_register(
    payload: Multipart,
    store: web::Data<SharedStore>,
    storage: web::Data<SharedStorage>,
    config: web::Data<Arc<Config>>,
) -> Res<impl Responder> {
    let form = read_registration_form(payload, config.max_upload_bytes).await?;
    let registration = DriverRegistration::try_from(form)?;
    let driver = services::registration::register_driver(
        &***store,
        &***storage,
        &config.storage.folder,
        registration,
    )
    .await?;

    Ok(HttpResponse::Ok().json(DriverResponse {
        message: "Registration complete. You can login after approval".to_string(),
        driver,
    }))
}

/// Logs an approved driver in.
///
/// # Input
/// - `login_data`: JSON payload with `phoneNumber` and `password`
///
/// # Output
/// - Success: 200 with the driver, and the session token in the `token` cookie
/// - Error: 407 unknown phone number, 403 wrong password, 401 not approved yet
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/api/driver/login', {
///   method: 'POST',
///   credentials: 'include',
///   headers: { 'Content-Type': 'application/json' },
///   body: JSON.stringify({ phoneNumber: '03001234567', password: 'hunter22' })
/// });
/// ```
#[post("/login")]
pub async fn post_login(
    login_data: web::Json<LoginRequest>,
    store: web::Data<SharedStore>,
    config: web::Data<Arc<Config>>,
) -> Res<impl Responder> {
    let credentials = login_data.into_inner().into_credentials()?;
    let driver = services::auth::authenticate_driver(&***store, &credentials).await?;
    let token = jwt::generate_jwt(
        ClaimsSpec {
            account_id: driver.id,
            role: Role::Driver,
        },
        &config.jwt_config,
    )?;

    Ok(HttpResponse::Ok()
        .cookie(jwt::session_cookie(
            token,
            &config.jwt_config,
            config.cookie_secure,
        ))
        .json(DriverResponse {
            message: "Driver Logged In".to_string(),
            driver,
        }))
}

/// Clears the session cookie. Succeeds with or without a session.
#[post("/logout")]
pub async fn post_logout(config: web::Data<Arc<Config>>) -> Res<impl Responder> {
    Ok(HttpResponse::Ok()
        .cookie(jwt::removal_cookie(config.cookie_secure))
        .json(MessageResponse::new(format!("{} logged out", Role::Driver.title()))))
}
