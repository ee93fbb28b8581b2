use std::future::{Ready, ready};

use actix_web::{
    FromRequest, HttpMessage, HttpRequest,
    cookie::{Cookie, time},
    dev::Payload,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    env_config::JwtConfig,
    error::{AppError, Res},
    misc::Role,
};

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "token";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SessionClaims {
    pub account_id: Uuid,
    pub role: Role,
    pub iat: usize,
    pub exp: usize,
}

pub struct ClaimsSpec {
    pub account_id: Uuid,
    pub role: Role,
}

/// Generates a signed session token for the account.
pub fn generate_jwt(spec: ClaimsSpec, config: &JwtConfig) -> Res<String> {
    let now = Utc::now();
    let expiration = now
        .checked_add_signed(Duration::hours(config.expiration_hours))
        .ok_or_else(|| AppError::Internal("Token expiration overflows".to_string()))?;

    let claims = SessionClaims {
        account_id: spec.account_id,
        role: spec.role,
        iat: now.timestamp() as usize,
        exp: expiration.timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(AppError::from)
}

/// Extracts the claims from a session token, checking signature and expiry.
pub fn validate_jwt(token: &str, secret: &str) -> Res<SessionClaims> {
    let token_data = jsonwebtoken::decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

/// Cookie delivering a freshly issued token. It lives as long as the token.
pub fn session_cookie(token: String, config: &JwtConfig, secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .secure(secure)
        .max_age(time::Duration::hours(config.expiration_hours))
        .finish()
}

/// Cookie that makes the client drop its session token.
pub fn removal_cookie(secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .secure(secure)
        .finish();
    cookie.make_removal();
    cookie
}

/// Handlers take `SessionClaims` as an argument to require a valid session.
/// The claims are put on the request by the extraction middleware.
impl FromRequest for SessionClaims {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let claims = match req.extensions().get::<Res<SessionClaims>>() {
            Some(Ok(claims)) => Ok(claims.clone()),
            Some(Err(_)) => Err(AppError::Unauthorized(
                "Invalid or expired session".to_string(),
            )),
            None => Err(AppError::Unauthorized(
                "No session token provided".to_string(),
            )),
        };
        ready(claims)
    }
}

impl SessionClaims {
    /// Rejects sessions issued for another kind of account.
    pub fn require_role(&self, role: Role) -> Res<Uuid> {
        if self.role == role {
            Ok(self.account_id)
        } else {
            Err(AppError::Unauthorized(format!(
                "Session does not belong to a {}",
                role
            )))
        }
    }
}
