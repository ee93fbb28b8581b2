use actix_web::{HttpResponse, Responder, error::JsonPayloadError, web};
use serde::Serialize;

use super::error::{AppError, Res};

/// Largest JSON body accepted by any endpoint.
pub const JSON_LIMIT_BYTES: usize = 16 * 1024;

pub struct Success;
impl Success {
    pub fn ok<T: Serialize>(body: T) -> Res<impl Responder> {
        Result::Ok(HttpResponse::Ok().json(body))
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// JSON extractor settings shared by every scope.
///
/// Malformed or oversized bodies are reported as validation errors so the
/// client always gets a `{ "message": ... }` body.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT_BYTES)
        .error_handler(|err, _req| {
            let message = match &err {
                JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
                    "Request body too large".to_string()
                }
                JsonPayloadError::ContentType => "Expected a JSON request body".to_string(),
                other => format!("Invalid request body: {}", other),
            };
            AppError::Validation(message).into()
        })
}
