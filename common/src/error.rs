use actix_web::{HttpResponse, http::StatusCode};
use thiserror::Error;

pub type Res<T> = std::result::Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "Internal server error";

#[derive(Error, Debug)]
pub enum AppError {
    // === CONVERSION ERRORS ===
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // === APPLICATION ERRORS ===
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    AccountNotFound(String),

    #[error("{0}")]
    InvalidCredentials(String),

    #[error("{0}")]
    ApprovalPending(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// Status code sent to the client for this error.
    ///
    /// Duplicate phone numbers and unknown accounts answer with 407, which is
    /// what the mobile client already branches on.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) | AppError::AccountNotFound(_) => {
                StatusCode::PROXY_AUTHENTICATION_REQUIRED
            }
            AppError::InvalidCredentials(_) => StatusCode::FORBIDDEN,
            AppError::ApprovalPending(_) | AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_)
            | AppError::Jwt(_)
            | AppError::Reqwest(_)
            | AppError::Io(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_http_response(&self) -> HttpResponse {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{}", self);
            return HttpResponse::build(status)
                .json(serde_json::json!({ "message": INTERNAL_MESSAGE }));
        }
        HttpResponse::build(status).json(serde_json::json!({ "message": self.to_string() }))
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        self.to_http_response()
    }
}
