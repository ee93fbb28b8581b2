use actix_cors::Cors;
use actix_web::http::header::{self, HeaderName};

/// `*` allows any origin; anything else is taken as the single allowed origin.
pub fn middleware(origin: &str) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::COOKIE,
            HeaderName::from_static("x-api-key"),
        ])
        .expose_headers(&[header::SET_COOKIE])
        .supports_credentials()
        .max_age(3600);

    if origin == "*" {
        cors.allow_any_origin()
    } else {
        cors.allowed_origin(origin)
    }
}
