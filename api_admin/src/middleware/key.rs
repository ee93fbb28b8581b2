use std::{future::Future, pin::Pin, sync::Arc};

use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    web,
};
use common::{env_config::Config, error::AppError};
use futures::future::{Ready, ok};
use subtle::ConstantTimeEq;

/// Header carrying the shared admin key.
pub const ADMIN_KEY_HEADER: &str = "x-api-key";

/// Rejects requests whose `x-api-key` header does not match the configured
/// admin key. With no key configured every request is rejected.
pub struct AdminKeyMiddleware {}

impl AdminKeyMiddleware {
    pub fn new() -> Self {
        AdminKeyMiddleware {}
    }
}

impl Default for AdminKeyMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, B> Transform<S, ServiceRequest> for AdminKeyMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Transform = AdminKeyMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AdminKeyMiddlewareService {
            service: Arc::new(service),
        })
    }
}

pub struct AdminKeyMiddlewareService<S> {
    service: Arc<S>,
}

impl<S, B> Service<ServiceRequest> for AdminKeyMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let provided = req
            .headers()
            .get(ADMIN_KEY_HEADER)
            .and_then(|value| value.to_str().ok());
        let verdict = match req.app_data::<web::Data<Arc<Config>>>() {
            None => Err(AppError::Internal(
                "Config is not registered as app data".to_string(),
            )),
            Some(config) if key_matches(config.admin_api_key.as_deref(), provided) => Ok(()),
            Some(_) => Err(AppError::Unauthorized("Invalid admin key".to_string())),
        };

        if let Err(e) = verdict {
            log::warn!("Admin request to {} rejected: {}", req.path(), e);
            return Box::pin(async move { Ok(req.error_response(e)) });
        }

        let srv = Arc::clone(&self.service);
        Box::pin(async move { srv.call(req).await.map(|res| res.map_into_boxed_body()) })
    }
}

fn key_matches(expected: Option<&str>, provided: Option<&str>) -> bool {
    match (expected, provided) {
        (Some(expected), Some(provided)) if !expected.is_empty() => {
            expected.as_bytes().ct_eq(provided.as_bytes()).into()
        }
        _ => false,
    }
}
