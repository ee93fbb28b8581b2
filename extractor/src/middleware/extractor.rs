use std::{future::Future, pin::Pin, rc::Rc, sync::Arc};

use actix_web::{
    Error, HttpMessage,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header,
};
use futures::future::{Ready, ok};

use common::{
    env_config::JwtConfig,
    error::Res,
    jwt::{self, SESSION_COOKIE, SessionClaims},
};

/// Validates the session token, if any, and stores the outcome as
/// `Res<SessionClaims>` in the request extensions. Requests without a token
/// pass through untouched; handlers decide whether a session is required.
pub struct ExtractionMiddleware {
    jwt_config: Rc<JwtConfig>,
}

impl ExtractionMiddleware {
    pub fn new(jwt_config: JwtConfig) -> Self {
        Self {
            jwt_config: Rc::new(jwt_config),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ExtractionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Transform = ExtractionMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(ExtractionMiddlewareService {
            service: Arc::new(service),
            jwt_config: Rc::clone(&self.jwt_config),
        })
    }
}

pub struct ExtractionMiddlewareService<S> {
    service: Arc<S>,
    jwt_config: Rc<JwtConfig>,
}

impl<S, B> Service<ServiceRequest> for ExtractionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // the cookie set at login wins over a bearer header
        let token = req
            .cookie(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_owned())
            .filter(|value| !value.is_empty())
            .or_else(|| bearer_token(&req));

        if let Some(token) = token {
            let claims_res: Res<SessionClaims> = jwt::validate_jwt(&token, &self.jwt_config.secret);
            if let Err(e) = &claims_res {
                log::debug!("Rejected session token: {}", e);
            }
            req.extensions_mut().insert(claims_res);
        }

        let srv = Arc::clone(&self.service);
        Box::pin(async move { srv.call(req).await.map(|res| res.map_into_boxed_body()) })
    }
}

fn bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_owned())
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use actix_web::{App, HttpResponse, cookie::Cookie, test, web};
    use common::{
        error::AppError,
        jwt::{ClaimsSpec, generate_jwt},
        misc::Role,
    };
    use uuid::Uuid;

    use super::*;

    fn jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "extractor-secret".to_string(),
            expiration_hours: 1,
        }
    }

    async fn whoami(claims: SessionClaims) -> HttpResponse {
        HttpResponse::Ok().body(claims.account_id.to_string())
    }

    async fn outcome(req: actix_web::HttpRequest) -> HttpResponse {
        match req.extensions().get::<Res<SessionClaims>>() {
            None => HttpResponse::Ok().body("none"),
            Some(Ok(_)) => HttpResponse::Ok().body("valid"),
            Some(Err(AppError::Jwt(_))) => HttpResponse::Ok().body("invalid"),
            Some(Err(_)) => HttpResponse::Ok().body("other"),
        }
    }

    fn token_for(account_id: Uuid) -> String {
        generate_jwt(
            ClaimsSpec {
                account_id,
                role: Role::Driver,
            },
            &jwt_config(),
        )
        .unwrap()
    }

    #[actix_web::test]
    async fn reads_token_from_cookie_or_bearer_header() {
        let app = test::init_service(
            App::new()
                .wrap(ExtractionMiddleware::new(jwt_config()))
                .route("/whoami", web::get().to(whoami)),
        )
        .await;
        let account_id = Uuid::new_v4();

        let req = test::TestRequest::get()
            .uri("/whoami")
            .cookie(Cookie::new(SESSION_COOKIE, token_for(account_id)))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, account_id.to_string());

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token_for(account_id))))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, account_id.to_string());

        let req = test::TestRequest::get().uri("/whoami").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 401);
    }

    #[actix_web::test]
    async fn records_missing_and_invalid_tokens() {
        let app = test::init_service(
            App::new()
                .wrap(ExtractionMiddleware::new(jwt_config()))
                .route("/outcome", web::get().to(outcome)),
        )
        .await;

        let req = test::TestRequest::get().uri("/outcome").to_request();
        assert_eq!(test::call_and_read_body(&app, req).await, "none");

        let req = test::TestRequest::get()
            .uri("/outcome")
            .cookie(Cookie::new(SESSION_COOKIE, "not.a.jwt"))
            .to_request();
        assert_eq!(test::call_and_read_body(&app, req).await, "invalid");

        let req = test::TestRequest::get()
            .uri("/outcome")
            .cookie(Cookie::new(SESSION_COOKIE, token_for(Uuid::new_v4())))
            .to_request();
        assert_eq!(test::call_and_read_body(&app, req).await, "valid");
    }
}
