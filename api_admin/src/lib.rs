use actix_web::web;
use middleware::key::AdminKeyMiddleware;

pub mod routes {
    pub mod driver;
}
pub mod middleware {
    pub mod key;
}
mod dtos {
    pub(crate) mod driver;
}

/// Routes under `/admins`. Wrap the scope with [`middleware`] to require the admin key.
pub fn mount_admin() -> actix_web::Scope {
    web::scope("/admins").service(routes::driver::patch_driver_status)
}

pub fn middleware() -> AdminKeyMiddleware {
    AdminKeyMiddleware::new()
}
