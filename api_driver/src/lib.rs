use actix_web::web;

pub mod routes {
    pub mod auth;
    pub mod driver;
}
pub mod services {
    pub mod auth;
    pub mod registration;
}
pub mod dtos {
    pub mod driver;
}
pub mod misc {
    pub mod documents;
    pub mod form;
}

/// Routes under `/driver`: registration, login/logout, rosters and the
/// current session's account.
pub fn mount_driver() -> actix_web::Scope {
    web::scope("/driver")
        .service(routes::auth::post_register)
        .service(routes::auth::post_login)
        .service(routes::auth::post_logout)
        .service(routes::driver::get_approved)
        .service(routes::driver::get_pending)
        .service(routes::driver::get_me)
}
