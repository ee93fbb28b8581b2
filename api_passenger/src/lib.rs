use actix_web::web;

pub mod routes {
    pub mod auth;
    pub mod passenger;
}
pub mod services {
    pub mod auth;
    pub mod registration;
}
pub mod dtos {
    pub mod passenger;
}

/// Routes under `/passenger`.
pub fn mount_passenger() -> actix_web::Scope {
    web::scope("/passenger")
        .service(routes::auth::post_register)
        .service(routes::auth::post_login)
        .service(routes::auth::post_logout)
        .service(routes::passenger::get_passengers)
        .service(routes::passenger::get_me)
}
