use actix_web::web;

pub mod pipeline;
pub mod routes;

pub use pipeline::enforce_service_access;

/// The six protected service endpoints plus the home route, mounted
/// at the root.
pub fn mount_services() -> actix_web::Scope {
    web::scope("")
        .service(routes::home)
        .service(routes::compute)
        .service(routes::storage)
        .service(routes::container)
        .service(routes::database)
        .service(routes::app)
        .service(routes::ai)
}
