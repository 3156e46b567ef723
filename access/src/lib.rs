use actix_web::web;

pub mod routes;
pub mod service;

pub use service::check_access;

pub fn mount_access() -> actix_web::Scope {
    web::scope("/access").service(routes::get_access)
}
