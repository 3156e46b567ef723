use actix_web::web;

pub mod routes;
pub mod service;

pub use service::{LimitStatus, check_limit, reset_usage, track_usage};

pub fn mount_usage() -> actix_web::Scope {
    web::scope("/usage")
        .service(routes::post_track)
        .service(routes::get_limit)
        .service(routes::post_reset)
}
