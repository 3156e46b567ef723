use actix_web::dev::HttpServiceFactory;
use actix_web::web;
use common::misc::Role;

pub mod routes {
    pub mod permission;
    pub mod plan;
}
mod services {
    pub(crate) mod permission;
    pub(crate) mod plan;
}

/// Plan catalog administration. Admin-only.
pub fn mount_plans() -> impl HttpServiceFactory {
    web::scope("/plans")
        .wrap(api_auth::role_guard(Role::Admin))
        .service(routes::plan::post_plan)
        .service(routes::plan::get_plans)
        .service(routes::plan::get_plan)
        .service(routes::plan::put_plan)
        .service(routes::plan::delete_plan)
}

/// Permission metadata administration. Admin-only.
pub fn mount_permissions() -> impl HttpServiceFactory {
    web::scope("/permissions")
        .wrap(api_auth::role_guard(Role::Admin))
        .service(routes::permission::post_permission)
        .service(routes::permission::get_permissions)
        .service(routes::permission::put_permission)
        .service(routes::permission::delete_permission)
}
