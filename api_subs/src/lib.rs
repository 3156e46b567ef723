use actix_web::web;

pub mod routes {
    pub mod sub;
}
mod services {
    pub(crate) mod sub;
}
pub mod models {
    pub mod sub;
}

pub fn mount_subs() -> actix_web::Scope {
    web::scope("/subscriptions")
        .service(routes::sub::post_subscribe)
        .service(routes::sub::get_subscription)
        .service(routes::sub::put_change_plan)
}
