use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::Key;
use actix_web::web;

use middleware::role::RoleGuard;

pub mod identity;
pub mod verifier;

pub mod middleware {
    pub mod role;
}
pub mod routes {
    pub mod auth;
}
pub mod services {
    pub mod auth;
}
mod dtos {
    pub(crate) mod auth;
}

pub fn mount_auth() -> actix_web::Scope {
    web::scope("/auth")
        .service(routes::auth::post_register)
        .service(routes::auth::post_login)
        .service(routes::auth::post_logout)
}

/// Cookie-backed session layer carrying the logged-in username. The
/// cookie is signed with `secret` (>= 64 bytes) by actix-session; the
/// gateway itself never inspects it beyond presence.
pub fn session_middleware(
    cookie_secure: bool,
    secret: &[u8],
) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::from(secret))
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .build()
}

/// Guards a scope behind a role-equality check against the session
/// user.
pub fn role_guard(role: common::misc::Role) -> RoleGuard {
    RoleGuard::new(role)
}
