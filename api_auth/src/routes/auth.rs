use actix_session::Session;
use actix_web::{Responder, post, web};
use common::error::{AppError, Res};
use common::http::Success;
use db::store::PgStore;

use crate::dtos::auth::{LoginForm, RegisterForm};
use crate::services;

/// Registers a new user.
///
/// # Input
/// - form fields `username` and `role` ("admin" or "customer")
///
/// # Output
/// - 200 with a confirmation message
/// - 400 for an unknown role, 409 when the username is taken
#[post("/register")]
pub async fn post_register(
    form: web::Form<RegisterForm>,
    store: web::Data<PgStore>,
) -> Res<impl Responder> {
    let user = services::auth::register(store.get_ref(), &form.username, &form.role).await?;
    Success::ok(serde_json::json!({
        "message": format!("User '{}' registered with role '{}'", user.username, user.role)
    }))
}

/// Logs a user in and stores the username in the session cookie.
///
/// # Input
/// - form fields `username` and `role`
///
/// # Output
/// - 200 and a Set-Cookie session header
/// - 401 for an unknown user, 403 on role mismatch
#[post("/login")]
pub async fn post_login(
    form: web::Form<LoginForm>,
    store: web::Data<PgStore>,
    session: Session,
) -> Res<impl Responder> {
    let user = services::auth::login(store.get_ref(), &form.username, &form.role).await?;
    session
        .insert("username", &user.username)
        .map_err(|e| AppError::Internal(format!("Failed to store session: {}", e)))?;
    Success::ok(serde_json::json!({ "message": "Logged in" }))
}

/// Clears the session cookie.
#[post("/logout")]
pub async fn post_logout(session: Session) -> Res<impl Responder> {
    session.purge();
    Success::ok(serde_json::json!({ "message": "Logged out" }))
}
