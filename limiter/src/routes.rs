use actix_web::{Responder, get, post, web};
use common::error::Res;
use common::http::Success;
use db::store::PgStore;
use serde::Deserialize;

use crate::service;

#[derive(Debug, Deserialize)]
pub struct ServiceQuery {
    pub service: String,
}

/// Records one use of a service for a user.
#[post("/{user_id}")]
pub async fn post_track(
    path: web::Path<String>,
    query: web::Query<ServiceQuery>,
    store: web::Data<PgStore>,
) -> Res<impl Responder> {
    service::track_usage(store.get_ref(), &path.into_inner(), &query.service).await?;
    Success::ok(serde_json::json!({
        "message": format!("Logged usage for {}", query.service)
    }))
}

/// Reports whether the user has exhausted the plan's limit for a
/// service.
///
/// # Output
/// - 200 with `{"limit_reached": bool}`
/// - 404 when the user has no subscription or the plan is missing
#[get("/{user_id}/limit")]
pub async fn get_limit(
    path: web::Path<String>,
    query: web::Query<ServiceQuery>,
    store: web::Data<PgStore>,
) -> Res<impl Responder> {
    let status = service::check_limit(store.get_ref(), &path.into_inner(), &query.service).await?;
    Success::ok(status)
}

/// Resets the usage counter for a (user, service) pair to 0.
#[post("/{user_id}/reset")]
pub async fn post_reset(
    path: web::Path<String>,
    query: web::Query<ServiceQuery>,
    store: web::Data<PgStore>,
) -> Res<impl Responder> {
    let reset = service::reset_usage(store.get_ref(), &path.into_inner(), &query.service).await?;
    let message = if reset {
        format!("Usage reset for {}", query.service)
    } else {
        format!("No usage found for {}", query.service)
    };
    Success::ok(serde_json::json!({ "message": message }))
}
