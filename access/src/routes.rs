use actix_web::{Responder, get, web};
use common::error::Res;
use common::http::Success;
use db::store::PgStore;

use crate::service;

/// Reports whether a user's plan permits a service.
///
/// # Output
/// - 200 with a bare JSON boolean
/// - 404 when the user has no subscription or the plan is missing
#[get("/{user_id}/{service}")]
pub async fn get_access(
    path: web::Path<(String, String)>,
    store: web::Data<PgStore>,
) -> Res<impl Responder> {
    let (user_id, service) = path.into_inner();
    let allowed = service::check_access(store.get_ref(), &user_id, &service).await?;
    Success::ok(allowed)
}
