use actix_web::{Responder, get, post, put, web};
use common::error::Res;
use common::http::Success;
use db::dtos::subscription::SubscriptionInput;
use db::store::PgStore;

use crate::services;

/// Subscribes a user to a plan (upsert: one subscription per user).
///
/// # Input
/// - JSON body: `user_id`, `plan_id`
///
/// # Output
/// - 200 with a confirmation, 404 when the plan does not exist
#[post("")]
pub async fn post_subscribe(
    subscription: web::Json<SubscriptionInput>,
    store: web::Data<PgStore>,
) -> Res<impl Responder> {
    let plan =
        services::sub::subscribe(store.get_ref(), &subscription.user_id, subscription.plan_id)
            .await?;
    Success::ok(serde_json::json!({
        "message": format!("User {} subscribed to plan '{}'", subscription.user_id, plan.name)
    }))
}

/// Returns the user's subscription and a usage summary over the plan's
/// limits.
#[get("/{user_id}")]
pub async fn get_subscription(
    path: web::Path<String>,
    store: web::Data<PgStore>,
) -> Res<impl Responder> {
    let summary = services::sub::summary(store.get_ref(), &path.into_inner()).await?;
    Success::ok(summary)
}

/// Switches an already-subscribed user to another plan.
#[put("/{user_id}")]
pub async fn put_change_plan(
    path: web::Path<String>,
    new_plan: web::Json<SubscriptionInput>,
    store: web::Data<PgStore>,
) -> Res<impl Responder> {
    let user_id = path.into_inner();
    let plan = services::sub::change_plan(store.get_ref(), &user_id, new_plan.plan_id).await?;
    Success::ok(serde_json::json!({
        "message": format!("User {} switched to plan '{}'", user_id, plan.name)
    }))
}
