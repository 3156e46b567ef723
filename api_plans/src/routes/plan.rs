use std::sync::Arc;

use actix_web::{Responder, delete, get, post, put, web};
use common::error::Res;
use common::http::Success;
use db::dtos::plan::PlanInput;
use sqlx::PgPool;
use uuid::Uuid;

use crate::services;

/// Creates a plan.
///
/// # Input
/// - JSON body: name, description, permissions (service list),
///   limits (service -> max uses)
///
/// # Output
/// - 201 on success, 409 when the name is taken
#[post("")]
pub async fn post_plan(
    plan: web::Json<PlanInput>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    services::plan::create_plan(pg_pool, &plan).await?;
    Success::created(serde_json::json!({ "message": "Created new plan!" }))
}

#[get("")]
pub async fn get_plans(pool: web::Data<Arc<PgPool>>) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let plans = services::plan::list_plans(pg_pool).await?;
    Success::ok(plans)
}

#[get("/{plan_id}")]
pub async fn get_plan(
    path: web::Path<Uuid>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let plan = services::plan::get_plan(pg_pool, path.into_inner()).await?;
    Success::ok(plan)
}

/// Replaces a plan's fields and returns the updated plan.
#[put("/{plan_id}")]
pub async fn put_plan(
    path: web::Path<Uuid>,
    plan: web::Json<PlanInput>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let updated = services::plan::update_plan(pg_pool, path.into_inner(), &plan).await?;
    Success::ok(updated)
}

#[delete("/{plan_id}")]
pub async fn delete_plan(
    path: web::Path<Uuid>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    services::plan::delete_plan(pg_pool, path.into_inner()).await?;
    Success::ok(serde_json::json!({ "message": "Plan deleted" }))
}
