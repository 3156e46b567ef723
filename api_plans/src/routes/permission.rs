use std::sync::Arc;

use actix_web::{Responder, delete, get, post, put, web};
use common::error::Res;
use common::http::Success;
use db::dtos::permission::PermissionInput;
use sqlx::PgPool;

use crate::services;

/// Creates a permission record (descriptive metadata only).
///
/// # Output
/// - 201 on success, 409 when the name is taken
#[post("")]
pub async fn post_permission(
    permission: web::Json<PermissionInput>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    services::permission::create_permission(pg_pool, &permission).await?;
    Success::created(serde_json::json!({ "message": "Created new permission" }))
}

#[get("")]
pub async fn get_permissions(pool: web::Data<Arc<PgPool>>) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let permissions = services::permission::list_permissions(pg_pool).await?;
    Success::ok(permissions)
}

/// Rewrites a permission addressed by its current name and returns the
/// updated document.
#[put("/{name}")]
pub async fn put_permission(
    path: web::Path<String>,
    permission: web::Json<PermissionInput>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let updated =
        services::permission::update_permission(pg_pool, &path.into_inner(), &permission).await?;
    Success::ok(updated)
}

#[delete("/{name}")]
pub async fn delete_permission(
    path: web::Path<String>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let name = path.into_inner();
    services::permission::delete_permission(pg_pool, &name).await?;
    Success::ok(serde_json::json!({ "message": format!("Permission '{}' deleted", name) }))
}
