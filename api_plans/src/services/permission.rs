use common::error::{AppError, Res};
use db::dtos::permission::PermissionInput;
use db::models::permission::Permission;
use sqlx::PgPool;

pub async fn create_permission(pool: &PgPool, input: &PermissionInput) -> Res<()> {
    if db::permission::exists_permission(pool, &input.name).await? {
        return Err(AppError::Conflict(
            "Permission with this name already exists".to_string(),
        ));
    }
    db::permission::insert_permission(pool, input).await
}

pub async fn list_permissions(pool: &PgPool) -> Res<Vec<Permission>> {
    db::permission::list_permissions(pool).await
}

pub async fn update_permission(
    pool: &PgPool,
    name: &str,
    input: &PermissionInput,
) -> Res<Permission> {
    db::permission::update_permission(pool, name, input)
        .await?
        .ok_or_else(|| AppError::NotFound("Permission not found".to_string()))
}

pub async fn delete_permission(pool: &PgPool, name: &str) -> Res<()> {
    if !db::permission::delete_permission(pool, name).await? {
        return Err(AppError::NotFound("Permission not found".to_string()));
    }
    Ok(())
}
