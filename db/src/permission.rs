use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};

use crate::dtos::permission::PermissionInput;
use crate::models::permission::Permission;

pub async fn exists_permission<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    name: &str,
) -> Res<bool> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM permissions WHERE name = $1)")
        .bind(name)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}

pub async fn list_permissions<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
) -> Res<Vec<Permission>> {
    sqlx::query_as::<_, Permission>("SELECT name, endpoint, description FROM permissions")
        .fetch_all(executor)
        .await
        .map_err(AppError::from)
}

pub async fn insert_permission<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: &PermissionInput,
) -> Res<()> {
    sqlx::query("INSERT INTO permissions (name, endpoint, description) VALUES ($1, $2, $3)")
        .bind(&data.name)
        .bind(&data.endpoint)
        .bind(&data.description)
        .execute(executor)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
                AppError::Conflict("Permission with this name already exists".to_string())
            }
            _ => AppError::from(e),
        })?;
    Ok(())
}

/// Rewrites a permission addressed by its current name. Returns the
/// updated document, or `None` when the name matches nothing.
pub async fn update_permission<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    name: &str,
    data: &PermissionInput,
) -> Res<Option<Permission>> {
    sqlx::query_as::<_, Permission>(
        r#"
        UPDATE permissions
        SET name = $2, endpoint = $3, description = $4
        WHERE name = $1
        RETURNING name, endpoint, description
        "#,
    )
    .bind(name)
    .bind(&data.name)
    .bind(&data.endpoint)
    .bind(&data.description)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

pub async fn delete_permission<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    name: &str,
) -> Res<bool> {
    let result = sqlx::query("DELETE FROM permissions WHERE name = $1")
        .bind(name)
        .execute(executor)
        .await
        .map_err(AppError::from)?;
    Ok(result.rows_affected() > 0)
}
