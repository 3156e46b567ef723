use common::error::{AppError, Res};
use sqlx::types::Json;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::dtos::plan::PlanInput;
use crate::models::plan::Plan;

pub async fn exists_plan_by_name<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    name: &str,
) -> Res<bool> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM plans WHERE name = $1)")
        .bind(name)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_plan<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    plan_id: Uuid,
) -> Res<Option<Plan>> {
    sqlx::query_as::<_, Plan>(
        "SELECT id, name, description, permissions, limits FROM plans WHERE id = $1",
    )
    .bind(plan_id)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

pub async fn list_plans<'e, E: Executor<'e, Database = Postgres>>(executor: E) -> Res<Vec<Plan>> {
    sqlx::query_as::<_, Plan>("SELECT id, name, description, permissions, limits FROM plans")
        .fetch_all(executor)
        .await
        .map_err(AppError::from)
}

pub async fn insert_plan<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: &PlanInput,
) -> Res<Plan> {
    sqlx::query_as::<_, Plan>(
        r#"
        INSERT INTO plans (name, description, permissions, limits)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, description, permissions, limits
        "#,
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(&data.permissions)
    .bind(Json(&data.limits))
    .fetch_one(executor)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
            AppError::Conflict("Plan already exists".to_string())
        }
        _ => AppError::from(e),
    })
}

/// Replaces all mutable plan fields. Returns the updated plan, or
/// `None` when no plan carries the given id.
pub async fn update_plan<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    plan_id: Uuid,
    data: &PlanInput,
) -> Res<Option<Plan>> {
    sqlx::query_as::<_, Plan>(
        r#"
        UPDATE plans
        SET name = $2, description = $3, permissions = $4, limits = $5
        WHERE id = $1
        RETURNING id, name, description, permissions, limits
        "#,
    )
    .bind(plan_id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(&data.permissions)
    .bind(Json(&data.limits))
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

/// Deletes a plan. Intentionally performs no referential check against
/// live subscriptions; a dangling reference surfaces as a 404 at
/// access-check time.
pub async fn delete_plan<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    plan_id: Uuid,
) -> Res<bool> {
    let result = sqlx::query("DELETE FROM plans WHERE id = $1")
        .bind(plan_id)
        .execute(executor)
        .await
        .map_err(AppError::from)?;
    Ok(result.rows_affected() > 0)
}
