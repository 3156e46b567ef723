use common::error::{AppError, Res};
use db::dtos::plan::PlanInput;
use db::models::plan::Plan;
use sqlx::PgPool;
use uuid::Uuid;

pub async fn create_plan(pool: &PgPool, input: &PlanInput) -> Res<Plan> {
    if db::plan::exists_plan_by_name(pool, &input.name).await? {
        return Err(AppError::Conflict("Plan already exists".to_string()));
    }
    db::plan::insert_plan(pool, input).await
}

pub async fn list_plans(pool: &PgPool) -> Res<Vec<Plan>> {
    db::plan::list_plans(pool).await
}

pub async fn get_plan(pool: &PgPool, plan_id: Uuid) -> Res<Plan> {
    db::plan::get_plan(pool, plan_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Plan not found".to_string()))
}

pub async fn update_plan(pool: &PgPool, plan_id: Uuid, input: &PlanInput) -> Res<Plan> {
    db::plan::update_plan(pool, plan_id, input)
        .await?
        .ok_or_else(|| AppError::NotFound("Plan not found".to_string()))
}

/// Deletes the plan without checking for live subscriptions that
/// reference it; those keep their (now dangling) plan_id.
pub async fn delete_plan(pool: &PgPool, plan_id: Uuid) -> Res<()> {
    if !db::plan::delete_plan(pool, plan_id).await? {
        return Err(AppError::NotFound("Plan not found".to_string()));
    }
    Ok(())
}
