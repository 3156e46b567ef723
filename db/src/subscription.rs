use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::subscription::Subscription;

pub async fn get_subscription<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: &str,
) -> Res<Option<Subscription>> {
    sqlx::query_as::<_, Subscription>(
        "SELECT user_id, plan_id FROM subscriptions WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

/// Creates or replaces the user's single subscription row in one
/// statement, keyed on user_id.
pub async fn upsert_subscription<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: &str,
    plan_id: Uuid,
) -> Res<()> {
    sqlx::query(
        r#"
        INSERT INTO subscriptions (user_id, plan_id)
        VALUES ($1, $2)
        ON CONFLICT (user_id) DO UPDATE SET plan_id = EXCLUDED.plan_id
        "#,
    )
    .bind(user_id)
    .bind(plan_id)
    .execute(executor)
    .await
    .map_err(AppError::from)?;
    Ok(())
}

/// Update-only plan change. Returns false when the user has no
/// subscription to update.
pub async fn update_subscription<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: &str,
    plan_id: Uuid,
) -> Res<bool> {
    let result = sqlx::query("UPDATE subscriptions SET plan_id = $2 WHERE user_id = $1")
        .bind(user_id)
        .bind(plan_id)
        .execute(executor)
        .await
        .map_err(AppError::from)?;
    Ok(result.rows_affected() > 0)
}
