use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};

pub async fn get_usage_count<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: &str,
    service: &str,
) -> Res<i64> {
    sqlx::query_scalar::<_, i64>(
        "SELECT count FROM usages WHERE user_id = $1 AND service = $2",
    )
    .bind(user_id)
    .bind(service)
    .fetch_optional(executor)
    .await
    .map(|count| count.unwrap_or(0))
    .map_err(AppError::from)
}

/// Records one use of a service: creates the counter row with count=1
/// on first use, otherwise increments it. A single statement, so
/// concurrent increments for the same (user, service) pair are never
/// lost.
pub async fn increment_usage<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: &str,
    service: &str,
) -> Res<()> {
    sqlx::query(
        r#"
        INSERT INTO usages (user_id, service, count)
        VALUES ($1, $2, 1)
        ON CONFLICT (user_id, service) DO UPDATE SET count = usages.count + 1
        "#,
    )
    .bind(user_id)
    .bind(service)
    .execute(executor)
    .await
    .map_err(AppError::from)?;
    Ok(())
}

/// Sets an existing counter back to 0. Returns false (and creates
/// nothing) when the row does not exist.
pub async fn reset_usage<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: &str,
    service: &str,
) -> Res<bool> {
    let result = sqlx::query("UPDATE usages SET count = 0 WHERE user_id = $1 AND service = $2")
        .bind(user_id)
        .bind(service)
        .execute(executor)
        .await
        .map_err(AppError::from)?;
    Ok(result.rows_affected() > 0)
}
