use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};

use crate::models::user::User;

pub async fn exists_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    username: &str,
) -> Res<bool> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
        .bind(username)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    username: &str,
) -> Res<Option<User>> {
    sqlx::query_as::<_, User>("SELECT username, role FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn insert_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user: &User,
) -> Res<()> {
    sqlx::query("INSERT INTO users (username, role) VALUES ($1, $2)")
        .bind(&user.username)
        .bind(&user.role)
        .execute(executor)
        .await
        .map_err(|e| match &e {
            // Unique violation: concurrent registration with the same name
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
                AppError::Conflict("Username already exists".to_string())
            }
            _ => AppError::from(e),
        })?;
    Ok(())
}
