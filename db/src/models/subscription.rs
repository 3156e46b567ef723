use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Binds one user to one plan. At most one row per user; changing
/// plans replaces the row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Subscription {
    pub user_id: String,
    pub plan_id: Uuid,
}
