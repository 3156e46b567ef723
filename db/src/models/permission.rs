use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Descriptive metadata for a service permission. Not consulted by the
/// enforcement pipeline; `Plan::permissions` holds the authoritative
/// service list.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Permission {
    pub name: String,
    pub endpoint: String,
    pub description: String,
}
