use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

/// A subscription plan: the set of services it opens up and the
/// per-service usage ceilings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Plan {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Services members of this plan may reach.
    pub permissions: Vec<String>,
    /// Per-service usage limits. A service missing from this map has
    /// an implicit limit of 0 and is always quota-denied, even when it
    /// appears in `permissions`.
    pub limits: Json<HashMap<String, i64>>,
}

impl Plan {
    pub fn allows(&self, service: &str) -> bool {
        self.permissions.iter().any(|p| p == service)
    }

    pub fn limit_for(&self, service: &str) -> i64 {
        self.limits.get(service).copied().unwrap_or(0)
    }
}
