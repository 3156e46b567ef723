use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-service usage line in a subscription summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceUsage {
    pub service: String,
    pub used: i64,
    pub limit: i64,
    pub remaining: i64,
}

/// A user's subscription together with usage against the plan's
/// configured limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionSummary {
    pub user_id: String,
    pub plan_name: String,
    pub plan_id: Uuid,
    pub usage: Vec<ServiceUsage>,
}
