use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionInput {
    /// User identifier.
    pub user_id: String,
    /// Plan the user is subscribing to.
    pub plan_id: Uuid,
}
