use common::error::{AppError, Res};
use db::models::plan::Plan;
use db::store::{Store, subscribed_plan};
use uuid::Uuid;

use crate::models::sub::{ServiceUsage, SubscriptionSummary};

/// Subscribes a user to a plan, replacing any existing subscription
/// (one live row per user). Usage counters are untouched: they are
/// keyed off (user, service) independent of the plan held.
pub async fn subscribe<S: Store + ?Sized>(
    store: &S,
    user_id: &str,
    plan_id: Uuid,
) -> Res<Plan> {
    let plan = store
        .find_plan(plan_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Plan not found".to_string()))?;
    store.upsert_subscription(user_id, plan_id).await?;
    Ok(plan)
}

/// Update-only plan change: fails with 404 when the user has no
/// subscription to change.
pub async fn change_plan<S: Store + ?Sized>(
    store: &S,
    user_id: &str,
    plan_id: Uuid,
) -> Res<Plan> {
    let plan = store
        .find_plan(plan_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Plan not found".to_string()))?;
    if !store.update_subscription(user_id, plan_id).await? {
        return Err(AppError::NotFound("Subscription not found".to_string()));
    }
    Ok(plan)
}

/// Builds the usage summary over the subscribed plan's configured
/// limits.
pub async fn summary<S: Store + ?Sized>(store: &S, user_id: &str) -> Res<SubscriptionSummary> {
    let plan = subscribed_plan(store, user_id).await?;

    let mut usage = Vec::with_capacity(plan.limits.len());
    for (service, limit) in plan.limits.iter() {
        let used = store.usage_count(user_id, service).await?;
        usage.push(ServiceUsage {
            service: service.clone(),
            used,
            limit: *limit,
            remaining: (limit - used).max(0),
        });
    }

    Ok(SubscriptionSummary {
        user_id: user_id.to_string(),
        plan_name: plan.name,
        plan_id: plan.id,
        usage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use db::store::memory::MemoryStore;

    #[tokio::test]
    async fn subscribe_replaces_existing_row() {
        let store = MemoryStore::new();
        let basic = store.add_plan("Basic Plan", &["compute"], &[("compute", 30)]);
        let pro = store.add_plan("Pro Plan", &["compute", "ai"], &[("compute", 100)]);

        subscribe(&store, "alice", basic).await.unwrap();
        subscribe(&store, "alice", pro).await.unwrap();

        let sub = store.find_subscription("alice").await.unwrap().unwrap();
        assert_eq!(sub.plan_id, pro);
    }

    #[tokio::test]
    async fn subscribe_to_unknown_plan_is_not_found() {
        let store = MemoryStore::new();
        let err = subscribe(&store, "alice", Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(store.find_subscription("alice").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn plan_switch_preserves_usage_counters() {
        let store = MemoryStore::new();
        let basic = store.add_plan("Basic Plan", &["compute"], &[("compute", 30)]);
        let pro = store.add_plan("Pro Plan", &["compute"], &[("compute", 100)]);

        subscribe(&store, "alice", basic).await.unwrap();
        store.record_usage("alice", "compute").await.unwrap();
        store.record_usage("alice", "compute").await.unwrap();

        change_plan(&store, "alice", pro).await.unwrap();
        assert_eq!(store.usage_count("alice", "compute").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn change_plan_requires_existing_subscription() {
        let store = MemoryStore::new();
        let pro = store.add_plan("Pro Plan", &["compute"], &[("compute", 100)]);

        let err = change_plan(&store, "alice", pro).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn summary_reports_remaining_quota() {
        let store = MemoryStore::new();
        let plan = store.add_plan("Basic Plan", &["compute"], &[("compute", 3)]);
        subscribe(&store, "alice", plan).await.unwrap();

        store.record_usage("alice", "compute").await.unwrap();

        let summary = summary(&store, "alice").await.unwrap();
        assert_eq!(summary.plan_name, "Basic Plan");
        assert_eq!(summary.usage.len(), 1);
        assert_eq!(summary.usage[0].used, 1);
        assert_eq!(summary.usage[0].limit, 3);
        assert_eq!(summary.usage[0].remaining, 2);
    }
}
