use common::error::Res;
use db::store::{Store, subscribed_plan};

/// Answers whether `user_id` may reach `service`: resolves the user's
/// subscription to its plan and checks membership in the plan's
/// permitted services. Pure read, no side effects.
///
/// A user with no subscription fails with 404 rather than returning
/// false: subscription existence is a precondition for any access
/// decision.
pub async fn check_access<S: Store + ?Sized>(
    store: &S,
    user_id: &str,
    service: &str,
) -> Res<bool> {
    let plan = subscribed_plan(store, user_id).await?;
    Ok(plan.allows(service))
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::error::AppError;
    use db::store::memory::MemoryStore;

    #[tokio::test]
    async fn user_without_subscription_is_denied_everything() {
        let store = MemoryStore::new();
        store.add_user("alice", "customer");
        // a plan exists but alice is not subscribed to it
        store.add_plan("Pro Plan", &["compute"], &[("compute", 100)]);

        let err = check_access(&store, "alice", "compute").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn access_follows_plan_membership() {
        let store = MemoryStore::new();
        let plan = store.add_plan(
            "Basic Plan",
            &["compute", "storage"],
            &[("compute", 30), ("storage", 50)],
        );
        store.upsert_subscription("bob", plan).await.unwrap();

        assert!(check_access(&store, "bob", "compute").await.unwrap());
        assert!(check_access(&store, "bob", "storage").await.unwrap());
        assert!(!check_access(&store, "bob", "ai").await.unwrap());
    }

    #[tokio::test]
    async fn plan_switch_changes_access_on_next_call() {
        let store = MemoryStore::new();
        let basic = store.add_plan("Basic Plan", &["compute"], &[("compute", 30)]);
        let pro = store.add_plan("Pro Plan", &["compute", "ai"], &[("ai", 50)]);
        store.upsert_subscription("bob", basic).await.unwrap();

        assert!(!check_access(&store, "bob", "ai").await.unwrap());

        // no caching: the very next check sees the new plan
        store.upsert_subscription("bob", pro).await.unwrap();
        assert!(check_access(&store, "bob", "ai").await.unwrap());
    }

    #[tokio::test]
    async fn dangling_plan_reference_is_not_found() {
        let store = MemoryStore::new();
        let plan = store.add_plan("Basic Plan", &["compute"], &[("compute", 30)]);
        store.upsert_subscription("bob", plan).await.unwrap();
        store.remove_plan(plan);

        let err = check_access(&store, "bob", "compute").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
