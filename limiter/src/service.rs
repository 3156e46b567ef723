use common::error::Res;
use db::store::{Store, subscribed_plan};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct LimitStatus {
    pub limit_reached: bool,
}

/// Compares the user's usage counter against the subscribed plan's
/// limit for `service`. Read-only: callers must invoke this before
/// [`track_usage`] so limits are enforced prospectively.
///
/// A service missing from the plan's limits map defaults to limit 0,
/// so even the first use (usage 0) reports the limit as reached.
pub async fn check_limit<S: Store + ?Sized>(
    store: &S,
    user_id: &str,
    service: &str,
) -> Res<LimitStatus> {
    let plan = subscribed_plan(store, user_id).await?;
    let limit = plan.limit_for(service);
    let usage = store.usage_count(user_id, service).await?;
    Ok(LimitStatus {
        limit_reached: usage >= limit,
    })
}

/// Unconditionally records one use of `service`: creates the counter
/// lazily with count=1, increments otherwise. Enforcement is the
/// caller's job, not this function's.
pub async fn track_usage<S: Store + ?Sized>(store: &S, user_id: &str, service: &str) -> Res<()> {
    store.record_usage(user_id, service).await
}

/// Sets an existing usage counter back to 0. Returns false when the
/// (user, service) pair has no counter; no row is created in that
/// case.
pub async fn reset_usage<S: Store + ?Sized>(
    store: &S,
    user_id: &str,
    service: &str,
) -> Res<bool> {
    store.reset_usage(user_id, service).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::error::AppError;
    use db::store::memory::MemoryStore;

    async fn subscribed_store(limits: &[(&str, i64)]) -> MemoryStore {
        let store = MemoryStore::new();
        let plan = store.add_plan("Basic Plan", &["compute", "storage"], limits);
        store.upsert_subscription("alice", plan).await.unwrap();
        store
    }

    #[tokio::test]
    async fn limit_allows_exactly_l_uses() {
        let store = subscribed_store(&[("compute", 3)]).await;

        for n in 1..=3i64 {
            let status = check_limit(&store, "alice", "compute").await.unwrap();
            assert!(!status.limit_reached, "use {} should be allowed", n);
            track_usage(&store, "alice", "compute").await.unwrap();
            assert_eq!(store.usage_count("alice", "compute").await.unwrap(), n);
        }

        let status = check_limit(&store, "alice", "compute").await.unwrap();
        assert!(status.limit_reached);
    }

    #[tokio::test]
    async fn missing_limit_entry_blocks_first_use() {
        // "storage" is permitted by the plan but carries no limit
        // entry: the implicit limit is 0 and the first check already
        // reports reached.
        let store = subscribed_store(&[("compute", 3)]).await;

        let status = check_limit(&store, "alice", "storage").await.unwrap();
        assert!(status.limit_reached);
    }

    #[tokio::test]
    async fn explicit_zero_limit_blocks_first_use() {
        let store = subscribed_store(&[("compute", 0)]).await;

        let status = check_limit(&store, "alice", "compute").await.unwrap();
        assert!(status.limit_reached);
    }

    #[tokio::test]
    async fn check_limit_has_no_side_effects() {
        let store = subscribed_store(&[("compute", 3)]).await;

        check_limit(&store, "alice", "compute").await.unwrap();
        check_limit(&store, "alice", "compute").await.unwrap();
        assert_eq!(store.usage_count("alice", "compute").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn check_limit_without_subscription_is_not_found() {
        let store = MemoryStore::new();
        let err = check_limit(&store, "ghost", "compute").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn track_usage_records_even_past_the_limit() {
        // No enforcement in the tracker itself.
        let store = subscribed_store(&[("compute", 1)]).await;

        track_usage(&store, "alice", "compute").await.unwrap();
        track_usage(&store, "alice", "compute").await.unwrap();
        assert_eq!(store.usage_count("alice", "compute").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn reset_clears_counter_and_reopens_quota() {
        let store = subscribed_store(&[("compute", 2)]).await;

        track_usage(&store, "alice", "compute").await.unwrap();
        track_usage(&store, "alice", "compute").await.unwrap();
        assert!(check_limit(&store, "alice", "compute").await.unwrap().limit_reached);

        assert!(reset_usage(&store, "alice", "compute").await.unwrap());
        assert_eq!(store.usage_count("alice", "compute").await.unwrap(), 0);
        assert!(!check_limit(&store, "alice", "compute").await.unwrap().limit_reached);
    }

    #[tokio::test]
    async fn reset_without_counter_reports_false_and_creates_nothing() {
        let store = subscribed_store(&[("compute", 2)]).await;

        assert!(!reset_usage(&store, "alice", "compute").await.unwrap());
        assert_eq!(store.usage_count("alice", "compute").await.unwrap(), 0);
    }
}
