use api_auth::identity;
use api_auth::verifier::CredentialVerifier;
use common::error::{AppError, Res};
use db::store::Store;

/// The per-request enforcement pipeline every protected service
/// endpoint passes through:
///
/// 1. authenticate — the session username must resolve to a user
/// 2. authorize — the subscribed plan must permit the service
/// 3. quota-check — the usage counter must be below the plan limit
/// 4. record — one use is tracked, awaited before responding
///
/// Steps run sequentially and short-circuit on the first failure; no
/// retries. The quota check runs before tracking so limits are
/// enforced prospectively. A failure after the check but before the
/// write under-counts usage; nothing is rolled back.
pub async fn enforce_service_access<S: Store + ?Sized>(
    store: &S,
    verifier: &dyn CredentialVerifier,
    username: Option<String>,
    service: &str,
) -> Res<()> {
    let user = identity::current_user(store, verifier, username).await?;

    let allowed = access::check_access(store, &user.username, service).await?;
    if !allowed {
        return Err(AppError::Forbidden(format!("No access to {}", service)));
    }

    let status = limiter::check_limit(store, &user.username, service).await?;
    if status.limit_reached {
        return Err(AppError::Forbidden(format!(
            "Limit reached for {}",
            service
        )));
    }

    limiter::track_usage(store, &user.username, service).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_auth::verifier::PassThrough;
    use db::store::memory::MemoryStore;

    fn username(name: &str) -> Option<String> {
        Some(name.to_string())
    }

    async fn store_with_alice(limit: i64) -> MemoryStore {
        let store = MemoryStore::new();
        store.add_user("alice", "customer");
        let plan = store.add_plan("Basic Plan", &["compute"], &[("compute", limit)]);
        store.upsert_subscription("alice", plan).await.unwrap();
        store
    }

    #[tokio::test]
    async fn missing_identity_short_circuits() {
        let store = store_with_alice(2).await;

        let err = enforce_service_access(&store, &PassThrough, None, "compute")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
        // step 1 failed, so nothing was recorded
        assert_eq!(store.usage_count("alice", "compute").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn unknown_user_short_circuits() {
        let store = store_with_alice(2).await;

        let err = enforce_service_access(&store, &PassThrough, username("mallory"), "compute")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn unpermitted_service_is_forbidden_and_untracked() {
        let store = store_with_alice(2).await;

        let err = enforce_service_access(&store, &PassThrough, username("alice"), "ai")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        assert_eq!(store.usage_count("alice", "ai").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn user_without_subscription_is_denied() {
        let store = MemoryStore::new();
        store.add_user("bob", "customer");

        let err = enforce_service_access(&store, &PassThrough, username("bob"), "compute")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn quota_scenario_two_uses_then_denied() {
        let store = store_with_alice(2).await;

        enforce_service_access(&store, &PassThrough, username("alice"), "compute")
            .await
            .unwrap();
        assert_eq!(store.usage_count("alice", "compute").await.unwrap(), 1);

        enforce_service_access(&store, &PassThrough, username("alice"), "compute")
            .await
            .unwrap();
        assert_eq!(store.usage_count("alice", "compute").await.unwrap(), 2);

        let err = enforce_service_access(&store, &PassThrough, username("alice"), "compute")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        // denied request leaves the counter untouched
        assert_eq!(store.usage_count("alice", "compute").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn reset_reopens_the_service() {
        let store = store_with_alice(2).await;

        enforce_service_access(&store, &PassThrough, username("alice"), "compute")
            .await
            .unwrap();
        enforce_service_access(&store, &PassThrough, username("alice"), "compute")
            .await
            .unwrap();
        assert!(
            enforce_service_access(&store, &PassThrough, username("alice"), "compute")
                .await
                .is_err()
        );

        limiter::reset_usage(&store, "alice", "compute").await.unwrap();

        enforce_service_access(&store, &PassThrough, username("alice"), "compute")
            .await
            .unwrap();
        assert_eq!(store.usage_count("alice", "compute").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn zero_limit_service_is_denied_at_quota_step() {
        // permitted by the plan, but with no limit entry: access passes
        // and the quota step denies the very first call
        let store = MemoryStore::new();
        store.add_user("alice", "customer");
        let plan = store.add_plan("Basic Plan", &["compute"], &[]);
        store.upsert_subscription("alice", plan).await.unwrap();

        assert!(access::check_access(&store, "alice", "compute").await.unwrap());

        let err = enforce_service_access(&store, &PassThrough, username("alice"), "compute")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        assert_eq!(store.usage_count("alice", "compute").await.unwrap(), 0);
    }
}
