//! Storage collaborator for the enforcement components.
//!
//! Components receive an explicitly constructed [`Store`] instead of
//! reaching for a shared global handle, so tests can substitute an
//! isolated instance per case. `PgStore` is the production
//! implementation; `MemoryStore` (behind the `test-store` feature)
//! backs the component tests.

use std::sync::Arc;

use async_trait::async_trait;
use common::error::{AppError, Res};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{plan::Plan, subscription::Subscription, user::User};

#[async_trait]
pub trait Store: Send + Sync {
    async fn find_user(&self, username: &str) -> Res<Option<User>>;
    /// Fails with `Conflict` when the username is already taken.
    async fn insert_user(&self, user: &User) -> Res<()>;

    async fn find_plan(&self, plan_id: Uuid) -> Res<Option<Plan>>;

    async fn find_subscription(&self, user_id: &str) -> Res<Option<Subscription>>;
    /// Creates or replaces the user's single subscription row.
    async fn upsert_subscription(&self, user_id: &str, plan_id: Uuid) -> Res<()>;
    /// Update-only plan change; false when the user has no subscription.
    async fn update_subscription(&self, user_id: &str, plan_id: Uuid) -> Res<bool>;

    /// Current counter value, 0 when no row exists.
    async fn usage_count(&self, user_id: &str, service: &str) -> Res<i64>;
    /// Atomic upsert-increment: first use creates the row with count=1.
    async fn record_usage(&self, user_id: &str, service: &str) -> Res<()>;
    /// Sets an existing counter to 0; false (and no row created) when
    /// there is nothing to reset.
    async fn reset_usage(&self, user_id: &str, service: &str) -> Res<bool>;
}

/// Resolves a user's subscription to its plan. Both the access-control
/// and quota components funnel through this single read path.
pub async fn subscribed_plan<S: Store + ?Sized>(store: &S, user_id: &str) -> Res<Plan> {
    let sub = store
        .find_subscription(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User has no subscription".to_string()))?;
    store
        .find_plan(sub.plan_id)
        .await?
        // Dangling reference: the subscribed plan was deleted.
        .ok_or_else(|| AppError::NotFound("Plan not found".to_string()))
}

/// Postgres-backed store, wrapping the shared connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: Arc<PgPool>,
}

impl PgStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        PgStore { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn find_user(&self, username: &str) -> Res<Option<User>> {
        crate::user::get_user(&*self.pool, username).await
    }

    async fn insert_user(&self, user: &User) -> Res<()> {
        crate::user::insert_user(&*self.pool, user).await
    }

    async fn find_plan(&self, plan_id: Uuid) -> Res<Option<Plan>> {
        crate::plan::get_plan(&*self.pool, plan_id).await
    }

    async fn find_subscription(&self, user_id: &str) -> Res<Option<Subscription>> {
        crate::subscription::get_subscription(&*self.pool, user_id).await
    }

    async fn upsert_subscription(&self, user_id: &str, plan_id: Uuid) -> Res<()> {
        crate::subscription::upsert_subscription(&*self.pool, user_id, plan_id).await
    }

    async fn update_subscription(&self, user_id: &str, plan_id: Uuid) -> Res<bool> {
        crate::subscription::update_subscription(&*self.pool, user_id, plan_id).await
    }

    async fn usage_count(&self, user_id: &str, service: &str) -> Res<i64> {
        crate::usage::get_usage_count(&*self.pool, user_id, service).await
    }

    async fn record_usage(&self, user_id: &str, service: &str) -> Res<()> {
        crate::usage::increment_usage(&*self.pool, user_id, service).await
    }

    async fn reset_usage(&self, user_id: &str, service: &str) -> Res<bool> {
        crate::usage::reset_usage(&*self.pool, user_id, service).await
    }
}

#[cfg(any(test, feature = "test-store"))]
pub mod memory {
    //! Isolated in-memory store for component tests.

    use std::collections::HashMap;
    use std::sync::Mutex;

    use sqlx::types::Json;

    use super::*;

    #[derive(Default)]
    struct Inner {
        users: HashMap<String, User>,
        plans: HashMap<Uuid, Plan>,
        subscriptions: HashMap<String, Subscription>,
        usages: HashMap<(String, String), i64>,
    }

    #[derive(Default)]
    pub struct MemoryStore {
        inner: Mutex<Inner>,
    }

    impl MemoryStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn add_user(&self, username: &str, role: &str) {
            self.inner.lock().unwrap().users.insert(
                username.to_string(),
                User {
                    username: username.to_string(),
                    role: role.to_string(),
                },
            );
        }

        pub fn add_plan(
            &self,
            name: &str,
            permissions: &[&str],
            limits: &[(&str, i64)],
        ) -> Uuid {
            let id = Uuid::new_v4();
            let plan = Plan {
                id,
                name: name.to_string(),
                description: String::new(),
                permissions: permissions.iter().map(|s| s.to_string()).collect(),
                limits: Json(
                    limits
                        .iter()
                        .map(|(s, n)| (s.to_string(), *n))
                        .collect::<HashMap<_, _>>(),
                ),
            };
            self.inner.lock().unwrap().plans.insert(id, plan);
            id
        }

        pub fn remove_plan(&self, plan_id: Uuid) {
            self.inner.lock().unwrap().plans.remove(&plan_id);
        }
    }

    #[async_trait]
    impl Store for MemoryStore {
        async fn find_user(&self, username: &str) -> Res<Option<User>> {
            Ok(self.inner.lock().unwrap().users.get(username).cloned())
        }

        async fn insert_user(&self, user: &User) -> Res<()> {
            let mut inner = self.inner.lock().unwrap();
            if inner.users.contains_key(&user.username) {
                return Err(AppError::Conflict("Username already exists".to_string()));
            }
            inner.users.insert(user.username.clone(), user.clone());
            Ok(())
        }

        async fn find_plan(&self, plan_id: Uuid) -> Res<Option<Plan>> {
            Ok(self.inner.lock().unwrap().plans.get(&plan_id).cloned())
        }

        async fn find_subscription(&self, user_id: &str) -> Res<Option<Subscription>> {
            Ok(self
                .inner
                .lock()
                .unwrap()
                .subscriptions
                .get(user_id)
                .cloned())
        }

        async fn upsert_subscription(&self, user_id: &str, plan_id: Uuid) -> Res<()> {
            self.inner.lock().unwrap().subscriptions.insert(
                user_id.to_string(),
                Subscription {
                    user_id: user_id.to_string(),
                    plan_id,
                },
            );
            Ok(())
        }

        async fn update_subscription(&self, user_id: &str, plan_id: Uuid) -> Res<bool> {
            let mut inner = self.inner.lock().unwrap();
            match inner.subscriptions.get_mut(user_id) {
                Some(sub) => {
                    sub.plan_id = plan_id;
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn usage_count(&self, user_id: &str, service: &str) -> Res<i64> {
            Ok(self
                .inner
                .lock()
                .unwrap()
                .usages
                .get(&(user_id.to_string(), service.to_string()))
                .copied()
                .unwrap_or(0))
        }

        async fn record_usage(&self, user_id: &str, service: &str) -> Res<()> {
            *self
                .inner
                .lock()
                .unwrap()
                .usages
                .entry((user_id.to_string(), service.to_string()))
                .or_insert(0) += 1;
            Ok(())
        }

        async fn reset_usage(&self, user_id: &str, service: &str) -> Res<bool> {
            let mut inner = self.inner.lock().unwrap();
            match inner
                .usages
                .get_mut(&(user_id.to_string(), service.to_string()))
            {
                Some(count) => {
                    *count = 0;
                    Ok(true)
                }
                None => Ok(false),
            }
        }
    }
}
