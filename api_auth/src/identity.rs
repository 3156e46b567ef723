use common::error::{AppError, Res};
use common::misc::Role;
use db::models::user::User;
use db::store::Store;

use crate::verifier::CredentialVerifier;

/// Resolves the session identity to a user record.
///
/// Fails with 401 when no username is present in the session or when
/// the username does not resolve to a known user. The credential
/// verifier runs before the lookup.
pub async fn current_user<S: Store + ?Sized>(
    store: &S,
    verifier: &dyn CredentialVerifier,
    username: Option<String>,
) -> Res<User> {
    let username = username
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::Unauthorized("Login required".to_string()))?;
    verifier.verify(&username)?;
    store
        .find_user(&username)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid user".to_string()))
}

/// Resolves the session identity and requires an exact role match.
/// A plain role-equality check; plan and subscription state are not
/// consulted here.
pub async fn require_role<S: Store + ?Sized>(
    store: &S,
    verifier: &dyn CredentialVerifier,
    username: Option<String>,
    role: Role,
) -> Res<User> {
    let user = current_user(store, verifier, username).await?;
    if user.role != role.as_str() {
        return Err(AppError::Forbidden(format!(
            "Unauthorized access. Required role: '{}'",
            role.as_str()
        )));
    }
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verifier::PassThrough;
    use db::store::memory::MemoryStore;

    #[tokio::test]
    async fn missing_session_identity_is_unauthorized() {
        let store = MemoryStore::new();
        let err = current_user(&store, &PassThrough, None).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));

        let err = current_user(&store, &PassThrough, Some(String::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn unknown_username_is_unauthorized() {
        let store = MemoryStore::new();
        let err = current_user(&store, &PassThrough, Some("ghost".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn role_mismatch_is_forbidden() {
        let store = MemoryStore::new();
        store.add_user("alice", "customer");

        let err = require_role(&store, &PassThrough, Some("alice".to_string()), Role::Admin)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let user = require_role(
            &store,
            &PassThrough,
            Some("alice".to_string()),
            Role::Customer,
        )
        .await
        .unwrap();
        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn rejecting_verifier_blocks_resolution() {
        struct RejectAll;
        impl CredentialVerifier for RejectAll {
            fn verify(&self, _username: &str) -> Res<()> {
                Err(AppError::Unauthorized("Bad credential".to_string()))
            }
        }

        let store = MemoryStore::new();
        store.add_user("alice", "customer");

        let err = current_user(&store, &RejectAll, Some("alice".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
