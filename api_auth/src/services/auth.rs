use common::error::{AppError, Res};
use common::misc::Role;
use db::models::user::User;
use db::store::Store;

/// Creates a user record. Duplicate usernames fail with 409; the
/// role must parse to a known value.
pub async fn register<S: Store + ?Sized>(store: &S, username: &str, role: &str) -> Res<User> {
    let role: Role = role
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid role. Must be 'admin' or 'customer'".to_string()))?;

    if store.find_user(username).await?.is_some() {
        return Err(AppError::Conflict("Username already exists".to_string()));
    }

    let user = User {
        username: username.to_string(),
        role: role.to_string(),
    };
    store.insert_user(&user).await?;
    Ok(user)
}

/// Checks the supplied username/role pair against the user record.
/// No credentials beyond the pair itself: authenticity of the session
/// cookie set afterwards is the transport's concern.
pub async fn login<S: Store + ?Sized>(store: &S, username: &str, role: &str) -> Res<User> {
    let user = store
        .find_user(username)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;
    if user.role != role {
        return Err(AppError::Forbidden("Role mismatch".to_string()));
    }
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use db::store::memory::MemoryStore;

    #[tokio::test]
    async fn duplicate_registration_conflicts() {
        let store = MemoryStore::new();

        register(&store, "alice", "customer").await.unwrap();
        let err = register(&store, "alice", "customer").await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        // the first record is untouched
        let user = store.find_user("alice").await.unwrap().unwrap();
        assert_eq!(user.role, "customer");
    }

    #[tokio::test]
    async fn unknown_role_is_rejected() {
        let store = MemoryStore::new();
        let err = register(&store, "bob", "superuser").await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert!(store.find_user("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn login_requires_matching_role() {
        let store = MemoryStore::new();
        register(&store, "admin1", "admin").await.unwrap();

        let err = login(&store, "admin1", "customer").await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let user = login(&store, "admin1", "admin").await.unwrap();
        assert_eq!(user.username, "admin1");
    }

    #[tokio::test]
    async fn login_of_unknown_user_is_unauthorized() {
        let store = MemoryStore::new();
        let err = login(&store, "ghost", "customer").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
