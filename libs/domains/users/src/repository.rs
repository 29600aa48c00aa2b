use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::User;

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user. Fails with [`UserError::Duplicate`] when the
    /// username or email is already taken.
    async fn insert(&self, user: User) -> UserResult<User>;

    /// Get a user by ID
    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// Get a user by login email
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        let taken = users.values().any(|u| {
            u.username.eq_ignore_ascii_case(&user.username)
                || u.email.eq_ignore_ascii_case(&user.email)
        });
        if taken {
            return Err(UserError::Duplicate);
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(username: &str, email: &str) -> User {
        User::new(
            username.to_string(),
            email.to_string(),
            "$argon2id$fake".to_string(),
        )
    }

    #[tokio::test]
    async fn insert_and_fetch() {
        let repo = InMemoryUserRepository::new();
        let user = repo
            .insert(sample_user("sam", "sam@campus.edu"))
            .await
            .unwrap();

        let by_id = repo.get_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(by_id.username, "sam");

        let by_email = repo.get_by_email("SAM@campus.edu").await.unwrap().unwrap();
        assert_eq!(by_email.id, user.id);
    }

    #[tokio::test]
    async fn duplicate_username_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.insert(sample_user("sam", "sam@campus.edu"))
            .await
            .unwrap();

        let err = repo
            .insert(sample_user("Sam", "other@campus.edu"))
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::Duplicate));
    }

    #[tokio::test]
    async fn duplicate_email_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.insert(sample_user("sam", "sam@campus.edu"))
            .await
            .unwrap();

        let err = repo
            .insert(sample_user("alex", "sam@campus.edu"))
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::Duplicate));
    }

    #[tokio::test]
    async fn missing_user_is_none() {
        let repo = InMemoryUserRepository::new();
        assert!(repo.get_by_id(Uuid::now_v7()).await.unwrap().is_none());
        assert!(repo.get_by_email("nobody@campus.edu").await.unwrap().is_none());
    }
}
