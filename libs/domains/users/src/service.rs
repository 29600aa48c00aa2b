use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{LoginUser, RegisterUser, User, UserResponse};
use crate::repository::UserRepository;

/// Service layer for User business logic
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Register a new account with a hashed password.
    pub async fn register(&self, input: RegisterUser) -> UserResult<UserResponse> {
        let password_hash = self.hash_password(&input.password)?;
        let user = User::new(input.username, input.email, password_hash);

        let created = self.repository.insert(user).await?;
        Ok(created.into())
    }

    /// Verify credentials for login.
    ///
    /// Returns [`UserError::InvalidCredentials`] for both unknown emails and
    /// wrong passwords so the response does not reveal which one failed.
    pub async fn authenticate(&self, input: LoginUser) -> UserResult<UserResponse> {
        let user = self
            .repository
            .get_by_email(&input.email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        self.verify_password(&input.password, &user.password_hash)?;
        Ok(user.into())
    }

    /// Get a user by ID.
    pub async fn get_user(&self, id: Uuid) -> UserResult<UserResponse> {
        let user = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;
        Ok(user.into())
    }

    fn hash_password(&self, password: &str) -> UserResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| UserError::PasswordHash(e.to_string()))?;
        Ok(hash.to_string())
    }

    fn verify_password(&self, password: &str, hash: &str) -> UserResult<()> {
        let parsed = PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| UserError::InvalidCredentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryUserRepository, MockUserRepository};

    fn register_input() -> RegisterUser {
        RegisterUser {
            username: "sam".to_string(),
            email: "sam@campus.edu".to_string(),
            password: "correct horse".to_string(),
        }
    }

    #[tokio::test]
    async fn register_hashes_password() {
        let repo = InMemoryUserRepository::new();
        let service = UserService::new(repo.clone());

        service.register(register_input()).await.unwrap();

        let stored = repo.get_by_email("sam@campus.edu").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "correct horse");
        assert!(stored.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn login_round_trip() {
        let service = UserService::new(InMemoryUserRepository::new());
        let registered = service.register(register_input()).await.unwrap();

        let logged_in = service
            .authenticate(LoginUser {
                email: "sam@campus.edu".to_string(),
                password: "correct horse".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(logged_in.id, registered.id);
        assert_eq!(logged_in.username, "sam");
    }

    #[tokio::test]
    async fn wrong_password_rejected() {
        let service = UserService::new(InMemoryUserRepository::new());
        service.register(register_input()).await.unwrap();

        let err = service
            .authenticate(LoginUser {
                email: "sam@campus.edu".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::InvalidCredentials));
    }

    #[tokio::test]
    async fn unknown_email_rejected_identically() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_email().returning(|_| Ok(None));

        let service = UserService::new(repo);
        let err = service
            .authenticate(LoginUser {
                email: "ghost@campus.edu".to_string(),
                password: "anything".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::InvalidCredentials));
    }

    #[tokio::test]
    async fn duplicate_registration_propagates() {
        let service = UserService::new(InMemoryUserRepository::new());
        service.register(register_input()).await.unwrap();

        let err = service.register(register_input()).await.unwrap_err();
        assert!(matches!(err, UserError::Duplicate));
    }
}
