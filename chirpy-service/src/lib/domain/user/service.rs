use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthGateway;
use chrono::Utc;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    gateway: Arc<AuthGateway>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `gateway` - Authentication gateway providing password hashing
    pub fn new(repository: Arc<UR>, gateway: Arc<AuthGateway>) -> Self {
        Self {
            repository,
            gateway,
        }
    }

    /// Hash off the async runtime; Argon2 is deliberately slow.
    async fn hash_password(&self, password: String) -> Result<String, UserError> {
        let gateway = Arc::clone(&self.gateway);

        tokio::task::spawn_blocking(move || gateway.hash_password(&password))
            .await
            .map_err(|e| UserError::Unknown(format!("Password hashing task failed: {}", e)))?
            .map_err(UserError::from)
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let password_hash = self.hash_password(command.password).await?;

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            email: command.email,
            password_hash,
            created_at: now,
            updated_at: now,
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User created");

        Ok(created_user)
    }

    async fn get_user_by_email(&self, email: &EmailAddress) -> Result<User, UserError> {
        self.repository
            .find_by_email(email)
            .await?
            .ok_or(UserError::NotFoundByEmail(email.to_string()))
    }

    async fn delete_all_users(&self) -> Result<u64, UserError> {
        let deleted = self.repository.delete_all().await?;
        tracing::warn!(deleted, "All users deleted");

        Ok(deleted)
    }
}
