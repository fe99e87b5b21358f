//! User service - Handles user-related business logic.
//!
//! SOLID (SRP): Handles user-related use cases only.

use async_trait::async_trait;
use std::sync::Arc;

use common::{AppResult, ResultExt};
use domain::{NewUser, User};

use crate::repository::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new user. Empty names are rejected before storage is touched.
    async fn register_user(&self, name: &str) -> AppResult<()>;

    /// List all registered users
    async fn list_users(&self) -> AppResult<Vec<User>>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn register_user(&self, name: &str) -> AppResult<()> {
        User::validate_name(name)?;

        self.repo
            .create(NewUser::new(name))
            .await
            .context("failed to register user")
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.get_all().await.context("failed to list users")
    }
}
