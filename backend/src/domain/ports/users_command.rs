//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Write-side use cases. Each returns the record as written.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Validate and store a new user.
    async fn create_user(&self, user: User) -> Result<User, Error>;

    /// Replace an existing user.
    async fn update_user(&self, user: User) -> Result<User, Error>;

    /// Remove the user under `email`, whether or not it exists.
    async fn delete_user(&self, email: &str) -> Result<(), Error>;
}
