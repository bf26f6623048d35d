//! Driving port for user reads.
//!
//! HTTP handlers depend on this trait rather than on a store, so handler
//! tests can run against a mock.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Read-side use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Fetch the user stored under `email`.
    ///
    /// A missing key yields the zero-valued [`User`], not an error.
    async fn fetch_user(&self, email: &str) -> Result<User, Error>;

    /// Return every stored user.
    async fn list_users(&self) -> Result<Vec<User>, Error>;
}
