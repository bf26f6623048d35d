//! Driven port for the key-value store holding user records.
//!
//! One table keyed by email. Adapters own the marshalling between [`User`]
//! and the store's native item representation, so codec failures surface
//! here as [`UserStoreError::Encode`] and [`UserStoreError::Decode`].

use async_trait::async_trait;

use crate::domain::User;

use super::define_port_error;

define_port_error! {
    /// Errors raised by user store adapters.
    pub enum UserStoreError {
        /// The store could not be reached.
        Connection { message: String } => "user store connection failed: {message}",
        /// A store call failed during execution.
        Query { message: String } => "user store query failed: {message}",
        /// A user could not be converted into a store item.
        Encode { message: String } => "user item encoding failed: {message}",
        /// A store item could not be converted into a user.
        Decode { message: String } => "user item decoding failed: {message}",
        /// A conditional create found an item under the key.
        AlreadyExists { email: String } => "user item already exists for key {email}",
        /// A conditional replace found no item under the key.
        Missing { email: String } => "no user item exists for key {email}",
    }
}

/// Single-table user store.
///
/// Every method issues exactly one store call. None of them retries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch the item stored under `email`.
    ///
    /// Returns `Ok(None)` when the key holds nothing.
    async fn get(&self, email: &str) -> Result<Option<User>, UserStoreError>;

    /// Return every item in the table. Unbounded: no pagination.
    async fn scan(&self) -> Result<Vec<User>, UserStoreError>;

    /// Write `user` under its email, replacing any existing item.
    async fn put(&self, user: &User) -> Result<(), UserStoreError>;

    /// Write `user` only when its key is free.
    ///
    /// Fails with [`UserStoreError::AlreadyExists`] otherwise.
    async fn put_if_absent(&self, user: &User) -> Result<(), UserStoreError>;

    /// Replace the item under `user`'s key only when one exists.
    ///
    /// Fails with [`UserStoreError::Missing`] otherwise.
    async fn put_if_present(&self, user: &User) -> Result<(), UserStoreError>;

    /// Remove the item under `email`. Removing a missing key succeeds.
    async fn delete(&self, email: &str) -> Result<(), UserStoreError>;
}
