//! In-process user store.
//!
//! Keeps marshalled items in an ordered map so the codec runs on every read
//! and write, matching the networked adapter. Used when no store URL is
//! configured and by integration tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::User;
use crate::domain::ports::{UserStore, UserStoreError};

use super::item::{UserItem, marshal_user, unmarshal_user};

/// [`UserStore`] backed by a map guarded by an async lock.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    items: RwLock<BTreeMap<String, UserItem>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with `users`, later entries replacing earlier ones.
    ///
    /// # Errors
    ///
    /// Fails if any user cannot be marshalled.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Result<Self, UserStoreError> {
        let items = users
            .into_iter()
            .map(|user| Ok((user.email().to_owned(), marshal_user(&user)?)))
            .collect::<Result<BTreeMap<_, _>, UserStoreError>>()?;
        Ok(Self {
            items: RwLock::new(items),
        })
    }

    /// Number of stored items.
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn get(&self, email: &str) -> Result<Option<User>, UserStoreError> {
        let items = self.items.read().await;
        items.get(email).map(unmarshal_user).transpose()
    }

    async fn scan(&self) -> Result<Vec<User>, UserStoreError> {
        let items = self.items.read().await;
        items.values().map(unmarshal_user).collect()
    }

    async fn put(&self, user: &User) -> Result<(), UserStoreError> {
        let item = marshal_user(user)?;
        self.items.write().await.insert(user.email().to_owned(), item);
        Ok(())
    }

    async fn put_if_absent(&self, user: &User) -> Result<(), UserStoreError> {
        let item = marshal_user(user)?;
        let mut items = self.items.write().await;
        if items.contains_key(user.email()) {
            return Err(UserStoreError::already_exists(user.email()));
        }
        items.insert(user.email().to_owned(), item);
        Ok(())
    }

    async fn put_if_present(&self, user: &User) -> Result<(), UserStoreError> {
        let item = marshal_user(user)?;
        let mut items = self.items.write().await;
        match items.get_mut(user.email()) {
            Some(slot) => {
                *slot = item;
                Ok(())
            }
            None => Err(UserStoreError::missing(user.email())),
        }
    }

    async fn delete(&self, email: &str) -> Result<(), UserStoreError> {
        self.items.write().await.remove(email);
        Ok(())
    }
}
