//! User service implementing the driving ports.
//!
//! Each operation validates its input, optionally checks for an existing
//! record, and performs one store write. Store failures are logged with the
//! adapter's message and surfaced to callers as the fixed client messages in
//! [`messages`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{UserStore, UserStoreError, UsersCommand, UsersQuery};
use crate::domain::{Error, TraceId, User, is_email_valid, messages};

/// How create and update guard against clobbering records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Read the key, then write unconditionally. Two concurrent creates of
    /// the same email can both succeed.
    #[default]
    CheckThenAct,
    /// Skip the read and let the store enforce presence or absence in the
    /// same call as the write.
    Conditional,
}

/// Error returned when parsing an unknown [`WriteMode`] label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown write mode '{0}'; expected check-then-act|conditional")]
pub struct ParseWriteModeError(String);

impl FromStr for WriteMode {
    type Err = ParseWriteModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "check-then-act" => Ok(Self::CheckThenAct),
            "conditional" => Ok(Self::Conditional),
            _ => Err(ParseWriteModeError(s.to_owned())),
        }
    }
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CheckThenAct => "check-then-act",
            Self::Conditional => "conditional",
        })
    }
}

/// User CRUD service over a [`UserStore`].
pub struct UserService<S: ?Sized> {
    store: Arc<S>,
    write_mode: WriteMode,
}

impl<S: ?Sized> Clone for UserService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            write_mode: self.write_mode,
        }
    }
}

impl<S: ?Sized> UserService<S> {
    /// Create a service using the given store and write mode.
    pub fn new(store: Arc<S>, write_mode: WriteMode) -> Self {
        Self { store, write_mode }
    }

    /// The configured write mode.
    pub fn write_mode(&self) -> WriteMode {
        self.write_mode
    }
}

fn trace_label() -> String {
    TraceId::current().map_or_else(|| "-".to_owned(), |id| id.to_string())
}

fn read_error(error: UserStoreError) -> Error {
    warn!(trace_id = %trace_label(), %error, "user store read failed");
    match error {
        UserStoreError::Decode { .. } => Error::store(messages::FAILED_TO_DECODE_RECORD),
        _ => Error::store(messages::FAILED_TO_FETCH_RECORD),
    }
}

fn write_error(error: UserStoreError) -> Error {
    match error {
        UserStoreError::AlreadyExists { .. } => Error::already_exists(),
        UserStoreError::Missing { .. } => Error::not_found(),
        UserStoreError::Encode { .. } => {
            warn!(trace_id = %trace_label(), %error, "user item marshalling failed");
            Error::store(messages::COULD_NOT_MARSHAL_ITEM)
        }
        other => {
            warn!(trace_id = %trace_label(), error = %other, "user store put failed");
            Error::store(messages::COULD_NOT_PUT_ITEM)
        }
    }
}

impl<S> UserService<S>
where
    S: UserStore + ?Sized,
{
    /// Best-effort existence probe used by check-then-act writes.
    ///
    /// `None` means the probe itself failed; callers carry on as if the
    /// check had not run.
    async fn probe(&self, email: &str) -> Option<User> {
        match self.store.get(email).await {
            Ok(found) => Some(found.unwrap_or_default()),
            Err(error) => {
                warn!(
                    trace_id = %trace_label(),
                    %error,
                    "existence check failed; continuing without it"
                );
                None
            }
        }
    }
}

#[async_trait]
impl<S> UsersQuery for UserService<S>
where
    S: UserStore + ?Sized,
{
    async fn fetch_user(&self, email: &str) -> Result<User, Error> {
        let found = self.store.get(email).await.map_err(read_error)?;
        Ok(found.unwrap_or_default())
    }

    async fn list_users(&self) -> Result<Vec<User>, Error> {
        let users = self.store.scan().await.map_err(read_error)?;
        debug!(trace_id = %trace_label(), count = users.len(), "scanned user table");
        Ok(users)
    }
}

#[async_trait]
impl<S> UsersCommand for UserService<S>
where
    S: UserStore + ?Sized,
{
    async fn create_user(&self, user: User) -> Result<User, Error> {
        if !is_email_valid(user.email()) {
            return Err(Error::invalid_email());
        }

        match self.write_mode {
            WriteMode::CheckThenAct => {
                if self.probe(user.email()).await.is_some_and(|u| u.has_email()) {
                    return Err(Error::already_exists());
                }
                self.store.put(&user).await.map_err(write_error)?;
            }
            WriteMode::Conditional => {
                self.store.put_if_absent(&user).await.map_err(write_error)?;
            }
        }

        debug!(trace_id = %trace_label(), email = user.email(), "created user");
        Ok(user)
    }

    async fn update_user(&self, user: User) -> Result<User, Error> {
        match self.write_mode {
            WriteMode::CheckThenAct => {
                if self.probe(user.email()).await.is_some_and(|u| !u.has_email()) {
                    return Err(Error::not_found());
                }
                self.store.put(&user).await.map_err(write_error)?;
            }
            WriteMode::Conditional => {
                self.store.put_if_present(&user).await.map_err(write_error)?;
            }
        }

        debug!(trace_id = %trace_label(), email = user.email(), "updated user");
        Ok(user)
    }

    async fn delete_user(&self, email: &str) -> Result<(), Error> {
        self.store.delete(email).await.map_err(|error| {
            warn!(trace_id = %trace_label(), %error, "user store delete failed");
            Error::store(messages::COULD_NOT_DELETE_ITEM)
        })?;
        debug!(trace_id = %trace_label(), email, "deleted user");
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
