//! Persistence adapters for the user store port.
//!
//! Two implementations of [`UserStore`](crate::domain::ports::UserStore):
//!
//! - [`RedisUserStore`]: hashes in Redis, pooled through `bb8-redis`.
//! - [`InMemoryUserStore`]: an in-process map for local runs and tests.
//!
//! Both share the item codec in [`item`], so a user round-trips through the
//! same attribute map regardless of backend.
//!
//! # Example
//!
//! ```ignore
//! use backend::outbound::persistence::{PoolConfig, RedisPool, RedisUserStore, TableNamespace};
//!
//! let pool = RedisPool::new(PoolConfig::new("redis://localhost/0")).await?;
//! let store = RedisUserStore::new(pool, TableNamespace::new("local", "users"));
//! ```

pub mod item;
mod memory;
mod pool;
mod redis_store;

pub use item::{TableNamespace, UserItem, marshal_user, unmarshal_user};
pub use memory::InMemoryUserStore;
pub use pool::{PoolConfig, PoolError, RedisPool};
pub use redis_store::RedisUserStore;
