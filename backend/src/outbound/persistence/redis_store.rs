//! Redis-backed user store.
//!
//! Each user is a hash at `{region}:{table}:{email}` whose fields are the
//! marshalled item attributes. Listing walks the keyspace with `SCAN` and
//! reads every matching hash; there is no secondary index.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use bb8_redis::redis::{self, Cmd, RedisError};
use tracing::debug;

use crate::domain::User;
use crate::domain::ports::{UserStore, UserStoreError};

use super::item::{TableNamespace, UserItem, marshal_user, unmarshal_user};
use super::pool::{PoolError, RedisPool};

const SCAN_BATCH: usize = 100;

/// Writes the hash only when the key is free. Returns 1 on write.
const PUT_IF_ABSENT: &str = r"
if redis.call('EXISTS', KEYS[1]) == 1 then
  return 0
end
redis.call('HSET', KEYS[1], unpack(ARGV))
return 1
";

/// Replaces the hash only when the key exists. Returns 1 on write.
const PUT_IF_PRESENT: &str = r"
if redis.call('EXISTS', KEYS[1]) == 0 then
  return 0
end
redis.call('DEL', KEYS[1])
redis.call('HSET', KEYS[1], unpack(ARGV))
return 1
";

fn map_pool_error(error: PoolError) -> UserStoreError {
    UserStoreError::connection(error.to_string())
}

fn map_redis_error(error: RedisError) -> UserStoreError {
    if error.is_io_error() || error.is_connection_dropped() || error.is_connection_refusal() {
        UserStoreError::connection(error.to_string())
    } else {
        UserStoreError::query(error.to_string())
    }
}

fn flatten(item: &UserItem) -> Vec<&str> {
    item.iter()
        .flat_map(|(name, value)| [name.as_str(), value.as_str()])
        .collect()
}

/// `EVAL script 1 key field value ...`
fn conditional_put_cmd(script: &str, key: &str, item: &UserItem) -> Cmd {
    let mut cmd = redis::cmd("EVAL");
    cmd.arg(script).arg(1).arg(key).arg(flatten(item));
    cmd
}

/// [`UserStore`] over a pooled Redis connection.
#[derive(Clone)]
pub struct RedisUserStore {
    pool: RedisPool,
    namespace: TableNamespace,
}

impl RedisUserStore {
    pub fn new(pool: RedisPool, namespace: TableNamespace) -> Self {
        Self { pool, namespace }
    }

    pub fn namespace(&self) -> &TableNamespace {
        &self.namespace
    }

    async fn fetch_item(
        &self,
        conn: &mut redis::aio::MultiplexedConnection,
        key: &str,
    ) -> Result<UserItem, UserStoreError> {
        let fields: HashMap<String, String> = redis::cmd("HGETALL")
            .arg(key)
            .query_async(conn)
            .await
            .map_err(map_redis_error)?;
        Ok(fields.into_iter().collect())
    }

    async fn conditional_put(
        &self,
        script: &str,
        user: &User,
    ) -> Result<bool, UserStoreError> {
        let item = marshal_user(user)?;
        let key = self.namespace.key_for(user.email());
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let written: i64 = conditional_put_cmd(script, &key, &item)
            .query_async(&mut *conn)
            .await
            .map_err(map_redis_error)?;
        Ok(written == 1)
    }
}

#[async_trait]
impl UserStore for RedisUserStore {
    async fn get(&self, email: &str) -> Result<Option<User>, UserStoreError> {
        let key = self.namespace.key_for(email);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let item = self.fetch_item(&mut conn, &key).await?;
        if item.is_empty() {
            return Ok(None);
        }
        unmarshal_user(&item).map(Some)
    }

    async fn scan(&self) -> Result<Vec<User>, UserStoreError> {
        let pattern = self.namespace.scan_pattern();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // SCAN may repeat keys across batches.
        let mut keys = BTreeSet::new();
        let mut cursor: u64 = 0;
        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut *conn)
                .await
                .map_err(map_redis_error)?;
            keys.extend(batch);
            if next == 0 {
                break;
            }
            cursor = next;
        }
        debug!(pattern = %pattern, keys = keys.len(), "scanned user keys");

        let mut users = Vec::with_capacity(keys.len());
        for key in &keys {
            let item = self.fetch_item(&mut conn, key).await?;
            // Deleted between SCAN and HGETALL.
            if item.is_empty() {
                continue;
            }
            users.push(unmarshal_user(&item)?);
        }
        Ok(users)
    }

    async fn put(&self, user: &User) -> Result<(), UserStoreError> {
        let item = marshal_user(user)?;
        let key = self.namespace.key_for(user.email());
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (): () = redis::pipe()
            .atomic()
            .cmd("DEL")
            .arg(&key)
            .ignore()
            .cmd("HSET")
            .arg(&key)
            .arg(flatten(&item))
            .ignore()
            .query_async(&mut *conn)
            .await
            .map_err(map_redis_error)?;
        Ok(())
    }

    async fn put_if_absent(&self, user: &User) -> Result<(), UserStoreError> {
        if self.conditional_put(PUT_IF_ABSENT, user).await? {
            Ok(())
        } else {
            Err(UserStoreError::already_exists(user.email()))
        }
    }

    async fn put_if_present(&self, user: &User) -> Result<(), UserStoreError> {
        if self.conditional_put(PUT_IF_PRESENT, user).await? {
            Ok(())
        } else {
            Err(UserStoreError::missing(user.email()))
        }
    }

    async fn delete(&self, email: &str) -> Result<(), UserStoreError> {
        let key = self.namespace.key_for(email);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let _removed: i64 = redis::cmd("DEL")
            .arg(&key)
            .query_async(&mut *conn)
            .await
            .map_err(map_redis_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn flatten_interleaves_names_and_values() {
        let user = User::new("ada@example.com", "Ada", "Lovelace");
        let item = marshal_user(&user).expect("marshal succeeds");
        assert_eq!(
            flatten(&item),
            vec![
                "email",
                "ada@example.com",
                "firstname",
                "Ada",
                "lastname",
                "Lovelace",
            ]
        );
    }

    #[rstest]
    fn conditional_put_evaluates_script_against_one_key() {
        let user = User::new("ada@example.com", "Ada", "Lovelace");
        let item = marshal_user(&user).expect("marshal succeeds");
        let packed = conditional_put_cmd("return 1", "test:users:ada@example.com", &item)
            .get_packed_command();
        let packed = String::from_utf8(packed).expect("command is UTF-8");

        assert!(packed.starts_with("*10\r\n$4\r\nEVAL\r\n$8\r\nreturn 1\r\n$1\r\n1\r\n"));
        assert!(packed.contains("$26\r\ntest:users:ada@example.com\r\n"));
        assert!(packed.ends_with("$8\r\nlastname\r\n$8\r\nLovelace\r\n"));
    }

    #[rstest]
    fn pool_failures_become_connection_errors() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert!(matches!(err, UserStoreError::Connection { .. }));
        assert!(err.to_string().contains("timed out"));
    }

    #[rstest]
    fn io_failures_become_connection_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(matches!(
            map_redis_error(RedisError::from(io)),
            UserStoreError::Connection { .. }
        ));
    }
}
