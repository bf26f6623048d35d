//! Integration tests for the Redis user store.
//!
//! Skipped unless `REDIS_TEST_URL` points at a disposable Redis database.
//! Each test writes under a unique table name and removes its keys.

use backend::domain::User;
use backend::domain::ports::{UserStore, UserStoreError};
use backend::outbound::persistence::{PoolConfig, RedisPool, RedisUserStore, TableNamespace};
use rstest::rstest;
use uuid::Uuid;

const REDIS_URL_ENV: &str = "REDIS_TEST_URL";

async fn connect() -> Option<RedisUserStore> {
    let Ok(url) = std::env::var(REDIS_URL_ENV) else {
        eprintln!("{REDIS_URL_ENV} not set; skipping Redis integration test");
        return None;
    };
    let pool = RedisPool::new(PoolConfig::new(url).with_max_size(2))
        .await
        .expect("Redis pool should build");
    let table = format!("users-{}", Uuid::new_v4());
    Some(RedisUserStore::new(pool, TableNamespace::new("test", table)))
}

async fn clear(store: &RedisUserStore) {
    for user in store.scan().await.expect("scan should succeed") {
        store.delete(user.email()).await.expect("delete should succeed");
    }
}

#[rstest]
#[tokio::test]
async fn round_trips_users_through_hashes() {
    let Some(store) = connect().await else { return };
    let ada = User::new("ada@example.com", "Ada", "Lovelace");

    assert_eq!(store.get(ada.email()).await, Ok(None));
    store.put(&ada).await.expect("put should succeed");
    assert_eq!(store.get(ada.email()).await, Ok(Some(ada.clone())));

    let renamed = User::new(ada.email(), "Augusta", "King");
    store.put(&renamed).await.expect("replace should succeed");
    assert_eq!(store.scan().await, Ok(vec![renamed]));

    store.delete(ada.email()).await.expect("delete should succeed");
    store.delete(ada.email()).await.expect("repeat delete should succeed");
    assert_eq!(store.get(ada.email()).await, Ok(None));
}

#[rstest]
#[tokio::test]
async fn conditional_puts_respect_key_presence() {
    let Some(store) = connect().await else { return };
    let ada = User::new("ada@example.com", "Ada", "Lovelace");

    assert_eq!(
        store.put_if_present(&ada).await,
        Err(UserStoreError::missing(ada.email()))
    );
    store.put_if_absent(&ada).await.expect("first create should succeed");
    assert_eq!(
        store.put_if_absent(&ada).await,
        Err(UserStoreError::already_exists(ada.email()))
    );
    store
        .put_if_present(&User::new(ada.email(), "Augusta", "King"))
        .await
        .expect("replace should succeed");
    assert_eq!(
        store.get(ada.email()).await.map(|u| u.map(|u| u.first_name().to_owned())),
        Ok(Some("Augusta".to_owned()))
    );

    clear(&store).await;
}

#[rstest]
#[tokio::test]
async fn scan_is_limited_to_the_table_namespace() {
    let Some(store) = connect().await else { return };
    let Some(other) = connect().await else { return };

    store
        .put(&User::new("ada@example.com", "Ada", "Lovelace"))
        .await
        .expect("put should succeed");
    other
        .put(&User::new("bob@example.com", "Bob", "Babbage"))
        .await
        .expect("put should succeed");

    let listed = store.scan().await.expect("scan should succeed");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].email(), "ada@example.com");

    clear(&store).await;
    clear(&other).await;
}
