//! Backend entry-point: loads store settings, builds the store adapter, and
//! serves the users resource, health probes, and OpenAPI docs.

mod server;

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::config::{StoreBackend, StoreSettings};
use backend::domain::ports::UserStore;
use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{InMemoryUserStore, PoolConfig, RedisPool, RedisUserStore};
use server::{ServerConfig, create_server};

async fn build_store(settings: &StoreSettings) -> std::io::Result<Arc<dyn UserStore>> {
    match &settings.backend {
        StoreBackend::Redis { url } => {
            let pool = RedisPool::new(PoolConfig::new(url.as_str()).with_max_size(settings.pool_size))
                .await
                .map_err(|err| std::io::Error::other(err.to_string()))?;
            Ok(Arc::new(RedisUserStore::new(pool, settings.namespace())))
        }
        StoreBackend::InMemory => {
            warn!("STORE_URL not set; records are kept in memory and lost on restart");
            Ok(Arc::new(InMemoryUserStore::new()))
        }
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = StoreSettings::from_env(&DefaultEnv::new())
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    let store = build_store(&settings).await?;
    info!(
        region = %settings.region,
        table = %settings.table,
        store = settings.backend.kind(),
        write_mode = %settings.write_mode,
        bind_addr = %settings.bind_addr,
        "starting users service"
    );

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(settings.bind_addr, store).with_write_mode(settings.write_mode);
    let server = create_server(health_state.clone(), config)?;
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
