//! Store and listener configuration parsing.
//!
//! Settings are read once at startup from the environment through
//! [`mockable::Env`] so parsing can be tested without touching the process
//! environment.

use std::net::SocketAddr;

use mockable::Env;

use crate::domain::WriteMode;
use crate::outbound::persistence::TableNamespace;

const REGION_ENV: &str = "STORE_REGION";
const TABLE_ENV: &str = "TABLE_NAME";
const URL_ENV: &str = "STORE_URL";
const WRITE_MODE_ENV: &str = "STORE_WRITE_MODE";
const POOL_SIZE_ENV: &str = "STORE_POOL_SIZE";
const BIND_ADDR_ENV: &str = "BIND_ADDR";

const DEFAULT_REGION: &str = "local";
const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

const WRITE_MODE_EXPECTED: &str = "check-then-act|conditional";
const POOL_SIZE_EXPECTED: &str = "a positive integer";
const BIND_ADDR_EXPECTED: &str = "host:port";
const KEY_SEGMENT_EXPECTED: &str = "a name without ':'";

/// Errors raised while validating store configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreConfigError {
    /// A required environment variable is missing or blank.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Which store adapter the settings select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Redis at the given URL.
    Redis { url: String },
    /// Process-local map. Data is lost on restart.
    InMemory,
}

impl StoreBackend {
    /// Short label for startup logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Redis { .. } => "redis",
            Self::InMemory => "in-memory",
        }
    }
}

/// Validated settings for the store and HTTP listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    pub region: String,
    pub table: String,
    pub backend: StoreBackend,
    pub write_mode: WriteMode,
    pub pool_size: u32,
    pub bind_addr: SocketAddr,
}

impl StoreSettings {
    /// Key namespace for the configured region and table.
    pub fn namespace(&self) -> TableNamespace {
        TableNamespace::new(self.region.clone(), self.table.clone())
    }

    /// Parse settings from `env`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use backend::config::{StoreBackend, StoreSettings};
    /// use backend::domain::WriteMode;
    /// use mockable::MockEnv;
    ///
    /// let mut env = MockEnv::new();
    /// env.expect_string().returning(|name| match name {
    ///     "TABLE_NAME" => Some("users".to_owned()),
    ///     _ => None,
    /// });
    ///
    /// let settings = StoreSettings::from_env(&env).expect("valid settings");
    /// assert_eq!(settings.region, "local");
    /// assert_eq!(settings.backend, StoreBackend::InMemory);
    /// assert_eq!(settings.write_mode, WriteMode::CheckThenAct);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`StoreConfigError`] when `TABLE_NAME` is missing or any
    /// variable holds an unparseable value.
    pub fn from_env<E: Env>(env: &E) -> Result<Self, StoreConfigError> {
        let region = key_segment(
            REGION_ENV,
            non_blank(env, REGION_ENV).unwrap_or_else(|| DEFAULT_REGION.to_owned()),
        )?;
        let table = key_segment(
            TABLE_ENV,
            non_blank(env, TABLE_ENV).ok_or(StoreConfigError::MissingEnv { name: TABLE_ENV })?,
        )?;
        let backend = match non_blank(env, URL_ENV) {
            Some(url) => StoreBackend::Redis { url },
            None => StoreBackend::InMemory,
        };

        Ok(Self {
            region,
            table,
            backend,
            write_mode: write_mode_from_env(env)?,
            pool_size: pool_size_from_env(env)?,
            bind_addr: bind_addr_from_env(env)?,
        })
    }
}

fn non_blank<E: Env>(env: &E, name: &str) -> Option<String> {
    env.string(name)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// Region and table are joined with `:` into store keys, so neither may
/// contain one.
fn key_segment(name: &'static str, value: String) -> Result<String, StoreConfigError> {
    if value.contains(':') {
        return Err(StoreConfigError::InvalidEnv {
            name,
            value,
            expected: KEY_SEGMENT_EXPECTED,
        });
    }
    Ok(value)
}

fn write_mode_from_env<E: Env>(env: &E) -> Result<WriteMode, StoreConfigError> {
    match non_blank(env, WRITE_MODE_ENV) {
        None => Ok(WriteMode::default()),
        Some(value) => value.parse().map_err(|_| StoreConfigError::InvalidEnv {
            name: WRITE_MODE_ENV,
            value,
            expected: WRITE_MODE_EXPECTED,
        }),
    }
}

fn pool_size_from_env<E: Env>(env: &E) -> Result<u32, StoreConfigError> {
    match non_blank(env, POOL_SIZE_ENV) {
        None => Ok(DEFAULT_POOL_SIZE),
        Some(value) => match value.parse::<u32>() {
            Ok(size) if size > 0 => Ok(size),
            _ => Err(StoreConfigError::InvalidEnv {
                name: POOL_SIZE_ENV,
                value,
                expected: POOL_SIZE_EXPECTED,
            }),
        },
    }
}

fn bind_addr_from_env<E: Env>(env: &E) -> Result<SocketAddr, StoreConfigError> {
    let value = non_blank(env, BIND_ADDR_ENV).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
    value.parse().map_err(|_| StoreConfigError::InvalidEnv {
        name: BIND_ADDR_ENV,
        value,
        expected: BIND_ADDR_EXPECTED,
    })
}
