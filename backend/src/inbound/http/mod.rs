//! HTTP inbound adapter exposing the users resource and health probes.

pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod users;

pub use error::ApiResult;
