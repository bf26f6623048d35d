//! Domain primitives, services, and ports.
//!
//! Purpose: Define the user entity, the email validator, and the user
//! service that drives the key-value store through the [`ports::UserStore`]
//! port. Nothing in this module depends on HTTP or on a concrete store.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure with a client message.
//! - User: the single persisted record, keyed by email.
//! - UserService / WriteMode: the validate, check, and store pipeline.
//! - TraceId: request-scoped correlation identifier.

pub mod email;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::email::is_email_valid;
pub use self::error::{Error, ErrorCode, messages};
pub use self::trace_id::TraceId;
pub use self::user::User;
pub use self::user_service::{UserService, WriteMode};

/// HTTP header name used to propagate trace identifiers.
pub const TRACE_ID_HEADER: &str = "trace-id";
