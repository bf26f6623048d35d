//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their wire shape and live in the inbound adapter
//! layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::Error`].
///
/// Every failure response carries this body with status 400.
#[derive(ToSchema)]
#[schema(as = ErrorBody)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Human-readable message. Omitted when empty.
    #[schema(example = "user already exists")]
    error: Option<String>,
}

/// OpenAPI schema for [`crate::domain::User`].
///
/// `firstName` and `lastName` are accepted as input aliases.
#[derive(ToSchema)]
#[schema(as = User)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Primary key.
    #[schema(example = "ada@example.com")]
    email: String,
    /// Given name.
    #[schema(example = "Ada")]
    firstname: String,
    /// Family name.
    #[schema(example = "Lovelace")]
    lastname: String,
}
