//! Domain-level error types.
//!
//! These errors are transport agnostic. The HTTP adapter maps every code to
//! the same client status and serialises the message as `{"error": ...}`;
//! the code only classifies failures for logging.

use serde::{Serialize, Serializer};

/// Client-facing messages returned by the user operations.
///
/// The strings are part of the wire contract and must not change.
pub mod messages {
    /// The store rejected or failed a get or scan call.
    pub const FAILED_TO_FETCH_RECORD: &str = "failed to fetch record from store";
    /// A stored item could not be turned back into a user.
    pub const FAILED_TO_DECODE_RECORD: &str = "failed to decode record";
    /// The create body was not a user document.
    pub const INVALID_USER_DATA: &str = "invalid user data";
    /// The email failed validation. Also returned for update body decode
    /// failures.
    pub const INVALID_EMAIL: &str = "invalid email";
    /// The user could not be converted into a store item.
    pub const COULD_NOT_MARSHAL_ITEM: &str = "couldn't marshal the item";
    /// The store rejected or failed a delete call.
    pub const COULD_NOT_DELETE_ITEM: &str = "couldn't delete the item";
    /// The store rejected or failed a put call.
    pub const COULD_NOT_PUT_ITEM: &str = "could not store put item";
    /// Create found an existing record under the same email.
    pub const USER_ALREADY_EXISTS: &str = "user already exists";
    /// Update found no record under the submitted email.
    pub const USER_DOES_NOT_EXIST: &str = "user doesn't exist";
}

/// Failure category. Never exposed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The request body could not be decoded.
    InvalidRequest,
    /// The email failed the format or length predicate.
    InvalidEmail,
    /// A record with the same key already exists.
    AlreadyExists,
    /// No record exists for the key.
    NotFound,
    /// The store or the item codec failed.
    Store,
}

impl ErrorCode {
    /// Stable snake-case label used in structured logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::InvalidEmail => "invalid_email",
            Self::AlreadyExists => "already_exists",
            Self::NotFound => "not_found",
            Self::Store => "store",
        }
    }
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
///
/// # Examples
/// ```
/// use backend::domain::{Error, ErrorCode};
///
/// let err = Error::new(ErrorCode::NotFound, "missing");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(
///     serde_json::to_value(&err).expect("serialise"),
///     serde_json::json!({ "error": "missing" }),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    message: String,
}

/// Validation errors emitted by the constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    /// The message was empty or whitespace.
    #[error("error message must not be empty")]
    EmptyMessage,
}

impl Error {
    /// Create a new error, panicking if validation fails.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        match Self::try_new(code, message) {
            Ok(value) => value,
            Err(err) => panic!("error messages must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(code: ErrorCode, message: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self { code, message })
    }

    /// Failure category.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to clients.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidEmail`].
    pub fn invalid_email() -> Self {
        Self::new(ErrorCode::InvalidEmail, messages::INVALID_EMAIL)
    }

    /// Convenience constructor for [`ErrorCode::AlreadyExists`].
    pub fn already_exists() -> Self {
        Self::new(ErrorCode::AlreadyExists, messages::USER_ALREADY_EXISTS)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found() -> Self {
        Self::new(ErrorCode::NotFound, messages::USER_DOES_NOT_EXIST)
    }

    /// Convenience constructor for [`ErrorCode::Store`].
    pub fn store(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Store, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[derive(Serialize)]
struct ErrorBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

impl Serialize for Error {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ErrorBody {
            error: Some(self.message.as_str()),
        }
        .serialize(serializer)
    }
}
