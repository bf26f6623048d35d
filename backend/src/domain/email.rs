//! Email address validator.
//!
//! A shape and length check only: no DNS lookups and no internationalised
//! domain handling.

use std::sync::OnceLock;

use regex::Regex;

/// Minimum accepted email length in bytes.
pub const EMAIL_MIN_LEN: usize = 3;
/// Maximum accepted email length in bytes.
pub const EMAIL_MAX_LEN: usize = 254;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Local part of up to 64 allowed characters, then dot-separated
        // labels of 1-63 alphanumerics with internal hyphens only.
        let pattern = concat!(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]{1,64}",
            r"@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?",
            r"(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
        );
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Return `true` when `email` has an acceptable length and shape.
///
/// # Examples
/// ```
/// use backend::domain::is_email_valid;
///
/// assert!(is_email_valid("ada@example.com"));
/// assert!(!is_email_valid("not-an-email"));
/// ```
pub fn is_email_valid(email: &str) -> bool {
    (EMAIL_MIN_LEN..=EMAIL_MAX_LEN).contains(&email.len()) && email_regex().is_match(email)
}
