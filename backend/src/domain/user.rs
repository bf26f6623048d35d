//! User data model.

use serde::{Deserialize, Deserializer, Serialize};

/// Application user, keyed by email.
///
/// ## Invariants
/// - None beyond those of the store: a user may be zero-valued. A record read
///   for a key the store does not hold is represented by [`User::default`].
///
/// ## Serialisation
/// Fields serialise as `email`, `firstname`, and `lastname`. Input also
/// accepts `firstName` and `lastName`. Missing or `null` fields decode as
/// empty strings, and unknown fields are ignored.
///
/// # Examples
/// ```
/// use backend::domain::User;
///
/// let user: User = serde_json::from_str(r#"{"email":"ada@example.com","firstName":"Ada"}"#)
///     .expect("valid user JSON");
/// assert_eq!(user.first_name(), "Ada");
/// assert_eq!(user.last_name(), "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(deserialize_with = "null_as_empty")]
    email: String,
    #[serde(rename = "firstname", alias = "firstName", deserialize_with = "null_as_empty")]
    first_name: String,
    #[serde(rename = "lastname", alias = "lastName", deserialize_with = "null_as_empty")]
    last_name: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl User {
    /// Build a new [`User`] from its three attributes.
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Primary key.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Given name.
    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    /// Family name.
    pub fn last_name(&self) -> &str {
        self.last_name.as_str()
    }

    /// Whether the key attribute is populated.
    ///
    /// Existence checks treat a record with an empty email as absent.
    pub fn has_email(&self) -> bool {
        !self.email.is_empty()
    }
}

#[cfg(test)]
mod tests;
