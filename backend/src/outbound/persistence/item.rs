//! Store item representation shared by the persistence adapters.
//!
//! A user is stored as a flat map of string attributes named after the
//! user's JSON fields. Items are keyed by email inside a namespace formed
//! from the region and table names.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::domain::User;
use crate::domain::ports::UserStoreError;

/// Attribute map as persisted by the store.
pub type UserItem = BTreeMap<String, String>;

/// Convert a user into a store item.
///
/// Every serialised field must be a JSON string; anything else is an
/// [`UserStoreError::Encode`].
pub fn marshal_user(user: &User) -> Result<UserItem, UserStoreError> {
    let value = serde_json::to_value(user).map_err(|err| UserStoreError::encode(err.to_string()))?;
    let Value::Object(fields) = value else {
        return Err(UserStoreError::encode("user did not serialise to an object"));
    };

    fields
        .into_iter()
        .map(|(name, value)| match value {
            Value::String(text) => Ok((name, text)),
            other => Err(UserStoreError::encode(format!(
                "attribute {name} is not a string: {other}"
            ))),
        })
        .collect()
}

/// Convert a store item back into a user.
///
/// Unknown attributes are ignored and absent ones default to empty, so an
/// empty item decodes to the zero-valued user.
pub fn unmarshal_user(item: &UserItem) -> Result<User, UserStoreError> {
    let fields: Map<String, Value> = item
        .iter()
        .map(|(name, text)| (name.clone(), Value::String(text.clone())))
        .collect();
    serde_json::from_value(Value::Object(fields)).map_err(|err| UserStoreError::decode(err.to_string()))
}

/// Region and table pair under which items are keyed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNamespace {
    region: String,
    table: String,
}

impl TableNamespace {
    pub fn new(region: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            table: table.into(),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    fn prefix(&self) -> String {
        format!("{}:{}:", self.region, self.table)
    }

    /// Key holding the item for `email`.
    pub fn key_for(&self, email: &str) -> String {
        format!("{}{email}", self.prefix())
    }

    /// Glob pattern matching every key in the table.
    ///
    /// Glob metacharacters in the region or table are escaped so they match
    /// literally.
    pub fn scan_pattern(&self) -> String {
        let prefix = self.prefix();
        let mut pattern = String::with_capacity(prefix.len() + 1);
        for ch in prefix.chars() {
            if matches!(ch, '*' | '?' | '[' | ']' | '\\') {
                pattern.push('\\');
            }
            pattern.push(ch);
        }
        pattern.push('*');
        pattern
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn item(pairs: &[(&str, &str)]) -> UserItem {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[rstest]
    fn marshal_uses_wire_attribute_names() {
        let user = User::new("ada@example.com", "Ada", "Lovelace");
        let marshalled = marshal_user(&user).expect("marshal succeeds");
        assert_eq!(
            marshalled,
            item(&[
                ("email", "ada@example.com"),
                ("firstname", "Ada"),
                ("lastname", "Lovelace"),
            ])
        );
    }

    #[rstest]
    fn unmarshal_restores_user() {
        let user = unmarshal_user(&item(&[
            ("email", "ada@example.com"),
            ("firstname", "Ada"),
            ("lastname", "Lovelace"),
        ]))
        .expect("unmarshal succeeds");
        assert_eq!(user, User::new("ada@example.com", "Ada", "Lovelace"));
    }

    #[rstest]
    fn unmarshal_accepts_camel_case_attributes() {
        let user = unmarshal_user(&item(&[
            ("email", "ada@example.com"),
            ("firstName", "Ada"),
            ("lastName", "Lovelace"),
        ]))
        .expect("unmarshal succeeds");
        assert_eq!(user.first_name(), "Ada");
        assert_eq!(user.last_name(), "Lovelace");
    }

    #[rstest]
    fn empty_item_is_zero_valued_user() {
        let user = unmarshal_user(&UserItem::new()).expect("unmarshal succeeds");
        assert_eq!(user, User::default());
        assert!(!user.has_email());
    }

    #[rstest]
    fn unknown_attributes_are_ignored() {
        let user = unmarshal_user(&item(&[("email", "ada@example.com"), ("age", "36")]))
            .expect("unmarshal succeeds");
        assert_eq!(user.email(), "ada@example.com");
    }

    #[rstest]
    fn conflicting_spellings_fail_to_decode() {
        let err = unmarshal_user(&item(&[("firstname", "Ada"), ("firstName", "Augusta")]))
            .expect_err("duplicate field");
        assert!(matches!(err, UserStoreError::Decode { .. }));
    }

    #[rstest]
    fn key_joins_region_table_and_email() {
        let ns = TableNamespace::new("eu-west-1", "users");
        assert_eq!(ns.key_for("ada@example.com"), "eu-west-1:users:ada@example.com");
        assert_eq!(ns.region(), "eu-west-1");
        assert_eq!(ns.table(), "users");
    }

    #[rstest]
    #[case("local", "users", "local:users:*")]
    #[case("local", "users*", r"local:users\*:*")]
    #[case("r?", "[t]", r"r\?:\[t\]:*")]
    fn scan_pattern_escapes_glob_characters(
        #[case] region: &str,
        #[case] table: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(TableNamespace::new(region, table).scan_pattern(), expected);
    }
}
