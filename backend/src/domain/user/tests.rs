//! Tests for the domain user model.

use super::*;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn ada() -> User {
    User::new("ada@example.com", "Ada", "Lovelace")
}

#[rstest]
fn serialises_with_lowercase_attribute_names(ada: User) {
    let value = serde_json::to_value(&ada).expect("serialise user");
    assert_eq!(
        value,
        json!({
            "email": "ada@example.com",
            "firstname": "Ada",
            "lastname": "Lovelace",
        })
    );
}

#[rstest]
#[case(json!({"email": "ada@example.com", "firstname": "Ada", "lastname": "Lovelace"}))]
#[case(json!({"email": "ada@example.com", "firstName": "Ada", "lastName": "Lovelace"}))]
#[case(json!({"email": "ada@example.com", "firstname": "Ada", "lastname": "Lovelace", "role": "admin"}))]
fn deserialises_accepted_spellings(#[case] input: Value, ada: User) {
    let user: User = serde_json::from_value(input).expect("user JSON");
    assert_eq!(user, ada);
}

#[rstest]
fn missing_fields_default_to_empty() {
    let user: User = serde_json::from_value(json!({"email": "ada@example.com"})).expect("user JSON");
    assert_eq!(user.email(), "ada@example.com");
    assert_eq!(user.first_name(), "");
    assert_eq!(user.last_name(), "");
}

#[rstest]
fn null_fields_decode_as_empty() {
    let user: User = serde_json::from_value(json!({
        "email": "ada@example.com",
        "firstname": null,
        "lastName": null,
    }))
    .expect("user JSON");
    assert_eq!(user, User::new("ada@example.com", "", ""));
}

#[rstest]
#[case("")]
#[case("not json")]
#[case("[1, 2]")]
#[case(r#"{"email": 42}"#)]
fn rejects_malformed_documents(#[case] body: &str) {
    assert!(serde_json::from_str::<User>(body).is_err());
}

#[rstest]
fn zero_valued_user_has_no_email() {
    let user = User::default();
    assert!(!user.has_email());
    assert_eq!(
        serde_json::to_value(&user).expect("serialise user"),
        json!({"email": "", "firstname": "", "lastname": ""})
    );
}

#[rstest]
fn populated_user_has_email(ada: User) {
    assert!(ada.has_email());
}
