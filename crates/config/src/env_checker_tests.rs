use super::*;

#[test]
fn accepts_all_string_values() {
    let mut raw = HashMap::new();
    raw.insert("A".to_string(), serde_json::Value::String("1".to_string()));
    raw.insert("B".to_string(), serde_json::Value::String("two".to_string()));

    let checked = check(&raw).expect("all strings");
    assert_eq!(checked.get("A"), Some(&"1".to_string()));
    assert_eq!(checked.get("B"), Some(&"two".to_string()));
}

#[test]
fn rejects_a_numeric_value_with_the_offending_key_named() {
    let mut raw = HashMap::new();
    raw.insert("PORT".to_string(), serde_json::json!(8080));

    let err = check(&raw).unwrap_err();
    assert_eq!(
        err.to_string(),
        "environment variable only can be string type: PORT"
    );
}

#[test]
fn rejects_a_boolean_value() {
    let mut raw = HashMap::new();
    raw.insert("FLAG".to_string(), serde_json::json!(true));

    assert!(check(&raw).is_err());
}
