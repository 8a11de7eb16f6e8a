use serde_json::json;

use super::*;

#[test]
fn test_stringify() {
    assert_eq!(stringify(&json!("foobar")), "foobar");
    assert_eq!(stringify(&json!(1)), "1");
    assert_eq!(stringify(&json!("1")), stringify(&json!(1)));
    assert_eq!(stringify(&json!(-42)), "-42");
    assert_eq!(stringify(&json!(1.5)), "1.5");
    assert_eq!(stringify(&json!(true)), "true");
    assert_eq!(stringify(&Value::Null), "null");
    assert_eq!(stringify(&json!([1, "a"])), r#"[1,"a"]"#);
    assert_eq!(stringify(&json!({"a": 1})), r#"{"a":1}"#);
}

#[test]
fn test_index_key() {
    assert_eq!(index_key("username", &json!("foobar")), "/username/foobar");
    assert_eq!(index_key("email", &json!("foo@bar")), "/email/foo@bar");
    assert_eq!(index_key("age", &json!(30)), index_key("age", &json!("30")));
    assert_eq!(index_prefix("username"), "/username/");
    assert!(index_key("username", &json!("")).starts_with(&index_prefix("username")));
}

#[test]
fn test_parse_index_key() {
    assert_eq!(parse_index_key("/username/foobar"), Some(("username", "foobar")));
    assert_eq!(parse_index_key("/email/foo@bar"), Some(("email", "foo@bar")));
    // field values can carry the separator.
    assert_eq!(parse_index_key("/path/a/b/c"), Some(("path", "a/b/c")));
    assert_eq!(parse_index_key("/username/"), Some(("username", "")));

    assert_eq!(parse_index_key("1"), None);
    assert_eq!(parse_index_key("/username"), None);
    assert_eq!(parse_index_key("//foobar"), None);
    assert_eq!(parse_index_key(""), None);
}

#[test]
fn test_field() {
    let doc = json!({"username": "foobar", "email": null, "age": 0});
    assert_eq!(field(&doc, "username"), Some(&json!("foobar")));
    assert_eq!(field(&doc, "age"), Some(&json!(0)));
    assert_eq!(field(&doc, "email"), None);
    assert_eq!(field(&doc, "missing"), None);

    assert_eq!(field(&json!("foobar"), "username"), None);
    assert_eq!(field(&json!([1, 2]), "0"), None);
}
