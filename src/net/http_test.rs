use super::*;

#[test]
fn parse_body_blank_is_none() {
    assert_eq!(parse_body(""), None);
    assert_eq!(parse_body("  \n"), None);
}

#[test]
fn parse_body_decodes_json() {
    assert_eq!(parse_body(r#"{"token":"abc"}"#), Some(serde_json::json!({"token": "abc"})));
}

#[test]
fn parse_body_keeps_non_json_as_string() {
    assert_eq!(
        parse_body("<h1>Bad Gateway</h1>"),
        Some(Value::String("<h1>Bad Gateway</h1>".to_owned()))
    );
}

#[test]
fn reply_success_range() {
    assert!(HttpReply { status: 200, body: None }.is_success());
    assert!(HttpReply { status: 201, body: None }.is_success());
    assert!(!HttpReply { status: 400, body: None }.is_success());
    assert!(!HttpReply { status: 500, body: None }.is_success());
}

#[test]
fn authorization_value_uses_token_scheme() {
    assert_eq!(authorization_value("k3y"), "Token k3y");
}
