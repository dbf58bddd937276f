use serde_json::json;

use super::*;
use crate::net::testing::ScriptedTransport;

#[tokio::test]
async fn post_authorized_requires_token() {
    let transport = ScriptedTransport::ok(201, Some(json!({})));
    let err = post_authorized(&transport, "/api/teams/", &json!({}), None).await.unwrap_err();
    assert_eq!(err, ApiError::MissingToken);

    let err = post_authorized(&transport, "/api/teams/", &json!({}), Some("")).await.unwrap_err();
    assert_eq!(err, ApiError::MissingToken);
    assert!(transport.calls.borrow().is_empty());
}

#[tokio::test]
async fn post_authorized_sends_token_and_returns_body() {
    let transport = ScriptedTransport::ok(201, Some(json!({"id": 4})));
    let body = post_authorized(&transport, "/api/teams/", &json!({"name": "Alpha"}), Some("tok")).await.unwrap();
    assert_eq!(body, Some(json!({"id": 4})));

    let calls = transport.calls.borrow();
    assert_eq!(calls[0].token.as_deref(), Some("tok"));
    assert_eq!(calls[0].body, Some(json!({"name": "Alpha"})));
}

#[tokio::test]
async fn post_authorized_rejection_keeps_body() {
    let transport = ScriptedTransport::ok(400, Some(json!({"detail": "Заявка уже подана"})));
    let err = post_authorized(&transport, "/api/team-applications/", &json!({}), Some("tok")).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Rejected {
            status: 400,
            message: "Заявка уже подана".to_owned(),
            body: Some(json!({"detail": "Заявка уже подана"})),
        }
    );
}

#[tokio::test]
async fn post_authorized_transport_failure() {
    let transport = ScriptedTransport::unreachable();
    let err = post_authorized(&transport, "/x/", &json!({}), Some("tok")).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test]
async fn fetch_user_profile_gets_profile_with_token() {
    let profile = json!({"id": 1, "info": {"name": "Иван", "role_name": "Спортсмен"}});
    let transport = ScriptedTransport::ok(200, Some(profile.clone()));
    let got = fetch_user_profile(&transport, &ApiConfig::new("http://api.test"), Some("tok")).await.unwrap();
    assert_eq!(got, profile);

    let calls = transport.calls.borrow();
    assert_eq!(calls[0].method, "GET");
    assert_eq!(calls[0].url, "http://api.test/api/user-profile/");
    assert_eq!(calls[0].token.as_deref(), Some("tok"));
}

#[tokio::test]
async fn fetch_user_profile_empty_body_is_error() {
    let transport = ScriptedTransport::ok(200, None);
    let err = fetch_user_profile(&transport, &ApiConfig::default(), Some("tok")).await.unwrap_err();
    assert_eq!(err, ApiError::EmptyBody);
}

#[tokio::test]
async fn fetch_user_profile_unauthorized() {
    let transport = ScriptedTransport::ok(401, Some(json!({"detail": "Invalid token."})));
    let err = fetch_user_profile(&transport, &ApiConfig::default(), Some("old")).await.unwrap_err();
    assert!(matches!(err, ApiError::Rejected { status: 401, .. }));
}

#[tokio::test]
async fn fetch_list_accepts_bare_array_without_token() {
    let transport = ScriptedTransport::ok(200, Some(json!([{"id": 1}, {"id": 2}])));
    let items = fetch_list(&transport, "/api/news/", None).await.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(transport.calls.borrow()[0].token, None);
}

#[tokio::test]
async fn fetch_list_unwraps_paginated_results() {
    let transport = ScriptedTransport::ok(200, Some(json!({"count": 1, "results": [{"id": 7}]})));
    let items = fetch_list(&transport, "/api/competitions/", Some("tok")).await.unwrap();
    assert_eq!(items, vec![json!({"id": 7})]);
    assert_eq!(transport.calls.borrow()[0].token.as_deref(), Some("tok"));
}

#[tokio::test]
async fn fetch_list_empty_body_is_empty_list() {
    let transport = ScriptedTransport::ok(200, None);
    assert!(fetch_list(&transport, "/api/faq/", None).await.unwrap().is_empty());
}

#[tokio::test]
async fn fetch_list_rejection() {
    let transport = ScriptedTransport::ok(500, None);
    let err = fetch_list(&transport, "/api/faq/", None).await.unwrap_err();
    assert!(matches!(err, ApiError::Rejected { status: 500, .. }));
}

#[tokio::test]
async fn fetch_list_reads_user_teams_shape() {
    let transport = ScriptedTransport::ok(200, Some(json!({"count": 1, "teams": [{"id": 9, "name": "Альфа"}]})));
    let items = fetch_list(&transport, "/api/user/teams/", Some("tok")).await.unwrap();
    assert_eq!(items, vec![json!({"id": 9, "name": "Альфа"})]);
}
