use std::cell::RefCell;
use std::sync::Arc;

use serde_json::json;

use super::*;
use crate::net::testing::ScriptedTransport;
use crate::state::notice::NoticeKind;
use crate::state::session::{CREDENTIAL_KEY, IDENTITY_KEY, OperationStatus, ROLE_KEY};
use crate::util::storage::{KeyValueStorage, MemoryStorage};

fn fresh() -> (Arc<MemoryStorage>, RefCell<Session>) {
    let storage = Arc::new(MemoryStorage::new());
    let session = RefCell::new(Session::new(storage.clone()));
    (storage, session)
}

fn form() -> Value {
    json!({"email": "a@b.ru", "password": "password1"})
}

async fn run(session: &RefCell<Session>, transport: &ScriptedTransport, kind: AuthKind) -> bool {
    authenticate(session, transport, &ApiConfig::default(), kind, &form()).await
}

// =============================================================
// Endpoint selection
// =============================================================

#[tokio::test]
async fn login_posts_form_to_login_endpoint() {
    let (_, session) = fresh();
    let transport = ScriptedTransport::ok(200, Some(json!({"token": "abc"})));
    authenticate(&session, &transport, &ApiConfig::new("http://api.test"), AuthKind::Login, &form()).await;

    let calls = transport.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, "POST");
    assert_eq!(calls[0].url, "http://api.test/api/auth/login/");
    assert_eq!(calls[0].body, Some(form()));
    assert_eq!(calls[0].token, None);
}

#[tokio::test]
async fn register_posts_to_register_endpoint() {
    let (_, session) = fresh();
    let transport = ScriptedTransport::ok(201, Some(json!({"token": "t", "user": {"id": 1}})));
    run(&session, &transport, AuthKind::Register).await;
    assert_eq!(transport.calls.borrow()[0].url, "/api/auth/register/");
}

// =============================================================
// Success paths
// =============================================================

#[tokio::test]
async fn login_with_token_only_commits_credential() {
    let (storage, session) = fresh();
    let transport = ScriptedTransport::ok(200, Some(json!({"token": "abc"})));

    assert!(run(&session, &transport, AuthKind::Login).await);

    let s = session.borrow();
    assert!(s.is_authenticated());
    assert_eq!(s.credential(), Some("abc"));
    assert!(s.identity().is_none());
    assert!(s.role().is_none());
    assert!(s.last_error().is_none());
    assert_eq!(s.last_notice(), &Notice::success(MSG_LOGIN_OK));
    assert_eq!(storage.get(CREDENTIAL_KEY).as_deref(), Some("abc"));
}

#[tokio::test]
async fn register_with_token_and_user_commits_both() {
    let (storage, session) = fresh();
    let transport = ScriptedTransport::ok(201, Some(json!({"token": "t", "user": {"id": 1}})));

    assert!(run(&session, &transport, AuthKind::Register).await);

    let s = session.borrow();
    assert_eq!(s.credential(), Some("t"));
    assert_eq!(s.identity(), Some(&json!({"id": 1})));
    assert_eq!(s.last_notice(), &Notice::success(MSG_REGISTER_OK));
    assert_eq!(storage.get(IDENTITY_KEY).as_deref(), Some(r#"{"id":1}"#));
}

#[tokio::test]
async fn top_level_role_wins_over_user_role() {
    let (storage, session) = fresh();
    let transport = ScriptedTransport::ok(
        200,
        Some(json!({"token": "t", "role": {"id": 2, "name": "ФСП"}, "user": {"role": {"id": 1}}})),
    );

    assert!(run(&session, &transport, AuthKind::Login).await);
    assert_eq!(session.borrow().role(), Some(&RoleId::new("2")));
    assert_eq!(storage.get(ROLE_KEY).as_deref(), Some("2"));
}

#[tokio::test]
async fn user_role_used_when_top_level_missing() {
    let (_, session) = fresh();
    let transport = ScriptedTransport::ok(200, Some(json!({"token": "t", "user": {"role": 1}})));

    assert!(run(&session, &transport, AuthKind::Login).await);
    assert_eq!(session.borrow().role(), Some(&RoleId::new("1")));
}

#[tokio::test]
async fn login_without_user_clears_stale_identity() {
    let storage = Arc::new(MemoryStorage::with_items([(IDENTITY_KEY, r#"{"id":9}"#)]));
    let session = RefCell::new(Session::restore(storage.clone()));
    let transport = ScriptedTransport::ok(200, Some(json!({"token": "abc"})));

    assert!(run(&session, &transport, AuthKind::Login).await);
    assert!(session.borrow().identity().is_none());
    assert_eq!(storage.get(IDENTITY_KEY), None);
}

// =============================================================
// Failure paths
// =============================================================

#[tokio::test]
async fn transport_failure_reports_server_not_responding() {
    let (_, session) = fresh();
    let transport = ScriptedTransport::unreachable();

    assert!(!run(&session, &transport, AuthKind::Login).await);

    let s = session.borrow();
    assert!(!s.is_authenticated());
    assert_eq!(s.last_error(), Some(&AuthError::NetworkUnreachable));
    assert_eq!(s.last_notice().kind, NoticeKind::Error);
    assert!(s.last_notice().visible);
    assert_eq!(s.last_notice().message, "Сервер не отвечает");
}

#[tokio::test]
async fn empty_body_leaves_session_unchanged() {
    let storage = Arc::new(MemoryStorage::with_items([(CREDENTIAL_KEY, "old"), (ROLE_KEY, "0")]));
    let session = RefCell::new(Session::restore(storage.clone()));
    let transport = ScriptedTransport::ok(200, None);

    assert!(!run(&session, &transport, AuthKind::Login).await);

    let s = session.borrow();
    assert_eq!(s.last_error(), Some(&AuthError::EmptyResponse));
    assert_eq!(s.credential(), Some("old"));
    assert_eq!(s.role(), Some(&RoleId::new("0")));
    assert_eq!(storage.get(CREDENTIAL_KEY).as_deref(), Some("old"));
}

#[tokio::test]
async fn null_body_counts_as_empty() {
    let (_, session) = fresh();
    let transport = ScriptedTransport::ok(200, Some(Value::Null));
    assert!(!run(&session, &transport, AuthKind::Login).await);
    assert_eq!(session.borrow().last_error(), Some(&AuthError::EmptyResponse));
}

#[tokio::test]
async fn login_without_token_is_missing_token() {
    let (_, session) = fresh();
    let transport = ScriptedTransport::ok(200, Some(json!({"user": {"id": 1}, "role": {"id": 0}})));

    assert!(!run(&session, &transport, AuthKind::Login).await);

    let s = session.borrow();
    assert_eq!(s.last_error(), Some(&AuthError::MissingToken));
    assert!(s.identity().is_none());
    assert!(s.role().is_none());
}

#[tokio::test]
async fn registration_missing_user_commits_nothing() {
    let (storage, session) = fresh();
    let transport = ScriptedTransport::ok(201, Some(json!({"token": "t"})));

    assert!(!run(&session, &transport, AuthKind::Register).await);

    let s = session.borrow();
    assert_eq!(s.last_error(), Some(&AuthError::PendingApproval));
    assert!(!s.is_authenticated());
    assert_eq!(storage.get(CREDENTIAL_KEY), None);
    assert_eq!(storage.get(IDENTITY_KEY), None);
}

#[tokio::test]
async fn registration_awaiting_moderation_is_pending_approval() {
    let (_, session) = fresh();
    let transport = ScriptedTransport::ok(
        201,
        Some(json!({
            "user": {"id": 3},
            "role": {"id": 1, "name": "Региональный представитель"},
            "message": "Регистрация успешна. Ожидайте подтверждения администратором."
        })),
    );

    assert!(!run(&session, &transport, AuthKind::Register).await);
    let s = session.borrow();
    assert_eq!(s.last_error(), Some(&AuthError::PendingApproval));
    assert_eq!(s.last_notice().message, "Ожидайте подтверждения регистрации");
    assert!(s.role().is_none());
}

#[tokio::test]
async fn server_error_uses_first_recognized_message() {
    let (_, session) = fresh();
    let transport = ScriptedTransport::ok(
        400,
        Some(json!({"non_field_errors": ["Неверный email или пароль"], "detail": "B"})),
    );

    assert!(!run(&session, &transport, AuthKind::Login).await);

    let s = session.borrow();
    assert_eq!(s.last_error(), Some(&AuthError::ServerReported("Неверный email или пароль".to_owned())));
    assert_eq!(s.last_notice(), &Notice::error("Неверный email или пароль"));
}

#[tokio::test]
async fn server_error_with_unknown_shape_dumps_body() {
    let (_, session) = fresh();
    let transport = ScriptedTransport::ok(400, Some(json!({"password": ["short"]})));

    assert!(!run(&session, &transport, AuthKind::Register).await);
    assert_eq!(
        session.borrow().last_error(),
        Some(&AuthError::ServerReported(r#"{"password":["short"]}"#.to_owned()))
    );
}

#[tokio::test]
async fn new_attempt_clears_previous_error() {
    let (_, session) = fresh();
    assert!(!run(&session, &ScriptedTransport::unreachable(), AuthKind::Login).await);
    assert!(session.borrow().last_error().is_some());

    assert!(run(&session, &ScriptedTransport::ok(200, Some(json!({"token": "x"}))), AuthKind::Login).await);
    assert!(session.borrow().last_error().is_none());
}

// =============================================================
// Operation status
// =============================================================

#[tokio::test]
async fn status_is_idle_after_every_path() {
    let transports = [
        ScriptedTransport::ok(200, Some(json!({"token": "abc"}))),
        ScriptedTransport::ok(200, None),
        ScriptedTransport::ok(200, Some(json!({}))),
        ScriptedTransport::ok(500, Some(json!({"detail": "boom"}))),
        ScriptedTransport::unreachable(),
    ];
    for transport in &transports {
        for kind in [AuthKind::Login, AuthKind::Register] {
            let (_, session) = fresh();
            run(&session, transport, kind).await;
            let s = session.borrow();
            assert_eq!(s.operation_status(), OperationStatus::Idle);
            assert_eq!(s.is_authenticated(), s.credential().is_some());
        }
    }
}

#[tokio::test]
async fn overlapping_call_is_rejected_without_disturbing_first() {
    let (_, session) = fresh();
    let slow = ScriptedTransport::ok(200, Some(json!({"token": "first"}))).slow();
    let fast = ScriptedTransport::ok(200, Some(json!({"token": "second"})));

    let first = run(&session, &slow, AuthKind::Login);
    let second = async {
        // Runs while `first` is parked inside the transport.
        let accepted = run(&session, &fast, AuthKind::Login).await;
        let status = session.borrow().operation_status();
        (accepted, status)
    };
    let (first_ok, (second_ok, status_during)) = tokio::join!(first, second);

    assert!(first_ok);
    assert!(!second_ok);
    assert_eq!(status_during, OperationStatus::InFlight);
    assert!(fast.calls.borrow().is_empty());

    let s = session.borrow();
    assert_eq!(s.credential(), Some("first"));
    assert_eq!(s.operation_status(), OperationStatus::Idle);
}
