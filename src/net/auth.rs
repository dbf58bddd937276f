//! Login / registration exchange and its commit into the session store.
//!
//! ALGORITHM
//! =========
//! 1. Claim the session's single in-flight slot (reject if taken).
//! 2. POST the form to the login or registration endpoint.
//! 3. Classify: no response, error status, empty body, incomplete body.
//! 4. On success commit credential, identity, and role together.
//! 5. Publish a notice, record the error if any, release the slot.
//!
//! The store is touched only in steps 1 and 4–5, never across the await, so
//! the operation works the same against a `RwSignal` or a `RefCell`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use serde_json::Value;

use crate::config::{ApiConfig, LOGIN_PATH, REGISTER_PATH};
use crate::net::http::JsonTransport;
use crate::net::types::{AuthResponse, error_message};
use crate::state::StoreHandle;
use crate::state::notice::Notice;
use crate::state::session::{RoleId, Session};

pub const MSG_LOGIN_OK: &str = "Вход выполнен успешно";
pub const MSG_REGISTER_OK: &str = "Вы успешно зарегистрировались";

/// Why an authentication attempt failed. `Display` is the user-facing text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Сервер не отвечает")]
    NetworkUnreachable,
    #[error("Сервер вернул пустой ответ")]
    EmptyResponse,
    #[error("Ожидайте подтверждения регистрации")]
    PendingApproval,
    #[error("Не получен токен авторизации")]
    MissingToken,
    #[error("{0}")]
    ServerReported(String),
    #[error("Запрос уже выполняется")]
    AlreadyInFlight,
}

/// Which exchange to perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthKind {
    Login,
    Register,
}

impl AuthKind {
    #[must_use]
    pub fn endpoint(self, config: &ApiConfig) -> String {
        match self {
            Self::Login => config.url(LOGIN_PATH),
            Self::Register => config.url(REGISTER_PATH),
        }
    }

    #[must_use]
    pub fn success_message(self) -> &'static str {
        match self {
            Self::Login => MSG_LOGIN_OK,
            Self::Register => MSG_REGISTER_OK,
        }
    }
}

/// A validated response, ready to commit.
#[derive(Debug)]
struct Credentials {
    token: String,
    user: Option<Value>,
    role: Option<RoleId>,
}

/// Log in or register with `form`, updating `session` with the outcome.
///
/// Returns `true` when a credential was committed. Every failure is reported
/// through the session's notice and `last_error` instead of an `Err`. A call
/// made while another is in flight returns `false` without touching the
/// session.
pub async fn authenticate<H, T>(session: &H, transport: &T, config: &ApiConfig, kind: AuthKind, form: &Value) -> bool
where
    H: StoreHandle<Session>,
    T: JsonTransport + ?Sized,
{
    if !session.with_mut(Session::begin_operation).unwrap_or(false) {
        log::debug!("{kind:?} ignored: {}", AuthError::AlreadyInFlight);
        return false;
    }

    let outcome = exchange(transport, config, kind, form).await;

    session
        .with_mut(|s| {
            let committed = match outcome {
                Ok(credentials) => {
                    s.set_credential(credentials.token);
                    s.set_identity(credentials.user);
                    if let Some(role) = credentials.role {
                        s.set_role(role);
                    }
                    s.set_notice(Notice::success(kind.success_message()));
                    true
                }
                Err(err) => {
                    log::debug!("{kind:?} failed: {err}");
                    s.set_notice(Notice::error(err.to_string()));
                    s.set_operation_error(err);
                    false
                }
            };
            s.finish_operation();
            committed
        })
        .unwrap_or(false)
}

async fn exchange<T>(transport: &T, config: &ApiConfig, kind: AuthKind, form: &Value) -> Result<Credentials, AuthError>
where
    T: JsonTransport + ?Sized,
{
    let url = kind.endpoint(config);
    let reply = transport.post_json(&url, form, None).await.map_err(|e| {
        log::warn!("{kind:?} request to {url} failed: {e}");
        AuthError::NetworkUnreachable
    })?;

    if !reply.is_success() {
        return Err(AuthError::ServerReported(error_message(reply.body.as_ref(), reply.status)));
    }

    let body = reply.body.filter(|b| !b.is_null()).ok_or(AuthError::EmptyResponse)?;
    let response = AuthResponse::from_body(&body);

    let token = match (kind, response.token(), response.user()) {
        (AuthKind::Register, Some(token), Some(_)) | (AuthKind::Login, Some(token), _) => token.to_owned(),
        (AuthKind::Register, _, _) => return Err(AuthError::PendingApproval),
        (AuthKind::Login, None, _) => return Err(AuthError::MissingToken),
    };

    Ok(Credentials { token, user: response.user().cloned(), role: response.role_id() })
}
