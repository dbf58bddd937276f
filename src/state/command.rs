//! Team ("command") store: team-type selection and team applications to
//! competitions.

#[cfg(test)]
#[path = "command_test.rs"]
mod command_test;

use serde_json::Value;

use crate::net::api::{ApiError, post_authorized};
use crate::net::http::JsonTransport;
use crate::state::StoreHandle;
use crate::state::notice::Notice;

pub const MSG_APPLICATION_OK: &str = "Вы успешно подали заявку";
pub const MSG_APPLICATION_REJECTED: &str = "Вы уже подали одну заявку больше нельзя";
pub const MSG_TEAM_CREATED: &str = "Команда успешно создана";
pub const MSG_TEAM_REJECTED: &str = "Не удалось создать команду";

/// Team visibility, sent to the API as `"0"` / `"1"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TeamKind {
    Public,
    Private,
}

impl TeamKind {
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "0" => Some(Self::Public),
            "1" => Some(Self::Private),
            _ => None,
        }
    }

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Public => "0",
            Self::Private => "1",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Public => "Публичная",
            Self::Private => "Приватная",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct CommandState {
    /// The create/apply dialog is open.
    pub is_creating: bool,
    pub kind: Option<TeamKind>,
    pub loading: bool,
    pub last_error: Option<ApiError>,
    pub notice: Notice,
    /// Team or competition the dialog acts on.
    pub selected_id: Option<i64>,
}

/// Submit a team application to `url` on behalf of the signed-in user.
///
/// The outcome is published as the store's notice; `loading` and
/// `is_creating` are cleared on every path.
pub async fn submit_application<H, T>(store: &H, transport: &T, url: &str, form: &Value, token: Option<&str>) -> bool
where
    H: StoreHandle<CommandState>,
    T: JsonTransport + ?Sized,
{
    submit(store, transport, url, form, token, (MSG_APPLICATION_OK, MSG_APPLICATION_REJECTED)).await
}

/// Create a team at `url`. Same store handling as `submit_application`.
pub async fn create_team<H, T>(store: &H, transport: &T, url: &str, form: &Value, token: Option<&str>) -> bool
where
    H: StoreHandle<CommandState>,
    T: JsonTransport + ?Sized,
{
    submit(store, transport, url, form, token, (MSG_TEAM_CREATED, MSG_TEAM_REJECTED)).await
}

async fn submit<H, T>(
    store: &H,
    transport: &T,
    url: &str,
    form: &Value,
    token: Option<&str>,
    (ok_text, failed_text): (&str, &str),
) -> bool
where
    H: StoreHandle<CommandState>,
    T: JsonTransport + ?Sized,
{
    store.with_mut(|s| s.loading = true);

    let result = post_authorized(transport, url, form, token).await;

    store
        .with_mut(|s| {
            let ok = match result {
                Ok(_) => {
                    s.notice = Notice::success(ok_text);
                    s.last_error = None;
                    true
                }
                Err(err) => {
                    log::debug!("request to {url} failed: {err}");
                    s.notice = Notice::error(failed_text);
                    s.last_error = Some(err);
                    false
                }
            };
            s.loading = false;
            s.is_creating = false;
            ok
        })
        .unwrap_or(false)
}
