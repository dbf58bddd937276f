//! Competition store: competition creation and the selection used by the
//! team-application dialog.

#[cfg(test)]
#[path = "competition_test.rs"]
mod competition_test;

use serde_json::Value;

use crate::config::{ApiConfig, COMPETITION_CREATE_PATH};
use crate::net::api::{ApiError, post_authorized};
use crate::net::http::JsonTransport;
use crate::state::StoreHandle;

#[derive(Clone, Debug, Default)]
pub struct CompetitionState {
    pub loading: bool,
    pub last_error: Option<ApiError>,
    pub selected_id: Option<i64>,
    pub team_id: Option<i64>,
    /// The "apply to competition" dialog is open.
    pub application_open: bool,
}

/// Create a competition from `form`. Returns `true` on a 2xx response.
pub async fn create_competition<H, T>(store: &H, transport: &T, config: &ApiConfig, form: &Value, token: Option<&str>) -> bool
where
    H: StoreHandle<CompetitionState>,
    T: JsonTransport + ?Sized,
{
    store.with_mut(|s| s.loading = true);

    let result = post_authorized(transport, &config.url(COMPETITION_CREATE_PATH), form, token).await;

    store
        .with_mut(|s| {
            s.loading = false;
            match result {
                Ok(_) => {
                    s.last_error = None;
                    true
                }
                Err(err) => {
                    log::debug!("competition create failed: {err}");
                    s.last_error = Some(err);
                    false
                }
            }
        })
        .unwrap_or(false)
}
