//! Routed pages.

pub mod auth;
pub mod cabinet;
pub mod command;
pub mod competitions;
pub mod home;
pub mod info;
pub mod not_found;
pub mod region;

use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::net::api::fetch_list;
use crate::net::http::BrowserTransport;
use crate::net::types::decode_items;

/// Load and decode a reference list. Failures are logged and read as an
/// empty list.
pub(crate) async fn load_list<T: DeserializeOwned>(config: ApiConfig, path: &'static str, token: Option<String>) -> Vec<T> {
    match fetch_list(&BrowserTransport, &config.url(path), token.as_deref()).await {
        Ok(items) => decode_items(items),
        Err(e) => {
            log::warn!("loading {path} failed: {e}");
            Vec::new()
        }
    }
}

/// Run `fut` on the browser task queue. Builds without `csr` have no
/// executor and drop it.
pub(crate) fn spawn<F>(fut: F)
where
    F: Future<Output = ()> + 'static,
{
    #[cfg(feature = "csr")]
    leptos::task::spawn_local(fut);
    #[cfg(not(feature = "csr"))]
    drop(fut);
}
