//! REST helpers for requests that carry the session's API token.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result` outputs instead of panics; stores turn the error into
//! a notice and keep it for inspection.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde_json::Value;

use crate::config::{ApiConfig, USER_PROFILE_PATH};
use crate::net::http::{HttpReply, JsonTransport, TransportError};
use crate::net::types::error_message;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("No authentication token available")]
    MissingToken,
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String, body: Option<Value> },
    #[error("server returned an empty body")]
    EmptyBody,
}

/// POST `form` with `Authorization: Token <token>`; returns the response
/// body, if any.
///
/// # Errors
///
/// Fails without sending when `token` is missing or empty, and on transport
/// failure or a non-2xx status.
pub async fn post_authorized<T>(transport: &T, url: &str, form: &Value, token: Option<&str>) -> Result<Option<Value>, ApiError>
where
    T: JsonTransport + ?Sized,
{
    let token = token.filter(|t| !t.is_empty()).ok_or(ApiError::MissingToken)?;
    let reply = transport.post_json(url, form, Some(token)).await?;
    success_body(reply)
}

/// Fetch the signed-in user's profile from `/api/user-profile/`.
///
/// # Errors
///
/// Same as `post_authorized`, plus `ApiError::EmptyBody` when the server
/// answers without a profile.
pub async fn fetch_user_profile<T>(transport: &T, config: &ApiConfig, token: Option<&str>) -> Result<Value, ApiError>
where
    T: JsonTransport + ?Sized,
{
    let token = token.filter(|t| !t.is_empty()).ok_or(ApiError::MissingToken)?;
    let reply = transport.get_json(&config.url(USER_PROFILE_PATH), Some(token)).await?;
    success_body(reply)?.filter(|b| !b.is_null()).ok_or(ApiError::EmptyBody)
}

/// GET a reference list (news, FAQ, regions, competitions...).
///
/// Accepts a bare JSON array, a paginated `{"results": [...]}` page, or the
/// `{"count", "teams": [...]}` shape of the user's team list. An empty body
/// is an empty list. `token` is sent when present.
///
/// # Errors
///
/// Transport failure or a non-2xx status.
pub async fn fetch_list<T>(transport: &T, url: &str, token: Option<&str>) -> Result<Vec<Value>, ApiError>
where
    T: JsonTransport + ?Sized,
{
    let token = token.filter(|t| !t.is_empty());
    let reply = transport.get_json(url, token).await?;
    Ok(match success_body(reply)? {
        Some(Value::Array(items)) => items,
        Some(Value::Object(mut page)) => match page.remove("results").or_else(|| page.remove("teams")) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    })
}

fn success_body(reply: HttpReply) -> Result<Option<Value>, ApiError> {
    if !reply.is_success() {
        return Err(ApiError::Rejected {
            status: reply.status,
            message: error_message(reply.body.as_ref(), reply.status),
            body: reply.body,
        });
    }
    Ok(reply.body)
}
