//! JSON-over-HTTP transport seam.
//!
//! Browser (`csr`): real requests via `gloo-net`.
//! Elsewhere: `BrowserTransport` reports every request as unreachable; native
//! callers (the CLI, tests) bring their own `JsonTransport`.
//!
//! ERROR HANDLING
//! ==============
//! A transport only fails when no response was obtained. Any HTTP status,
//! including 4xx/5xx, is a successful exchange and is returned as `HttpReply`
//! for the caller to classify.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use async_trait::async_trait;
use serde_json::Value;

/// Status and decoded body of a completed HTTP exchange.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    /// `None` when the body was empty.
    pub body: Option<Value>,
}

impl HttpReply {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("no response: {0}")]
    Unreachable(String),
}

#[async_trait(?Send)]
pub trait JsonTransport {
    /// POST `body` as JSON. `token` adds `Authorization: Token <token>`.
    async fn post_json(&self, url: &str, body: &Value, token: Option<&str>) -> Result<HttpReply, TransportError>;

    /// GET `url`. `token` adds `Authorization: Token <token>`.
    async fn get_json(&self, url: &str, token: Option<&str>) -> Result<HttpReply, TransportError>;
}

/// Value of the `Authorization` header for an API token.
#[must_use]
pub fn authorization_value(token: &str) -> String {
    format!("Token {token}")
}

/// Decode a response body. Blank bodies are `None`; bodies that are not JSON
/// are kept as a JSON string so error reporting can still show them.
#[must_use]
pub fn parse_body(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    Some(serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_owned())))
}

/// `fetch`-backed transport for the browser build.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

#[cfg(feature = "csr")]
impl BrowserTransport {
    async fn finish(request: gloo_net::http::Request) -> Result<HttpReply, TransportError> {
        let resp = request.send().await.map_err(|e| TransportError::Unreachable(e.to_string()))?;
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        Ok(HttpReply { status, body: parse_body(&text) })
    }
}

#[async_trait(?Send)]
impl JsonTransport for BrowserTransport {
    async fn post_json(&self, url: &str, body: &Value, token: Option<&str>) -> Result<HttpReply, TransportError> {
        #[cfg(feature = "csr")]
        {
            let mut builder = gloo_net::http::Request::post(url);
            if let Some(token) = token {
                builder = builder.header("Authorization", &authorization_value(token));
            }
            let request = builder.json(body).map_err(|e| TransportError::Unreachable(e.to_string()))?;
            Self::finish(request).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (url, body, token);
            Err(TransportError::Unreachable("not available outside the browser".to_owned()))
        }
    }

    async fn get_json(&self, url: &str, token: Option<&str>) -> Result<HttpReply, TransportError> {
        #[cfg(feature = "csr")]
        {
            let mut builder = gloo_net::http::Request::get(url);
            if let Some(token) = token {
                builder = builder.header("Authorization", &authorization_value(token));
            }
            let request = builder.build().map_err(|e| TransportError::Unreachable(e.to_string()))?;
            Self::finish(request).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (url, token);
            Err(TransportError::Unreachable("not available outside the browser".to_owned()))
        }
    }
}
