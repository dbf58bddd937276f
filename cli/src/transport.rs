//! `reqwest`-backed `JsonTransport` for the native CLI.

use std::time::Duration;

use async_trait::async_trait;
use portal::net::http::{HttpReply, JsonTransport, TransportError, authorization_value, parse_body};
use reqwest::header::AUTHORIZATION;
use serde_json::Value;

pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    async fn send(&self, request: reqwest::RequestBuilder, token: Option<&str>) -> Result<HttpReply, TransportError> {
        let request = match token {
            Some(token) => request.header(AUTHORIZATION, authorization_value(token)),
            None => request,
        };
        let response = request.send().await.map_err(|e| TransportError::Unreachable(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();
        tracing::debug!(status, bytes = text.len(), "response received");
        Ok(HttpReply { status, body: parse_body(&text) })
    }
}

#[async_trait(?Send)]
impl JsonTransport for ReqwestTransport {
    async fn post_json(&self, url: &str, body: &Value, token: Option<&str>) -> Result<HttpReply, TransportError> {
        tracing::debug!(%url, "POST");
        self.send(self.client.post(url).json(body), token).await
    }

    async fn get_json(&self, url: &str, token: Option<&str>) -> Result<HttpReply, TransportError> {
        tracing::debug!(%url, "GET");
        self.send(self.client.get(url), token).await
    }
}
