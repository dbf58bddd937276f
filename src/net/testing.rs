//! Scripted transport shared by the networking and store tests.

use std::cell::RefCell;

use async_trait::async_trait;
use serde_json::Value;

use crate::net::http::{HttpReply, JsonTransport, TransportError};

/// One request as seen by `ScriptedTransport`.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: &'static str,
    pub url: String,
    pub body: Option<Value>,
    pub token: Option<String>,
}

/// Answers every request with one canned result and records what it was
/// asked for.
pub struct ScriptedTransport {
    reply: Result<HttpReply, TransportError>,
    pub calls: RefCell<Vec<RecordedCall>>,
    yield_first: bool,
}

impl ScriptedTransport {
    pub fn ok(status: u16, body: Option<Value>) -> Self {
        Self { reply: Ok(HttpReply { status, body }), calls: RefCell::new(Vec::new()), yield_first: false }
    }

    pub fn unreachable() -> Self {
        Self {
            reply: Err(TransportError::Unreachable("connection refused".to_owned())),
            calls: RefCell::new(Vec::new()),
            yield_first: false,
        }
    }

    /// Park once inside the transport before answering.
    pub fn slow(self) -> Self {
        Self { yield_first: true, ..self }
    }
}

#[async_trait(?Send)]
impl JsonTransport for ScriptedTransport {
    async fn post_json(&self, url: &str, body: &Value, token: Option<&str>) -> Result<HttpReply, TransportError> {
        self.calls.borrow_mut().push(RecordedCall {
            method: "POST",
            url: url.to_owned(),
            body: Some(body.clone()),
            token: token.map(str::to_owned),
        });
        if self.yield_first {
            tokio::task::yield_now().await;
        }
        self.reply.clone()
    }

    async fn get_json(&self, url: &str, token: Option<&str>) -> Result<HttpReply, TransportError> {
        self.calls.borrow_mut().push(RecordedCall {
            method: "GET",
            url: url.to_owned(),
            body: None,
            token: token.map(str::to_owned),
        });
        if self.yield_first {
            tokio::task::yield_now().await;
        }
        self.reply.clone()
    }
}
