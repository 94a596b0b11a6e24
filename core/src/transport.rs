//! Blocking `ureq` transport driven from Tokio's blocking pool.
//!
//! `send` moves the request onto `spawn_blocking` and returns immediately
//! with a boxed future. Every HTTP status, 4xx and 5xx included, comes back
//! as an ordinary `HttpResponse`; only network, protocol and runtime failures
//! surface as `TransportError`.

use std::future::{self, Future};
use std::pin::Pin;

use thiserror::Error;
use tokio::runtime::Handle;
use tracing::trace;

use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};

/// In-flight request started by `UreqTransport::send`.
pub type PendingResponse =
    Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + Send>>;

/// Failures that prevent a response from being received at all.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http transport error: {0}")]
    Http(#[from] ureq::Error),

    #[error("request task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("no tokio runtime available: {0}")]
    NoRuntime(String),
}

/// `Transport` backed by a shared `ureq::Agent`.
///
/// `send` must be called from inside a Tokio runtime; otherwise the returned
/// future resolves to `TransportError::NoRuntime`.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    type Pending = PendingResponse;

    fn send(&self, request: HttpRequest) -> PendingResponse {
        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => return Box::pin(future::ready(Err(TransportError::NoRuntime(e.to_string())))),
        };
        let agent = self.agent.clone();
        let task = handle.spawn_blocking(move || execute(&agent, request));
        Box::pin(async move { task.await? })
    }
}

fn execute(agent: &ureq::Agent, request: HttpRequest) -> Result<HttpResponse, TransportError> {
    let HttpRequest {
        method,
        path,
        query,
        headers,
        body,
    } = request;
    trace!(%method, %path, "executing request");

    let mut response = match method {
        HttpMethod::Get => decorate(agent.get(&path), &query, &headers).call(),
        HttpMethod::Delete => decorate(agent.delete(&path), &query, &headers).call(),
        HttpMethod::Post => {
            let builder = decorate(agent.post(&path), &query, &headers);
            match body {
                Some(body) => builder.send(body.as_bytes()),
                None => builder.send_empty(),
            }
        }
        HttpMethod::Put => {
            let builder = decorate(agent.put(&path), &query, &headers);
            match body {
                Some(body) => builder.send(body.as_bytes()),
                None => builder.send_empty(),
            }
        }
    }?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    let body = response.body_mut().read_to_string()?;

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}

fn decorate<B>(
    mut builder: ureq::RequestBuilder<B>,
    query: &[(String, String)],
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (key, value) in query {
        builder = builder.query(key, value);
    }
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
