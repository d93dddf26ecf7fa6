//! Sending requests: the [`HttpExecutor`] seam and its reqwest transport.
//!
//! [`ReqwestExecutor`] is what the binary talks to the API with. Unit tests
//! swap in `mock::MockExecutor` to script responses without a server.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::debug;

use crate::types::{HttpRequest, HttpResponse};

/// Sends one request and returns whatever came back.
pub trait HttpExecutor: Send + Sync {
    /// Execute an HTTP request and return the response.
    ///
    /// Returns `Err` with a message if no response was received. Non-2xx
    /// responses are `Ok`; judging the status is the caller's job.
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, String>;
}

/// Blocking reqwest client; the transport used against a real API.
pub struct ReqwestExecutor {
    client: Client,
}

impl ReqwestExecutor {
    /// Create a new executor. `None` leaves requests without a timeout.
    pub fn new(timeout: Option<Duration>) -> Result<Self, crate::Error> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client })
    }
}

impl HttpExecutor for ReqwestExecutor {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, String> {
        let method: http::Method = request.method.into();

        let mut headers = HeaderMap::new();
        for (name, value) in &request.headers {
            let header_name = HeaderName::try_from(name.as_str()).map_err(|e| e.to_string())?;
            let header_value = HeaderValue::try_from(value.as_str()).map_err(|e| e.to_string())?;
            headers.insert(header_name, header_value);
        }

        debug!(method = %method, url = %request.url, "sending request");

        let mut req_builder = self.client.request(method, &request.url);
        req_builder = req_builder.headers(headers);

        if let Some(body) = &request.body {
            req_builder = req_builder.json(body);
        }

        let response = req_builder.send().map_err(|e| e.to_string())?;

        let status = response.status().as_u16();
        let status_text = response
            .status()
            .canonical_reason()
            .unwrap_or("Unknown")
            .to_string();

        let body = response.text().map_err(|e| e.to_string())?;

        debug!(status, bytes = body.len(), "received response");

        Ok(HttpResponse {
            status,
            status_text,
            body,
        })
    }
}
