//! [`RecordSource`] over a REST collection.

use serde_json::Value as JsonValue;
use tracing::debug;
use url::Url;

use recordform_core::{FetchError, Record, RecordId, RecordSource};

use crate::error::Error;
use crate::executor::{HttpExecutor, ReqwestExecutor};
use crate::types::{HttpRequest, HttpResponse};

/// Path segment of the collection under the API host.
pub const COLLECTION_PATH: &str = "doors";

/// Build the collection URL `http://<host>/doors`.
///
/// `host` is `host[:port]`, optionally with an explicit `http://` or
/// `https://` scheme and a path prefix.
pub fn collection_url(host: &str) -> Result<Url, Error> {
    let host = host.trim().trim_end_matches('/');
    if host.is_empty() {
        return Err(Error::InvalidUrl {
            message: "API host is empty".to_string(),
        });
    }

    let base = if host.starts_with("http://") || host.starts_with("https://") {
        Url::parse(host)?
    } else {
        Url::parse(&format!("http://{}", host))?
    };

    let mut url = base;
    url.path_segments_mut()
        .map_err(|_| Error::InvalidUrl {
            message: format!("'{}' cannot be used as a base URL", host),
        })?
        .pop_if_empty()
        .push(COLLECTION_PATH);

    Ok(url)
}

/// Reads with `GET <base>/<id>`, replaces with `PUT <base>/<id>`.
pub struct HttpRecordSource<E: HttpExecutor = ReqwestExecutor> {
    base_url: Url,
    executor: E,
}

impl<E: HttpExecutor> HttpRecordSource<E> {
    pub fn new(base_url: Url, executor: E) -> Self {
        Self { base_url, executor }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `<base>/<id>`, with the id percent-encoded as one segment.
    pub fn record_url(&self, id: &RecordId) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::Transport(format!("invalid base URL '{}'", self.base_url)))?
            .pop_if_empty()
            .push(id.as_str());
        Ok(url)
    }

    fn send(&self, request: HttpRequest) -> Result<Record, FetchError> {
        let response = self
            .executor
            .execute(&request)
            .map_err(FetchError::Transport)?;

        if !response.is_success() {
            return Err(FetchError::Status {
                status: response.status,
                reason: response.status_text,
            });
        }

        decode(response)
    }
}

impl HttpRecordSource<ReqwestExecutor> {
    /// A source for `http://<host>/doors` using reqwest without a timeout.
    pub fn for_host(host: &str) -> Result<Self, Error> {
        Ok(Self::new(collection_url(host)?, ReqwestExecutor::new(None)?))
    }
}

/// Parse the raw body once; anything but a JSON object with an `id` fails.
fn decode(response: HttpResponse) -> Result<Record, FetchError> {
    let body = serde_json::from_str::<JsonValue>(&response.body)
        .map_err(|e| FetchError::Decode(e.to_string()))?;
    Record::from_json(body)
}

impl<E: HttpExecutor> RecordSource for HttpRecordSource<E> {
    fn fetch(&self, id: &RecordId) -> Result<Record, FetchError> {
        let url = self.record_url(id)?;
        debug!(%url, "fetching record");
        self.send(HttpRequest::get(url.as_str()))
    }

    fn replace(&self, id: &RecordId, record: &Record) -> Result<Record, FetchError> {
        let url = self.record_url(id)?;
        debug!(%url, fields = record.len(), "replacing record");
        let request = HttpRequest::put(url.as_str())
            .with_header("Content-Type", "application/json")
            .with_json_body(record.to_json());
        self.send(request)
    }
}
