//! # recordform-http
//!
//! The HTTP side of recordform: a [`RecordSource`] that maps reads to
//! `GET <base>/<id>` and replaces to `PUT <base>/<id>` with a JSON body.
//!
//! ```ignore
//! use std::sync::Arc;
//! use recordform_http::{collection_url, HttpRecordSource, ReqwestExecutor};
//!
//! let base = collection_url("localhost:3000")?;
//! let source = HttpRecordSource::new(base, ReqwestExecutor::new(None)?);
//!
//! let record = source.fetch(&RecordId::fixed())?;
//! ```
//!
//! [`RecordSource`]: recordform_core::RecordSource

pub mod error;
pub mod executor;
pub mod source;
pub mod types;

pub use error::Error;
pub use executor::{HttpExecutor, ReqwestExecutor};
pub use source::{collection_url, HttpRecordSource, COLLECTION_PATH};
pub use types::{HttpRequest, HttpResponse, Method};
