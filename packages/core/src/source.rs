//! The record source capability shared by [`Loader`](crate::Loader) and
//! [`Editor`](crate::Editor).

use std::sync::Arc;

use crate::error::FetchError;
use crate::record::{Record, RecordId};

/// Reads and replaces single records by id.
///
/// Implementations collapse every failure into a [`FetchError`]; callers do
/// not retry.
pub trait RecordSource: Send + Sync {
    /// Read the record with the given id.
    fn fetch(&self, id: &RecordId) -> Result<Record, FetchError>;

    /// Replace the record with the given id wholesale, returning the
    /// server's representation of the result.
    fn replace(&self, id: &RecordId, record: &Record) -> Result<Record, FetchError>;
}

/// A record source shared between components.
pub type SharedSource = Arc<dyn RecordSource>;

impl<S: RecordSource + ?Sized> RecordSource for Arc<S> {
    fn fetch(&self, id: &RecordId) -> Result<Record, FetchError> {
        (**self).fetch(id)
    }

    fn replace(&self, id: &RecordId, record: &Record) -> Result<Record, FetchError> {
        (**self).replace(id, record)
    }
}
