//! Scripted record source for tests.
//!
//! Enabled for this crate's own tests and, through the `test-utils`
//! feature, for downstream crates.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::error::FetchError;
use crate::record::{Record, RecordId};
use crate::source::RecordSource;

/// A call observed by [`ScriptedSource`].
#[derive(Debug, Clone, PartialEq)]
pub enum SourceCall {
    Fetch(RecordId),
    Replace(RecordId, Record),
}

/// A [`RecordSource`] that replays queued results and records every call.
///
/// When the fetch queue is empty, fetches fail with a transport error.
/// When the replace queue is empty, replaces echo the submitted record.
#[derive(Clone, Default)]
pub struct ScriptedSource {
    fetches: Arc<Mutex<VecDeque<Result<Record, FetchError>>>>,
    replaces: Arc<Mutex<VecDeque<Result<Record, FetchError>>>>,
    calls: Arc<Mutex<Vec<SourceCall>>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the result of the next unanswered fetch.
    pub fn with_fetch(self, result: Result<Record, FetchError>) -> Self {
        self.fetches.lock().unwrap().push_back(result);
        self
    }

    /// Queue the result of the next unanswered replace.
    pub fn with_replace(self, result: Result<Record, FetchError>) -> Self {
        self.replaces.lock().unwrap().push_back(result);
        self
    }

    /// All calls so far, oldest first.
    pub fn calls(&self) -> Vec<SourceCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl RecordSource for ScriptedSource {
    fn fetch(&self, id: &RecordId) -> Result<Record, FetchError> {
        self.calls
            .lock()
            .unwrap()
            .push(SourceCall::Fetch(id.clone()));

        self.fetches
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Transport("no scripted response".to_string())))
    }

    fn replace(&self, id: &RecordId, record: &Record) -> Result<Record, FetchError> {
        self.calls
            .lock()
            .unwrap()
            .push(SourceCall::Replace(id.clone(), record.clone()));

        self.replaces
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(record.clone()))
    }
}
