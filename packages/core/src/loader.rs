//! One-shot loading of the fixed record.

use tracing::{error, info};

use crate::editor::Editor;
use crate::record::{Record, RecordId};
use crate::source::SharedSource;

/// What a [`Loader`] currently has to show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoadStatus<'a> {
    Loading,
    Failed(&'a str),
    Loaded(&'a Record),
}

/// Reads the record with the fixed id, once per activation.
pub struct Loader {
    source: SharedSource,
    id: RecordId,
    loading: bool,
    error: Option<String>,
    record: Option<Record>,
}

impl Loader {
    /// A loader that has not run yet. It reports `Loading` until activated.
    pub fn new(source: SharedSource) -> Self {
        Self {
            source,
            id: RecordId::fixed(),
            loading: true,
            error: None,
            record: None,
        }
    }

    /// Perform exactly one read. Any failure becomes the error message;
    /// there are no retries.
    pub fn activate(&mut self) {
        self.loading = true;
        self.error = None;
        self.record = None;

        match self.source.fetch(&self.id) {
            Ok(record) => {
                info!(id = %self.id, fields = record.len(), "loaded record");
                self.record = Some(record);
            }
            Err(err) => {
                error!(id = %self.id, error = %err, "error fetching record");
                self.error = Some(err.to_string());
            }
        }

        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn record(&self) -> Option<&Record> {
        self.record.as_ref()
    }

    pub fn status(&self) -> LoadStatus<'_> {
        if self.loading {
            LoadStatus::Loading
        } else if let Some(error) = &self.error {
            LoadStatus::Failed(error)
        } else if let Some(record) = &self.record {
            LoadStatus::Loaded(record)
        } else {
            LoadStatus::Loading
        }
    }

    /// An editor seeded with the loaded record, sharing this loader's
    /// source. `None` until a load has succeeded.
    pub fn editor(&self) -> Option<Editor> {
        self.record
            .clone()
            .map(|record| Editor::new(self.source.clone(), Some(record)))
    }
}
