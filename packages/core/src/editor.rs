//! The editing session: reference copy, draft, and the submit/reset cycle.
//!
//! State transitions:
//!
//! ```text
//! idle -> loading(fetch) -> { ready, errored }
//! ready -> editing -> submitting -> { ready(success), ready(errored) }
//! ```
//!
//! A single `loading` flag covers both the initial fetch and submits. The
//! render guard in [`Editor::view`] tells the two apart by whether a record
//! is present.

use tracing::{debug, error, info, warn};

use crate::error::{EditError, SubmitError};
use crate::form::Form;
use crate::record::{Record, RecordId, ID_FIELD};
use crate::source::SharedSource;

/// Message set after a successful submit.
pub const SUCCESS_MESSAGE: &str = "Item updated successfully!";

/// What the editor has to show right now.
#[derive(Debug, Clone, PartialEq)]
pub enum View<'a> {
    /// Nothing loaded yet and a fetch is pending.
    Loading,
    /// Nothing loaded and the fetch failed. Only the message is shown.
    Failed(&'a str),
    /// A record is loaded. Messages accompany the form.
    Ready {
        form: Form,
        error: Option<&'a str>,
        success: Option<&'a str>,
        reference: &'a Record,
    },
    /// Not loading, no error, no record.
    Empty,
}

/// A single editing session over one record.
pub struct Editor {
    source: SharedSource,
    reference: Option<Record>,
    draft: Option<Record>,
    loading: bool,
    error: Option<String>,
    success: Option<String>,
}

impl Editor {
    /// Create a session. A pre-fetched record is adopted as both reference
    /// and draft; without one the session starts loading and waits for
    /// [`Editor::load`].
    pub fn new(source: SharedSource, prefetched: Option<Record>) -> Self {
        let loading = prefetched.is_none();
        Self {
            source,
            reference: prefetched.clone(),
            draft: prefetched,
            loading,
            error: None,
            success: None,
        }
    }

    /// [`Editor::new`] followed by [`Editor::load`].
    pub fn open(source: SharedSource, prefetched: Option<Record>) -> Self {
        let mut editor = Self::new(source, prefetched);
        editor.load();
        editor
    }

    /// Fetch the fixed record if none is held yet. No-op otherwise.
    pub fn load(&mut self) {
        if self.reference.is_some() {
            return;
        }

        self.loading = true;
        let id = RecordId::fixed();

        match self.source.fetch(&id) {
            Ok(record) => {
                info!(%id, fields = record.len(), "editor loaded record");
                self.reference = Some(record.clone());
                self.draft = Some(record);
            }
            Err(err) => {
                error!(%id, error = %err, "error fetching item");
                self.error = Some(format!("Error fetching data: {}", err));
            }
        }

        self.loading = false;
    }

    /// Set one draft field from raw input text.
    ///
    /// The text is coerced to the kind of the reference value. Only this
    /// field changes; `id` and keys outside the record are rejected.
    pub fn set_field(&mut self, key: &str, raw: &str) -> Result<(), EditError> {
        if key == ID_FIELD {
            warn!(key, "rejected edit of immutable field");
            return Err(EditError::ImmutableField(key.to_string()));
        }

        let (reference, draft) = match (&self.reference, &mut self.draft) {
            (Some(reference), Some(draft)) => (reference, draft),
            _ => return Err(EditError::NotLoaded),
        };

        let template = reference
            .get(key)
            .ok_or_else(|| EditError::UnknownField(key.to_string()))?;

        let value = template.coerce(key, raw).inspect_err(|err| {
            warn!(key, error = %err, "rejected edit");
        })?;

        debug!(key, %value, "draft field updated");
        draft.replace(key, value);
        Ok(())
    }

    /// Send the draft as a full replacement of the record.
    ///
    /// On success the server's response becomes both reference and draft.
    /// On failure the error message is set and both are left as they were.
    pub fn submit(&mut self) -> Result<(), SubmitError> {
        let (reference, draft) = match (&self.reference, &self.draft) {
            (Some(reference), Some(draft)) => (reference, draft),
            _ => return Err(SubmitError::NotLoaded),
        };
        if self.loading {
            return Err(SubmitError::Busy);
        }
        let id = reference.id().ok_or(SubmitError::MissingId)?;
        let body = draft.clone();

        self.loading = true;
        self.error = None;
        self.success = None;

        let result = self.source.replace(&id, &body);
        self.loading = false;

        match result {
            Ok(updated) => {
                info!(%id, "record updated");
                self.reference = Some(updated.clone());
                self.draft = Some(updated);
                self.success = Some(SUCCESS_MESSAGE.to_string());
                Ok(())
            }
            Err(err) => {
                error!(%id, error = %err, "error updating item");
                self.error = Some(format!("Error updating data: {}", err));
                Err(SubmitError::Remote(err))
            }
        }
    }

    /// Discard the draft, reverting to the last committed record.
    pub fn reset(&mut self) -> Result<(), EditError> {
        if self.loading {
            return Err(EditError::Busy);
        }
        let reference = self.reference.as_ref().ok_or(EditError::NotLoaded)?;
        self.draft = Some(reference.clone());
        Ok(())
    }

    pub fn reference(&self) -> Option<&Record> {
        self.reference.as_ref()
    }

    pub fn draft(&self) -> Option<&Record> {
        self.draft.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    /// True when the draft differs from the reference copy.
    pub fn is_dirty(&self) -> bool {
        self.reference != self.draft
    }

    /// The form for the current state, if a record is loaded.
    pub fn form(&self) -> Option<Form> {
        match (&self.reference, &self.draft) {
            (Some(reference), Some(draft)) => Some(Form::build(reference, draft, self.loading)),
            _ => None,
        }
    }

    pub fn view(&self) -> View<'_> {
        if self.loading && self.reference.is_none() {
            return View::Loading;
        }
        if let (Some(error), None) = (&self.error, &self.reference) {
            return View::Failed(error);
        }
        match (self.form(), &self.reference) {
            (Some(form), Some(reference)) => View::Ready {
                form,
                error: self.error(),
                success: self.success(),
                reference,
            },
            _ => View::Empty,
        }
    }
}
