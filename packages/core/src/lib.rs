//! # recordform-core
//!
//! The UI-independent half of recordform: a flat, ordered [`Record`] of
//! tagged [`FieldValue`]s, the [`RecordSource`] capability used to read and
//! replace it, and the two stateful components built on top.
//!
//! - [`Loader`] performs one read of the fixed record and reports
//!   loading/error/record state.
//! - [`Editor`] keeps a reference copy and a draft, derives the [`Form`],
//!   and submits the draft as a full replacement.
//!
//! ```ignore
//! use std::sync::Arc;
//! use recordform_core::{Editor, Loader};
//!
//! let mut loader = Loader::new(source.clone());
//! loader.activate();
//!
//! if let Some(mut editor) = loader.editor() {
//!     editor.set_field("width", "40")?;
//!     editor.submit()?;
//! }
//! ```

pub mod editor;
pub mod error;
pub mod form;
pub mod loader;
pub mod record;
pub mod source;
pub mod value;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use editor::{Editor, View, SUCCESS_MESSAGE};
pub use error::{EditError, FetchError, SubmitError};
pub use form::{Form, FormField, InputKind};
pub use loader::{LoadStatus, Loader};
pub use record::{Record, RecordId, FIXED_RECORD_ID, ID_FIELD, NAME_FIELD};
pub use source::{RecordSource, SharedSource};
pub use value::FieldValue;
