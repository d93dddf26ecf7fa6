//! # recordform-repl
//!
//! An interactive terminal form for editing one record of a REST API.
//!
//! The record with id 1 is read from `http://<host>/doors/1`, shown as a
//! form, edited field by field and written back with a `PUT`.
//!
//! ## Features
//!
//! - Typed edits: numeric fields only accept numbers
//! - Tab completion for commands and field names
//! - Syntax highlighting for commands
//! - Vi mode support (detected from EDITOR, .inputrc, or RECORDFORM_EDIT_MODE)
//! - Command history
//!
//! ## Usage
//!
//! ```bash
//! # Run the REPL
//! recordform --api-host localhost:8080
//!
//! # Inside the REPL:
//! > show
//! > set name Back Door
//! > set width 40
//! > submit
//! ```

pub mod commands;
pub mod completer;
pub mod config;
pub mod highlighter;
pub mod host;
pub mod io;
pub mod logging;
pub mod render;
pub mod repl;

use std::sync::Arc;

use recordform_http::{HttpRecordSource, ReqwestExecutor};

pub use config::{Cli, Config, ConfigError};
pub use io::ExitReason;
pub use repl::ReplCore;

use host::{EditStyle, TerminalHost};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Http(#[from] recordform_http::Error),

    #[error(transparent)]
    Io(#[from] io::IoError),
}

/// Run the interactive form against the configured API on the terminal.
pub fn run(config: &Config) -> Result<ExitReason, Error> {
    let executor = ReqwestExecutor::new(config.timeout)?;
    let source = Arc::new(HttpRecordSource::new(config.collection_url.clone(), executor));

    let style = config.edit_mode.unwrap_or_else(EditStyle::detect);
    let mut host = TerminalHost::new(style);
    let mut core = ReplCore::new(source).with_self_fetch(config.self_fetch);
    Ok(core.run(&mut host)?)
}
