//! Command-line and environment configuration.

use std::time::Duration;

use clap::Parser;
use url::Url;

use recordform_http::collection_url;

use crate::host::EditStyle;

/// recordform - Edit the door record of a REST API from the terminal
#[derive(Parser, Debug)]
#[command(name = "recordform")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// API host, `host[:port]`, optionally with an http:// or https:// scheme
    #[arg(long, env = "RECORDFORM_API_HOST")]
    pub api_host: String,

    /// Request timeout in seconds (no timeout when unset)
    #[arg(long, env = "RECORDFORM_TIMEOUT_SECS")]
    pub timeout: Option<u64>,

    /// Skip the loader and let the editor fetch the record itself
    #[arg(long)]
    pub self_fetch: bool,

    /// Force vi editing mode
    #[arg(long, conflicts_with = "emacs")]
    pub vi: bool,

    /// Force emacs editing mode
    #[arg(long)]
    pub emacs: bool,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid API host: {0}")]
    InvalidHost(#[from] recordform_http::Error),

    #[error("timeout must be at least one second")]
    ZeroTimeout,
}

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub collection_url: Url,
    pub timeout: Option<Duration>,
    pub self_fetch: bool,
    /// Forced by `--vi`/`--emacs`; detected from the environment otherwise.
    pub edit_mode: Option<EditStyle>,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let timeout = match cli.timeout {
            Some(0) => return Err(ConfigError::ZeroTimeout),
            Some(secs) => Some(Duration::from_secs(secs)),
            None => None,
        };

        let edit_mode = if cli.vi {
            Some(EditStyle::Vi)
        } else if cli.emacs {
            Some(EditStyle::Emacs)
        } else {
            None
        };

        Ok(Self {
            collection_url: collection_url(&cli.api_host)?,
            timeout,
            self_fetch: cli.self_fetch,
            edit_mode,
        })
    }
}
