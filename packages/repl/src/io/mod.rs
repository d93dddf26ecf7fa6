//! The seam between the REPL core and whatever shows it to the user.
//!
//! [`crate::ReplCore`] only talks to an [`IoHost`]. The terminal host lives
//! in [`crate::host`]; tests drive the core through [`TestHost`].

pub mod types;

#[cfg(test)]
pub mod test_host;

pub use types::*;

#[cfg(test)]
pub use test_host::TestHost;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(String),
}

/// Input and output for one form session.
///
/// Each turn of the loop calls [`IoHost::wait_for_input`], then takes
/// either a signal or a line, never both.
pub trait IoHost {
    /// Block until a line or a signal is available. Test hosts return at once.
    fn wait_for_input(&mut self) -> Result<(), IoError>;

    fn read_input(&mut self) -> Result<Option<InputLine>, IoError>;

    /// Ctrl+C or Ctrl+D, if that is what ended the wait.
    fn read_signal(&mut self) -> Result<Option<Signal>, IoError>;

    fn write_output(&mut self, output: Output) -> Result<(), IoError>;

    /// Prompt to show for the next line.
    fn write_prompt(&mut self, config: PromptConfig) -> Result<(), IoError>;

    /// Field names of the loaded record, offered after `set`.
    fn set_field_names(&mut self, _fields: Vec<String>) -> Result<(), IoError> {
        Ok(())
    }

    fn flush(&mut self) -> Result<(), IoError> {
        Ok(())
    }
}
