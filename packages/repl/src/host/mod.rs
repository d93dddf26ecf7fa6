//! Host implementations for the REPL.
//!
//! The terminal host uses Reedline for interactive terminal I/O; tests use
//! [`crate::io`]'s in-memory host instead.

pub mod terminal;

pub use terminal::{EditStyle, TerminalHost};
