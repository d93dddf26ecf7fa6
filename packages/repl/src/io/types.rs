//! Messages exchanged between the REPL core and its host.

/// A line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLine {
    pub line: String,
}

/// A key signal from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Ctrl+C: abandon the current line.
    Interrupt,
    /// Ctrl+D or end of input: leave the form.
    Eof,
}

/// One block of text for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub text: String,
    pub style: OutputStyle,
}

impl Output {
    /// Text that is already styled, such as a rendered form.
    pub fn normal(text: impl Into<String>) -> Self {
        Self::styled(text, OutputStyle::Normal)
    }

    /// A failed command or load. Hosts prefix it with `Error:`.
    pub fn error(text: impl Into<String>) -> Self {
        Self::styled(text, OutputStyle::Error)
    }

    /// Banner, progress and goodbye lines.
    pub fn info(text: impl Into<String>) -> Self {
        Self::styled(text, OutputStyle::Info)
    }

    fn styled(text: impl Into<String>, style: OutputStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputStyle {
    #[default]
    Normal,
    Error,
    Info,
}

/// What the prompt shows before the next line is read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptConfig {
    /// Label of the record being edited (its name, or `#<id>`).
    pub record_label: String,
    /// The draft has edits that were not submitted.
    pub dirty: bool,
}

/// Why [`crate::ReplCore::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// `exit`, `quit` or `q`.
    UserExit,
    /// Ctrl+D or the input ran out.
    Eof,
    /// The record could not be loaded, so there was nothing to edit.
    LoadFailed,
}
