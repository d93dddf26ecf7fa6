//! Platform-independent REPL core.
//!
//! This module contains the main REPL loop logic: load the record, then
//! dispatch commands against one [`Editor`] until the user leaves.

use tracing::debug;

use recordform_core::{Editor, LoadStatus, Loader, SharedSource};

use crate::commands::{self, CommandResult};
use crate::io::{ExitReason, IoError, IoHost, Output, PromptConfig, Signal};
use crate::render::render_view;

/// The platform-independent REPL core.
pub struct ReplCore {
    source: SharedSource,
    self_fetch: bool,
    editor: Option<Editor>,
}

impl ReplCore {
    /// Create a REPL core reading and writing through `source`.
    pub fn new(source: SharedSource) -> Self {
        Self {
            source,
            self_fetch: false,
            editor: None,
        }
    }

    /// Skip the loader and let the editor fetch its own record.
    pub fn with_self_fetch(mut self, self_fetch: bool) -> Self {
        self.self_fetch = self_fetch;
        self
    }

    /// Run the REPL loop, reading/writing through the provided I/O host.
    pub fn run(&mut self, io: &mut impl IoHost) -> Result<ExitReason, IoError> {
        self.write_banner(io)?;
        io.write_output(Output::info("Loading..."))?;
        io.flush()?;

        let editor = match self.open_editor(io)? {
            Some(editor) => editor,
            None => {
                io.flush()?;
                return Ok(ExitReason::LoadFailed);
            }
        };

        if let Some(form) = editor.form() {
            io.set_field_names(form.keys().map(str::to_string).collect())?;
        }
        io.write_output(Output::normal(render_view(&editor.view())))?;
        let editor = self.editor.insert(editor);

        loop {
            io.write_prompt(prompt_for(editor))?;
            io.flush()?;
            io.wait_for_input()?;

            if let Some(signal) = io.read_signal()? {
                match signal {
                    Signal::Eof => {
                        io.write_output(Output::info("Goodbye!"))?;
                        io.flush()?;
                        return Ok(ExitReason::Eof);
                    }
                    Signal::Interrupt => {
                        io.write_output(Output::info("^C (use 'exit' to quit)"))?;
                        continue;
                    }
                }
            }

            let input = match io.read_input()? {
                Some(input) => input,
                None => continue,
            };

            match commands::execute(&input.line, editor) {
                CommandResult::Ok { display: None } => {}
                CommandResult::Ok {
                    display: Some(output),
                } => {
                    io.write_output(Output::normal(output))?;
                }
                CommandResult::Error(msg) => {
                    io.write_output(Output::error(msg))?;
                }
                CommandResult::Help => {
                    io.write_output(Output::normal(commands::format_help()))?;
                }
                CommandResult::Exit => {
                    io.write_output(Output::info("Goodbye!"))?;
                    io.flush()?;
                    return Ok(ExitReason::UserExit);
                }
            }
        }
    }

    /// The editing session, once a record has been loaded.
    pub fn editor(&self) -> Option<&Editor> {
        self.editor.as_ref()
    }

    /// Produce an editor holding the record, or report why there is none.
    fn open_editor(&self, io: &mut impl IoHost) -> Result<Option<Editor>, IoError> {
        if self.self_fetch {
            debug!("editor fetching its own record");
            let editor = Editor::open(self.source.clone(), None);
            if editor.reference().is_none() {
                io.write_output(Output::normal(render_view(&editor.view())))?;
                return Ok(None);
            }
            return Ok(Some(editor));
        }

        let mut loader = Loader::new(self.source.clone());
        loader.activate();

        match loader.status() {
            LoadStatus::Loaded(_) => Ok(loader.editor()),
            LoadStatus::Failed(message) => {
                io.write_output(Output::error(message))?;
                Ok(None)
            }
            LoadStatus::Loading => Ok(None),
        }
    }

    fn write_banner(&self, io: &mut impl IoHost) -> Result<(), IoError> {
        io.write_output(Output::info(BANNER))
    }
}

/// The record's name, falling back to its id.
fn prompt_for(editor: &Editor) -> PromptConfig {
    let record_label = editor
        .reference()
        .map(|record| {
            let name = record.name().map(|name| name.to_string()).unwrap_or_default();
            if name.trim().is_empty() {
                record
                    .id()
                    .map(|id| format!("#{}", id))
                    .unwrap_or_default()
            } else {
                name
            }
        })
        .unwrap_or_default();

    PromptConfig {
        record_label,
        dirty: editor.is_dirty(),
    }
}

const BANNER: &str = "Item Update Form\n\nType 'help' for available commands, 'exit' to quit.";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{OutputStyle, TestHost};
    use crate::render::strip_ansi_codes;
    use recordform_core::testing::{ScriptedSource, SourceCall};
    use recordform_core::{FetchError, FieldValue, Record, RecordId, SUCCESS_MESSAGE};
    use serde_json::json;
    use std::sync::Arc;

    fn front_door() -> Record {
        Record::from_json(json!({"id": 1, "name": "Front Door", "width": 36, "locked": true}))
            .unwrap()
    }

    fn loaded_source() -> Arc<ScriptedSource> {
        Arc::new(ScriptedSource::new().with_fetch(Ok(front_door())))
    }

    fn plain_output(host: &TestHost) -> String {
        strip_ansi_codes(&host.output_text())
    }

    #[test]
    fn test_exit_command() {
        let mut core = ReplCore::new(loaded_source());
        let mut host = TestHost::new();
        host.queue_input("exit");

        let result = core.run(&mut host);

        assert!(matches!(result, Ok(ExitReason::UserExit)));
        assert!(host.output().iter().any(|o| o.text.contains("Goodbye")));
    }

    #[test]
    fn test_eof_signal() {
        let mut core = ReplCore::new(loaded_source());
        let mut host = TestHost::new();
        host.queue_signal(Signal::Eof);

        let result = core.run(&mut host);

        assert!(matches!(result, Ok(ExitReason::Eof)));
    }

    #[test]
    fn interrupt_prints_hint_and_continues() {
        let mut core = ReplCore::new(loaded_source());
        let mut host = TestHost::new();
        host.queue_signal(Signal::Interrupt);
        host.queue_input("exit");

        let result = core.run(&mut host);

        assert!(matches!(result, Ok(ExitReason::UserExit)));
        assert!(host
            .output_with_style(OutputStyle::Info)
            .iter()
            .any(|text| text.contains("use 'exit'")));
    }

    #[test]
    fn startup_shows_banner_and_form() {
        let mut core = ReplCore::new(loaded_source());
        let mut host = TestHost::new();

        core.run(&mut host).unwrap();

        let text = plain_output(&host);
        assert!(text.contains("Item Update Form"));
        assert!(text.contains("Loading..."));
        assert!(text.contains("Update Item"));
        assert!(text.contains("Front Door"));
        assert!(text.contains("Original Item Data"));
        assert_eq!(host.field_names(), ["name", "width", "locked"]);
    }

    #[test]
    fn load_failure_exits_without_a_form() {
        let source = Arc::new(ScriptedSource::new().with_fetch(Err(FetchError::Status {
            status: 404,
            reason: "Not Found".to_string(),
        })));
        let mut core = ReplCore::new(source);
        let mut host = TestHost::new();
        host.queue_input("show");

        let result = core.run(&mut host);

        assert!(matches!(result, Ok(ExitReason::LoadFailed)));
        assert_eq!(host.errors(), vec!["HTTP 404 Not Found"]);
        assert!(core.editor().is_none());
        assert!(!plain_output(&host).contains("Update Item"));
    }

    #[test]
    fn self_fetch_failure_reports_editor_error() {
        let source = Arc::new(
            ScriptedSource::new().with_fetch(Err(FetchError::Transport(
                "connection refused".to_string(),
            ))),
        );
        let mut core = ReplCore::new(source).with_self_fetch(true);
        let mut host = TestHost::new();

        let result = core.run(&mut host);

        assert!(matches!(result, Ok(ExitReason::LoadFailed)));
        assert!(plain_output(&host).contains("Error fetching data: connection refused"));
    }

    #[test]
    fn self_fetch_reads_fixed_record_once() {
        let source = loaded_source();
        let mut core = ReplCore::new(source.clone()).with_self_fetch(true);
        let mut host = TestHost::new();

        core.run(&mut host).unwrap();

        assert_eq!(source.calls(), vec![SourceCall::Fetch(RecordId::fixed())]);
        assert_eq!(core.editor().unwrap().reference(), Some(&front_door()));
    }

    #[test]
    fn edit_and_submit_session() {
        let source = loaded_source();
        let mut core = ReplCore::new(source.clone());
        let mut host = TestHost::new();
        host.queue_inputs(["set width 40", "submit", "exit"]);

        let result = core.run(&mut host);

        assert!(matches!(result, Ok(ExitReason::UserExit)));
        assert!(plain_output(&host).contains(SUCCESS_MESSAGE));

        let calls = source.calls();
        assert_eq!(calls.len(), 2);
        match &calls[1] {
            SourceCall::Replace(id, body) => {
                assert_eq!(id.as_str(), "1");
                assert_eq!(body.get("width"), Some(&FieldValue::from(40i64)));
            }
            other => panic!("expected replace, got {:?}", other),
        }
        assert!(!core.editor().unwrap().is_dirty());
    }

    #[test]
    fn prompt_tracks_label_and_dirty_flag() {
        let mut core = ReplCore::new(loaded_source());
        let mut host = TestHost::new();
        host.queue_input("set name Side Door");

        core.run(&mut host).unwrap();

        let prompt = host.last_prompt().unwrap();
        assert_eq!(prompt.record_label, "Front Door");
        assert!(prompt.dirty);
    }

    #[test]
    fn prompt_falls_back_to_id() {
        let record = Record::from_json(json!({"id": 1, "width": 36})).unwrap();
        let source = Arc::new(ScriptedSource::new().with_fetch(Ok(record)));
        let mut core = ReplCore::new(source);
        let mut host = TestHost::new();

        core.run(&mut host).unwrap();

        assert_eq!(host.last_prompt().unwrap().record_label, "#1");
    }

    #[test]
    fn rejected_edits_are_errors() {
        let mut core = ReplCore::new(loaded_source());
        let mut host = TestHost::new();
        host.queue_inputs(["set id 9", "set color red", "frobnicate"]);

        core.run(&mut host).unwrap();

        assert_eq!(host.errors().len(), 3);
        assert_eq!(core.editor().unwrap().draft(), Some(&front_door()));
    }
}
