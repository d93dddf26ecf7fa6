//! REPL command parsing and execution.
//!
//! Commands:
//! - `show` - Render the form
//! - `set <field> <value>` - Edit one draft field
//! - `submit` - Send the draft to the server
//! - `reset` - Revert the draft to the last committed record
//! - `original` / `draft` - Print a record as JSON
//! - `help` - Show help
//! - `exit` - Exit the REPL

use nu_ansi_term::{Color, Style};

use recordform_core::{Editor, SubmitError};

use crate::render::{format_json, render_view};

/// Result of executing a command
#[derive(Debug)]
pub enum CommandResult {
    /// Command succeeded, optionally with output to display
    Ok { display: Option<String> },
    /// Command failed with an error message
    Error(String),
    /// User requested to exit
    Exit,
    /// Show help
    Help,
}

impl CommandResult {
    fn ok_display(display: impl Into<String>) -> Self {
        CommandResult::Ok {
            display: Some(display.into()),
        }
    }

    fn ok_none() -> Self {
        CommandResult::Ok { display: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Show,
    Set,
    Submit,
    Reset,
    Original,
    Draft,
    Help,
    Exit,
}

/// One REPL command: its name, aliases and help text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub command: Command,
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub args: &'static str,
    /// Short description, shown next to completions.
    pub summary: &'static str,
    /// Line in `help`.
    pub help: &'static str,
}

impl CommandSpec {
    /// The name followed by its aliases.
    pub fn words(&self) -> impl Iterator<Item = &'static str> {
        std::iter::once(self.name).chain(self.aliases.iter().copied())
    }
}

/// Every command, in help and completion order.
pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        command: Command::Show,
        name: "show",
        aliases: &["form", "ls"],
        args: "",
        summary: "Show the form",
        help: "Show the form",
    },
    CommandSpec {
        command: Command::Set,
        name: "set",
        aliases: &["s"],
        args: "<field> <value>",
        summary: "Edit a field",
        help: "Edit a field of the draft",
    },
    CommandSpec {
        command: Command::Submit,
        name: "submit",
        aliases: &["save", "put"],
        args: "",
        summary: "Save the draft",
        help: "Save the draft to the server",
    },
    CommandSpec {
        command: Command::Reset,
        name: "reset",
        aliases: &[],
        args: "",
        summary: "Discard unsaved edits",
        help: "Discard unsaved edits",
    },
    CommandSpec {
        command: Command::Original,
        name: "original",
        aliases: &["ref"],
        args: "",
        summary: "Print the saved record",
        help: "Print the last saved record as JSON",
    },
    CommandSpec {
        command: Command::Draft,
        name: "draft",
        aliases: &[],
        args: "",
        summary: "Print the draft",
        help: "Print the draft as JSON",
    },
    CommandSpec {
        command: Command::Help,
        name: "help",
        aliases: &["?"],
        args: "",
        summary: "Show help",
        help: "Show this help message",
    },
    CommandSpec {
        command: Command::Exit,
        name: "exit",
        aliases: &["quit", "q"],
        args: "",
        summary: "Exit the REPL",
        help: "Exit the REPL",
    },
];

/// Find a command by name or alias, ignoring case.
pub fn lookup(word: &str) -> Option<&'static CommandSpec> {
    let word = word.to_lowercase();
    COMMANDS
        .iter()
        .find(|spec| spec.words().any(|candidate| candidate == word))
}

/// Parse and execute a command
pub fn execute(input: &str, editor: &mut Editor) -> CommandResult {
    let input = input.trim();

    if input.is_empty() {
        return CommandResult::ok_none();
    }

    // Parse command and arguments
    let mut parts = input.splitn(2, char::is_whitespace);
    let command = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("");

    let spec = match lookup(command) {
        Some(spec) => spec,
        None => {
            return CommandResult::Error(format!(
                "Unknown command: '{}'. Type 'help' for available commands.",
                command
            ))
        }
    };

    match spec.command {
        Command::Help => CommandResult::Help,
        Command::Exit => CommandResult::Exit,
        Command::Show => cmd_show(editor),
        Command::Set => cmd_set(args, editor),
        Command::Submit => cmd_submit(editor),
        Command::Reset => cmd_reset(editor),
        Command::Original => cmd_original(editor),
        Command::Draft => cmd_draft(editor),
    }
}

/// Format help text
pub fn format_help() -> String {
    let cmd_style = Style::new().bold().fg(Color::Cyan);
    let arg_style = Style::new().fg(Color::Yellow);
    let desc_style = Style::new().fg(Color::White);

    let mut help = String::new();
    help.push_str(&format!(
        "{}\n\n",
        Style::new().bold().paint("Item Update Form Commands")
    ));

    for spec in COMMANDS {
        if spec.command == Command::Help {
            help.push('\n');
        }
        let desc = if spec.aliases.is_empty() {
            spec.help.to_string()
        } else {
            format!("{} (alias: {})", spec.help, spec.aliases.join(", "))
        };
        help.push_str(&format!(
            "  {:<12} {:<20} {}\n",
            cmd_style.paint(spec.name),
            arg_style.paint(spec.args),
            desc_style.paint(desc)
        ));
    }

    help.push_str(&format!(
        "\n{}",
        Style::new()
            .italic()
            .paint("Values are checked against the field's type: numbers stay numbers, booleans take true/false.")
    ));

    help
}

fn cmd_show(editor: &mut Editor) -> CommandResult {
    CommandResult::ok_display(render_view(&editor.view()))
}

fn cmd_set(args: &str, editor: &mut Editor) -> CommandResult {
    let (key, value) = match parse_set_args(args) {
        Some(parsed) => parsed,
        None => return CommandResult::Error("Usage: set <field> <value>".to_string()),
    };

    match editor.set_field(key, value) {
        Ok(()) => CommandResult::ok_display(render_view(&editor.view())),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

fn cmd_submit(editor: &mut Editor) -> CommandResult {
    match editor.submit() {
        // A failed request is part of the form state; show it there.
        Ok(()) | Err(SubmitError::Remote(_)) => {
            CommandResult::ok_display(render_view(&editor.view()))
        }
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

fn cmd_reset(editor: &mut Editor) -> CommandResult {
    match editor.reset() {
        Ok(()) => CommandResult::ok_display(render_view(&editor.view())),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

fn cmd_original(editor: &mut Editor) -> CommandResult {
    match editor.reference() {
        Some(record) => CommandResult::ok_display(format_json(&record.to_json())),
        None => CommandResult::Error("No record loaded".to_string()),
    }
}

fn cmd_draft(editor: &mut Editor) -> CommandResult {
    match editor.draft() {
        Some(record) => CommandResult::ok_display(format_json(&record.to_json())),
        None => CommandResult::Error("No record loaded".to_string()),
    }
}

/// Split `set` arguments into a field name and the raw value.
///
/// The value is everything after the first run of whitespace, kept
/// verbatim so text fields can hold spaces. A missing value means empty.
fn parse_set_args(args: &str) -> Option<(&str, &str)> {
    let args = args.trim_start();
    if args.is_empty() {
        return None;
    }

    match args.find(char::is_whitespace) {
        Some(pos) => {
            let key = &args[..pos];
            let value = args[pos..].trim_start();
            Some((key, value))
        }
        None => Some((args, "")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::strip_ansi_codes;
    use recordform_core::testing::ScriptedSource;
    use recordform_core::{FetchError, FieldValue, Record, SUCCESS_MESSAGE};
    use serde_json::json;
    use std::sync::Arc;

    fn front_door() -> Record {
        Record::from_json(json!({"id": 1, "name": "Front Door", "width": 36, "locked": true}))
            .unwrap()
    }

    fn editor_with(source: ScriptedSource) -> (Arc<ScriptedSource>, Editor) {
        let source = Arc::new(source);
        let editor = Editor::new(source.clone(), Some(front_door()));
        (source, editor)
    }

    fn display(result: CommandResult) -> String {
        match result {
            CommandResult::Ok {
                display: Some(text),
            } => strip_ansi_codes(&text),
            other => panic!("expected output, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_set_args() {
        assert_eq!(parse_set_args("width 40"), Some(("width", "40")));
        assert_eq!(
            parse_set_args("name  Side Door "),
            Some(("name", "Side Door "))
        );
        assert_eq!(parse_set_args("name"), Some(("name", "")));
        assert_eq!(parse_set_args("   "), None);
        assert_eq!(parse_set_args(""), None);
    }

    #[test]
    fn show_renders_form() {
        let (_, mut editor) = editor_with(ScriptedSource::new());
        let text = display(execute("show", &mut editor));

        assert!(text.contains("Name:"));
        assert!(text.contains("Front Door"));
        assert!(text.contains("[number] 36"));
    }

    #[test]
    fn set_updates_draft_only() {
        let (_, mut editor) = editor_with(ScriptedSource::new());
        let text = display(execute("set name Side Door", &mut editor));

        assert!(text.contains("Side Door"));
        assert_eq!(
            editor.draft().unwrap().get("name"),
            Some(&FieldValue::from("Side Door"))
        );
        assert_eq!(editor.reference(), Some(&front_door()));
    }

    #[test]
    fn set_reports_rejected_edits() {
        let (_, mut editor) = editor_with(ScriptedSource::new());

        match execute("set id 7", &mut editor) {
            CommandResult::Error(msg) => assert!(msg.contains("cannot be edited")),
            other => panic!("expected error, got {:?}", other),
        }
        match execute("set width wide", &mut editor) {
            CommandResult::Error(msg) => assert!(msg.contains("expected a number")),
            other => panic!("expected error, got {:?}", other),
        }
        match execute("set", &mut editor) {
            CommandResult::Error(msg) => assert!(msg.starts_with("Usage")),
            other => panic!("expected error, got {:?}", other),
        }
        assert_eq!(editor.draft(), Some(&front_door()));
    }

    #[test]
    fn submit_shows_success() {
        let (source, mut editor) = editor_with(ScriptedSource::new());
        execute("set width 40", &mut editor);

        let text = display(execute("submit", &mut editor));

        assert!(text.contains(SUCCESS_MESSAGE));
        assert_eq!(source.calls().len(), 1);
        assert_eq!(
            editor.reference().unwrap().get("width"),
            Some(&FieldValue::from(40i64))
        );
    }

    #[test]
    fn submit_failure_is_shown_in_form() {
        let (_, mut editor) = editor_with(ScriptedSource::new().with_replace(Err(
            FetchError::Status {
                status: 500,
                reason: "Internal Server Error".to_string(),
            },
        )));

        let text = display(execute("save", &mut editor));

        assert!(text.contains("Error updating data: HTTP 500"));
        assert!(text.contains("Front Door"));
    }

    #[test]
    fn reset_reverts_draft() {
        let (_, mut editor) = editor_with(ScriptedSource::new());
        execute("set width 12", &mut editor);
        execute("reset", &mut editor);
        assert_eq!(editor.draft(), Some(&front_door()));
    }

    #[test]
    fn original_and_draft_print_json() {
        let (_, mut editor) = editor_with(ScriptedSource::new());
        execute("set width 40", &mut editor);

        let original = display(execute("original", &mut editor));
        let draft = display(execute("draft", &mut editor));

        assert!(original.contains("\"width\": 36"));
        assert!(draft.contains("\"width\": 40"));
    }

    #[test]
    fn commands_are_case_insensitive() {
        let (_, mut editor) = editor_with(ScriptedSource::new());
        assert!(matches!(execute("HELP", &mut editor), CommandResult::Help));
        assert!(matches!(execute("Quit", &mut editor), CommandResult::Exit));
    }

    #[test]
    fn unknown_command_is_an_error() {
        let (_, mut editor) = editor_with(ScriptedSource::new());
        match execute("frobnicate", &mut editor) {
            CommandResult::Error(msg) => assert!(msg.contains("frobnicate")),
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn empty_input_does_nothing() {
        let (_, mut editor) = editor_with(ScriptedSource::new());
        assert!(matches!(
            execute("   ", &mut editor),
            CommandResult::Ok { display: None }
        ));
    }

    #[test]
    fn lookup_resolves_aliases() {
        assert_eq!(lookup("ls").map(|spec| spec.name), Some("show"));
        assert_eq!(lookup("PUT").map(|spec| spec.name), Some("submit"));
        assert_eq!(lookup("?").map(|spec| spec.name), Some("help"));
        assert!(lookup("write").is_none());
    }

    #[test]
    fn command_words_are_unique() {
        let mut words: Vec<&str> = COMMANDS.iter().flat_map(|spec| spec.words()).collect();
        let total = words.len();
        words.sort_unstable();
        words.dedup();
        assert_eq!(words.len(), total);
    }

    #[test]
    fn every_command_dispatches() {
        for spec in COMMANDS {
            for word in spec.words() {
                let (_, mut editor) = editor_with(ScriptedSource::new());
                let input = if spec.command == Command::Set {
                    format!("{} width 40", word)
                } else {
                    word.to_string()
                };
                assert!(
                    !matches!(execute(&input, &mut editor), CommandResult::Error(_)),
                    "{} failed",
                    input
                );
            }
        }
    }

    #[test]
    fn help_lists_every_alias() {
        let help = strip_ansi_codes(&format_help());
        for word in COMMANDS.iter().flat_map(|spec| spec.words()) {
            assert!(help.contains(word), "help is missing {}", word);
        }
    }

    #[test]
    fn help_lists_every_primary_command() {
        let help = strip_ansi_codes(&format_help());
        for cmd in ["show", "set", "submit", "reset", "original", "draft", "help", "exit"] {
            assert!(help.contains(cmd), "help is missing {}", cmd);
        }
    }
}
