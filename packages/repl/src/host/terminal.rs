//! Terminal host on top of Reedline.
//!
//! The form's commands are typed at a prompt showing the record label, with
//! completion of commands and field names, highlighting and a history file.

use std::borrow::Cow;
use std::io::{self, Write};
use std::path::PathBuf;

use nu_ansi_term::{Color, Style};
use reedline::{
    default_emacs_keybindings, default_vi_insert_keybindings, default_vi_normal_keybindings,
    ColumnarMenu, DefaultHinter, EditMode, Emacs, FileBackedHistory, KeyCode, KeyModifiers,
    Keybindings, MenuBuilder, Prompt, PromptEditMode, PromptHistorySearch,
    PromptHistorySearchStatus, PromptViMode, Reedline, ReedlineEvent, ReedlineMenu,
    Signal as ReedlineSignal, Vi,
};
use tracing::debug;

use crate::completer::{FieldNames, ReplCompleter};
use crate::highlighter::ReplHighlighter;
use crate::io::{InputLine, IoError, IoHost, Output, OutputStyle, PromptConfig, Signal};

const COMPLETION_MENU: &str = "completion_menu";
const HISTORY_SIZE: usize = 1000;

/// Which key map the line editor uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditStyle {
    Vi,
    Emacs,
}

impl EditStyle {
    /// Read the preference from the environment and the readline config.
    pub fn detect() -> Self {
        let explicit = std::env::var("RECORDFORM_EDIT_MODE").ok();
        let editors = [std::env::var("EDITOR").ok(), std::env::var("VISUAL").ok()];
        let inputrc_vi = inputrc_paths()
            .into_iter()
            .filter_map(|path| std::fs::read_to_string(path).ok())
            .any(|content| inputrc_selects_vi(&content));

        Self::choose(explicit.as_deref(), &editors, inputrc_vi)
    }

    /// `RECORDFORM_EDIT_MODE` decides when set; otherwise a vi-family
    /// editor or `set editing-mode vi` selects vi.
    fn choose(explicit: Option<&str>, editors: &[Option<String>], inputrc_vi: bool) -> Self {
        if let Some(mode) = explicit {
            return match mode.to_lowercase().as_str() {
                "vi" | "vim" => EditStyle::Vi,
                _ => EditStyle::Emacs,
            };
        }

        let vi_editor = editors.iter().flatten().any(|editor| {
            let editor = editor.to_lowercase();
            editor.contains("vim") || editor == "vi"
        });

        if vi_editor || inputrc_vi {
            EditStyle::Vi
        } else {
            EditStyle::Emacs
        }
    }

    fn edit_mode(self) -> Box<dyn EditMode> {
        match self {
            EditStyle::Vi => Box::new(Vi::new(
                vi_insert_keybindings(),
                default_vi_normal_keybindings(),
            )),
            EditStyle::Emacs => Box::new(Emacs::new(emacs_keybindings())),
        }
    }
}

fn completion_event() -> ReedlineEvent {
    ReedlineEvent::UntilFound(vec![
        ReedlineEvent::Menu(COMPLETION_MENU.to_string()),
        ReedlineEvent::MenuNext,
    ])
}

/// Emacs defaults plus Tab for the completion menu. Ctrl+D keeps its
/// default and ends the session.
fn emacs_keybindings() -> Keybindings {
    let mut keybindings = default_emacs_keybindings();
    keybindings.add_binding(KeyModifiers::NONE, KeyCode::Tab, completion_event());
    keybindings
}

fn vi_insert_keybindings() -> Keybindings {
    let mut keybindings = default_vi_insert_keybindings();
    keybindings.add_binding(KeyModifiers::NONE, KeyCode::Tab, completion_event());
    keybindings
}

fn inputrc_paths() -> Vec<PathBuf> {
    [
        std::env::var("INPUTRC").ok().map(PathBuf::from),
        dirs::home_dir().map(|home| home.join(".inputrc")),
        Some(PathBuf::from("/etc/inputrc")),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn inputrc_selects_vi(content: &str) -> bool {
    content.lines().map(str::trim).any(|line| {
        let mut words = line.split_whitespace();
        words.next() == Some("set")
            && words.next() == Some("editing-mode")
            && words.next() == Some("vi")
    })
}

fn history_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("recordform").join("history.txt"))
}

/// The history file, or `None` when it cannot be created.
fn open_history() -> Option<FileBackedHistory> {
    let path = history_path()?;
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            debug!(path = %parent.display(), error = %e, "no history directory");
            return None;
        }
    }
    match FileBackedHistory::with_file(HISTORY_SIZE, path) {
        Ok(history) => Some(history),
        Err(e) => {
            debug!(error = %e, "history disabled");
            None
        }
    }
}

fn build_line_editor(field_names: FieldNames, style: EditStyle) -> Reedline {
    let completion_menu = ColumnarMenu::default()
        .with_name(COMPLETION_MENU)
        .with_text_style(Style::new().fg(Color::Cyan))
        .with_selected_text_style(Style::new().fg(Color::Black).on(Color::Cyan).bold());

    let line_editor = Reedline::create()
        .with_completer(Box::new(ReplCompleter::new(field_names)))
        .with_highlighter(Box::new(ReplHighlighter::new()))
        .with_hinter(Box::new(
            DefaultHinter::default().with_style(Style::new().fg(Color::LightGray).dimmed()),
        ))
        .with_menu(ReedlineMenu::EngineCompleter(Box::new(completion_menu)))
        .with_edit_mode(style.edit_mode());

    match open_history() {
        Some(history) => line_editor.with_history(Box::new(history)),
        None => line_editor,
    }
}

/// Terminal host using Reedline for interactive I/O.
pub struct TerminalHost {
    line_editor: Reedline,
    pending_input: Option<InputLine>,
    pending_signal: Option<Signal>,
    prompt: FormPrompt,
    field_names: FieldNames,
}

impl TerminalHost {
    pub fn new(style: EditStyle) -> Self {
        let field_names = FieldNames::default();
        Self {
            line_editor: build_line_editor(field_names.clone(), style),
            pending_input: None,
            pending_signal: None,
            prompt: FormPrompt::default(),
            field_names,
        }
    }
}

impl IoHost for TerminalHost {
    fn wait_for_input(&mut self) -> Result<(), IoError> {
        match self.line_editor.read_line(&self.prompt) {
            Ok(ReedlineSignal::Success(line)) => self.pending_input = Some(InputLine { line }),
            Ok(ReedlineSignal::CtrlC) => self.pending_signal = Some(Signal::Interrupt),
            Ok(ReedlineSignal::CtrlD) => self.pending_signal = Some(Signal::Eof),
            Err(e) => return Err(IoError::Io(format!("Reedline error: {}", e))),
        }
        Ok(())
    }

    fn read_input(&mut self) -> Result<Option<InputLine>, IoError> {
        Ok(self.pending_input.take())
    }

    fn read_signal(&mut self) -> Result<Option<Signal>, IoError> {
        Ok(self.pending_signal.take())
    }

    fn write_output(&mut self, output: Output) -> Result<(), IoError> {
        println!("{}", style_output(&output));
        Ok(())
    }

    fn write_prompt(&mut self, config: PromptConfig) -> Result<(), IoError> {
        self.prompt = FormPrompt(config);
        Ok(())
    }

    fn set_field_names(&mut self, fields: Vec<String>) -> Result<(), IoError> {
        let mut names = self
            .field_names
            .write()
            .map_err(|_| IoError::Io("field name list poisoned".to_string()))?;
        *names = fields;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), IoError> {
        io::stdout().flush().map_err(|e| IoError::Io(e.to_string()))
    }
}

fn style_output(output: &Output) -> String {
    match output.style {
        OutputStyle::Normal => output.text.clone(),
        OutputStyle::Error => format!("{} {}", Color::Red.bold().paint("Error:"), output.text),
        OutputStyle::Info => Color::Cyan.paint(&output.text).to_string(),
    }
}

/// `<record label>[*]> `, the star marking unsubmitted edits.
#[derive(Debug, Default)]
struct FormPrompt(PromptConfig);

impl FormPrompt {
    fn label(&self) -> String {
        let PromptConfig {
            record_label,
            dirty,
        } = &self.0;

        if record_label.is_empty() {
            return Color::Yellow.paint("no record").to_string();
        }
        let label = Color::Blue.bold().paint(record_label.as_str()).to_string();
        if *dirty {
            format!("{}{}", label, Color::Red.bold().paint("*"))
        } else {
            label
        }
    }
}

impl Prompt for FormPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Owned(self.label())
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, edit_mode: PromptEditMode) -> Cow<'_, str> {
        let indicator = match edit_mode {
            PromptEditMode::Vi(PromptViMode::Normal) => Color::Blue.bold().paint("[N]>"),
            PromptEditMode::Vi(PromptViMode::Insert) => Color::Green.bold().paint("[I]>"),
            _ => Color::Green.bold().paint(">"),
        };
        Cow::Owned(format!("{} ", indicator))
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed(": ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        Cow::Owned(format!("({}reverse-search: {}) ", prefix, history_search.term))
    }
}
