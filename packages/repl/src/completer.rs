use std::sync::{Arc, RwLock};

use reedline::{Completer, Span, Suggestion};

use crate::commands::{lookup, Command, CommandSpec, COMMANDS};

/// Field names shared between the host and its completer.
pub type FieldNames = Arc<RwLock<Vec<String>>>;

/// Command and field-name completer for the REPL
pub struct ReplCompleter {
    commands: &'static [CommandSpec],
    fields: FieldNames,
}

impl ReplCompleter {
    pub fn new(fields: FieldNames) -> Self {
        Self {
            commands: COMMANDS,
            fields,
        }
    }

    fn suggestion(value: &str, description: String, span: Span) -> Suggestion {
        Suggestion {
            value: value.to_string(),
            description: Some(description),
            style: None,
            extra: None,
            span,
            append_whitespace: true,
            match_indices: None,
        }
    }
}

impl Default for ReplCompleter {
    fn default() -> Self {
        Self::new(FieldNames::default())
    }
}

impl Completer for ReplCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let mut suggestions = Vec::new();

        // Get the word being typed
        let line_to_pos = &line[..pos];
        let words: Vec<&str> = line_to_pos.split_whitespace().collect();
        let at_word_boundary = line_to_pos.ends_with(char::is_whitespace);

        if words.is_empty() || (words.len() == 1 && !at_word_boundary) {
            // Completing the command itself
            let prefix = words.first().copied().unwrap_or("");
            let start = pos - prefix.len();

            for spec in self.commands {
                if spec.name.starts_with(prefix) {
                    suggestions.push(Self::suggestion(
                        spec.name,
                        spec.summary.to_string(),
                        Span::new(start, pos),
                    ));
                }
            }
            return suggestions;
        }

        // Completing the field name after `set`
        let is_set = lookup(words[0]).is_some_and(|spec| spec.command == Command::Set);
        let completing_field = is_set
            && ((words.len() == 1 && at_word_boundary) || (words.len() == 2 && !at_word_boundary));
        if !completing_field {
            return suggestions;
        }

        let prefix = if at_word_boundary { "" } else { words[1] };
        let start = pos - prefix.len();

        if let Ok(fields) = self.fields.read() {
            for field in fields.iter() {
                if field.starts_with(prefix) {
                    suggestions.push(Self::suggestion(
                        field,
                        "Field".to_string(),
                        Span::new(start, pos),
                    ));
                }
            }
        }

        suggestions
    }
}
