use nu_ansi_term::{Color, Style};
use reedline::{Highlighter, StyledText};

use crate::commands::{lookup, Command};

/// Syntax highlighter for the REPL
pub struct ReplHighlighter;

impl ReplHighlighter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ReplHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter for ReplHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut styled = StyledText::new();

        if line.is_empty() {
            return styled;
        }

        // Find the first whitespace to split command from args
        let (command, rest) = match line.find(char::is_whitespace) {
            Some(pos) => (&line[..pos], &line[pos..]),
            None => (line, ""),
        };

        let spec = lookup(command);
        let cmd_style = if spec.is_some() {
            Style::new().bold().fg(Color::Cyan)
        } else {
            Style::new().fg(Color::Red)
        };
        styled.push((cmd_style, command.to_string()));

        if rest.is_empty() {
            return styled;
        }

        match spec.map(|spec| spec.command) {
            Some(Command::Set) => {
                // Field name in yellow, value in green
                let trimmed = rest.trim_start();
                let lead = &rest[..rest.len() - trimmed.len()];
                match trimmed.find(char::is_whitespace) {
                    Some(pos) => {
                        styled.push((
                            Style::new().fg(Color::Yellow),
                            format!("{}{}", lead, &trimmed[..pos]),
                        ));
                        styled.push((Style::new().fg(Color::Green), trimmed[pos..].to_string()));
                    }
                    None => {
                        styled.push((Style::new().fg(Color::Yellow), rest.to_string()));
                    }
                }
            }
            _ => {
                styled.push((Style::new(), rest.to_string()));
            }
        }

        styled
    }
}
