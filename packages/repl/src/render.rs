//! Text rendering of the editor view.

use nu_ansi_term::{Color, Style};
use serde_json::Value as JsonValue;

use recordform_core::{Form, InputKind, View};

/// Heading shown above the form.
pub const FORM_HEADING: &str = "Update Item";

/// Heading of the reference record dump below the form.
pub const ORIGINAL_HEADING: &str = "Original Item Data";

/// Render the whole editor view.
pub fn render_view(view: &View<'_>) -> String {
    match view {
        View::Loading => Color::Cyan.paint("Loading...").to_string(),
        View::Failed(message) => Color::Red.paint(*message).to_string(),
        View::Empty => String::new(),
        View::Ready {
            form,
            error,
            success,
            reference,
        } => {
            let mut out = String::new();
            out.push_str(&format!("{}\n", Style::new().bold().paint(FORM_HEADING)));

            if let Some(error) = error {
                out.push_str(&format!("{}\n", Color::Red.paint(*error)));
            }
            if let Some(success) = success {
                out.push_str(&format!("{}\n", Color::Green.paint(*success)));
            }

            out.push('\n');
            out.push_str(&render_form(form));
            out.push_str(&format!(
                "\n{}\n{}",
                Style::new().bold().paint(ORIGINAL_HEADING),
                format_json(&reference.to_json())
            ));
            out
        }
    }
}

/// Render the inputs and the two controls.
pub fn render_form(form: &Form) -> String {
    let width = form
        .fields
        .iter()
        .map(|field| field.label.chars().count() + 1)
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for field in &form.fields {
        let label = format!("{}:", field.label);
        let kind = match field.kind {
            InputKind::Number => Color::Cyan.paint("[number]"),
            InputKind::Text => Color::DarkGray.paint("[text]  "),
        };
        out.push_str(&format!(
            "  {} {} {}\n",
            Style::new().bold().paint(format!("{:<width$}", label, width = width)),
            kind,
            Color::Yellow.paint(&field.value),
        ));
    }

    let control_style = if form.controls_enabled {
        Style::new().bold().fg(Color::Green)
    } else {
        Style::new().dimmed()
    };
    out.push_str(&format!(
        "\n  {}  {}\n",
        control_style.paint(format!("[ {} ]", form.submit_label)),
        control_style.paint("[ Reset ]"),
    ));
    out
}

/// Format JSON with syntax highlighting
pub fn format_json(value: &JsonValue) -> String {
    // Pretty print with indentation
    let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());

    // Apply basic syntax highlighting
    let mut result = String::new();
    let mut in_string = false;
    let mut escape_next = false;

    for c in pretty.chars() {
        if escape_next {
            result.push(c);
            escape_next = false;
            continue;
        }

        if c == '\\' && in_string {
            result.push(c);
            escape_next = true;
            continue;
        }

        if c == '"' {
            in_string = !in_string;
            result.push_str(&format!("{}", Color::Green.paint("\"")));
            continue;
        }

        if in_string {
            result.push_str(&format!("{}", Color::Green.paint(c.to_string())));
        } else {
            match c {
                '{' | '}' | '[' | ']' => {
                    result.push_str(&format!("{}", Color::White.bold().paint(c.to_string())))
                }
                _ if c.is_ascii_digit() || c == '.' || c == '-' => {
                    result.push_str(&format!("{}", Color::Cyan.paint(c.to_string())))
                }
                _ => result.push(c),
            }
        }
    }

    result
}

/// Remove ANSI escape sequences, leaving the plain text.
pub fn strip_ansi_codes(s: &str) -> String {
    let mut result = String::new();
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // Skip until we find 'm' (end of ANSI sequence)
            while let Some(&next) = chars.peek() {
                chars.next();
                if next == 'm' {
                    break;
                }
            }
        } else {
            result.push(c);
        }
    }

    result
}
