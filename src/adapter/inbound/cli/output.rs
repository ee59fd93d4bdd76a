//! CLI output formatting.
//!
//! Human-readable lines with colored symbols, or one JSON object per line
//! when `--json` is set. Generated text goes to stdout; status lines are
//! suppressed by `--quiet`.

use std::fmt::Display;

use owo_colors::OwoColorize;
use parking_lot::RwLock;
use serde_json::{json, Value};

/// How the CLI renders its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Colored lines for a terminal.
    Human,
    /// Only generated text, warnings and errors.
    Quiet,
    /// One JSON object per line.
    Json,
}

impl Mode {
    /// Mode selected by the global flags. `--json` wins over `--quiet`.
    #[must_use]
    pub const fn from_flags(json: bool, quiet: bool) -> Self {
        match (json, quiet) {
            (true, _) => Self::Json,
            (false, true) => Self::Quiet,
            (false, false) => Self::Human,
        }
    }
}

static MODE: RwLock<Mode> = parking_lot::const_rwlock(Mode::Human);

fn mode() -> Mode {
    *MODE.read()
}

fn json_line(kind: &str, payload: Value) -> Value {
    json!({
        "type": kind,
        "payload": payload,
    })
}

/// Set the output mode for the rest of the process.
pub fn configure(mode: Mode) {
    *MODE.write() = mode;
}

/// Return whether machine-readable JSON output is enabled.
#[must_use]
pub fn is_json() -> bool {
    mode() == Mode::Json
}

/// Print generated text verbatim. Never suppressed.
pub fn response(text: &str) {
    match mode() {
        Mode::Json => println!("{}", json_line("response", json!({ "text": text }))),
        Mode::Human | Mode::Quiet => println!("{text}"),
    }
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    let value = value.to_string();
    match mode() {
        Mode::Json => println!(
            "{}",
            json_line("field", json!({ "label": label, "value": value }))
        ),
        Mode::Quiet => {}
        Mode::Human => println!("  {:<12} {}", label.dimmed(), value),
    }
}

/// Print a success line.
pub fn success(message: &str) {
    match mode() {
        Mode::Json => println!("{}", json_line("success", json!({ "message": message }))),
        Mode::Quiet => {}
        Mode::Human => println!("  {} {}", "✓".green(), message),
    }
}

/// Print a warning line.
pub fn warning(message: &str) {
    match mode() {
        Mode::Json => println!("{}", json_line("warning", json!({ "message": message }))),
        Mode::Human | Mode::Quiet => println!("  {} {}", "⚠".yellow(), message),
    }
}

/// Print an error line to stderr.
pub fn error(message: &str) {
    match mode() {
        Mode::Json => eprintln!("{}", json_line("error", json!({ "message": message }))),
        Mode::Human | Mode::Quiet => eprintln!("  {} {}", "×".red(), message),
    }
}

/// Print a section header.
pub fn section(title: &str) {
    match mode() {
        Mode::Json => println!("{}", json_line("section", json!({ "title": title }))),
        Mode::Quiet => {}
        Mode::Human => println!("\n{}", title.bold()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_line_wraps_payload() {
        let line = json_line("response", json!({ "text": "hi" }));
        assert_eq!(line["type"], "response");
        assert_eq!(line["payload"]["text"], "hi");
    }

    #[test]
    fn json_flag_wins_over_quiet() {
        assert_eq!(Mode::from_flags(true, true), Mode::Json);
        assert_eq!(Mode::from_flags(true, false), Mode::Json);
        assert_eq!(Mode::from_flags(false, true), Mode::Quiet);
        assert_eq!(Mode::from_flags(false, false), Mode::Human);
    }
}
