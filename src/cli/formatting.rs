//! Formatting utilities for CLI output.
//!
//! Provides consistent formatting for setting values and styled help text
//! for CLI commands.

use serde_json::Value;
pub use supports_color::Stream;

/// ANSI color codes for terminal output
pub struct Colors;

impl Colors {
    /// Reset all formatting
    pub const RESET: &'static str = "\x1b[0m";
    /// Bold text
    pub const BOLD: &'static str = "\x1b[1m";
    /// Dim text
    pub const DIM: &'static str = "\x1b[2m";

    /// Red color
    pub const RED: &'static str = "\x1b[31m";
    /// Green color
    pub const GREEN: &'static str = "\x1b[32m";
    /// Blue color
    pub const BLUE: &'static str = "\x1b[34m";
    /// Magenta color
    pub const MAGENTA: &'static str = "\x1b[35m";
    /// Cyan color
    pub const CYAN: &'static str = "\x1b[36m";
}

/// Whether output on `stream` should carry ANSI colors.
///
/// Follows the terminal's capabilities and the `NO_COLOR` / `FORCE_COLOR`
/// environment variables, so piped output stays plain.
pub fn should_use_color(stream: Stream) -> bool {
    supports_color::on_cached(stream).is_some()
}

fn paint(stream: Stream, styles: &[&str], text: &str) -> String {
    if should_use_color(stream) {
        format!("{}{}{}", styles.concat(), text, Colors::RESET)
    } else {
        text.to_string()
    }
}

/// Formats section headers with styling
pub fn format_header(text: &str) -> String {
    paint(Stream::Stdout, &[Colors::BOLD, Colors::CYAN], text)
}

/// Formats a priority level name, padded to `width` before styling
pub fn format_level(text: &str, width: usize) -> String {
    paint(Stream::Stdout, &[Colors::MAGENTA], &format!("{text:<width$}"))
}

/// Formats command names with styling
pub fn format_command(text: &str) -> String {
    paint(Stream::Stdout, &[Colors::BOLD, Colors::GREEN], text)
}

/// Formats category names with styling
pub fn format_category(text: &str) -> String {
    paint(Stream::Stdout, &[Colors::BOLD, Colors::BLUE], text)
}

/// Formats descriptions with muted styling
pub fn format_description(text: &str) -> String {
    paint(Stream::Stdout, &[Colors::DIM], text)
}

/// Formats usage examples with styling
pub fn format_usage(text: &str) -> String {
    paint(Stream::Stdout, &[Colors::DIM], text)
}

/// Formats error messages for stderr with red styling
pub fn format_error(text: &str) -> String {
    paint(Stream::Stderr, &[Colors::BOLD, Colors::RED], text)
}

/// Formats a setting value for human-readable CLI output.
///
/// Scalars are printed in full, strings as escaped JSON strings. Sequences
/// and mappings show their size rather than their contents.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use strata::cli::formatting::format_value;
///
/// assert_eq!(format_value(&json!("hello")), "\"hello\"");
/// assert_eq!(format_value(&json!("say \"hi\"")), r#""say \"hi\"""#);
/// assert_eq!(format_value(&json!(42)), "42");
/// assert_eq!(format_value(&json!([1, 2, 3])), "[3]");
/// ```
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(_) | Value::Number(_) | Value::Bool(_) | Value::Null => value.to_string(),
        Value::Array(arr) => format!("[{}]", arr.len()),
        Value::Object(map) => format!("{{{}}}", map.len()),
    }
}
