//! Output formatting: table, JSON, YAML.
//!
//! Renders records in the format selected by `--output`. Table output is a
//! two-column field/value view built with `tabled`; structured formats
//! serialize the record itself.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stderr().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Print a status line to stderr, highlighted when color is enabled.
pub fn notice(message: &str, color: bool, quiet: bool) {
    if quiet {
        return;
    }
    let mut stderr = io::stderr().lock();
    if color {
        let _ = writeln!(stderr, "{}", message.yellow().bold());
    } else {
        let _ = writeln!(stderr, "{message}");
    }
}

// ── Detail view ──────────────────────────────────────────────────────

/// One line of a detail table.
#[derive(Tabled)]
pub struct FieldRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

impl FieldRow {
    pub fn new(field: &'static str, value: impl ToString) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }

    /// A row for an optional value, rendered as `-` when absent.
    pub fn optional(field: &'static str, value: Option<impl ToString>) -> Self {
        Self {
            field,
            value: value.map_or_else(|| "-".into(), |v| v.to_string()),
        }
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a single item in the chosen format.
///
/// Table rendering asks `rows_fn` for the field/value rows; structured
/// formats serialize `data` directly.
pub fn render_single<T>(
    format: &OutputFormat,
    data: &T,
    rows_fn: impl Fn(&T) -> Vec<FieldRow>,
) -> Result<String, CliError>
where
    T: Serialize,
{
    match format {
        OutputFormat::Table => Ok(render_table(&rows_fn(data))),
        OutputFormat::Json => render_json(data),
        OutputFormat::Yaml => render_yaml(data),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json<T: Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(data).map_err(|e| CliError::Render(e.to_string()))
}

fn render_yaml<T: Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    serde_yaml::to_string(data).map_err(|e| CliError::Render(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Serialize;

    use super::*;

    #[derive(Serialize)]
    struct Sample {
        id: &'static str,
        name: &'static str,
    }

    fn rows(s: &Sample) -> Vec<FieldRow> {
        vec![
            FieldRow::new("ID", s.id),
            FieldRow::optional("Name", Some(s.name)),
            FieldRow::optional("Brand", None::<&str>),
        ]
    }

    #[test]
    fn table_lists_fields() {
        let sample = Sample { id: "42", name: "core-switch-1" };
        let out = render_single(&OutputFormat::Table, &sample, rows).unwrap();
        assert!(out.contains("core-switch-1"));
        assert!(out.contains("Brand"));
        assert!(out.contains('-'));
    }

    #[test]
    fn json_serializes_record() {
        let sample = Sample { id: "42", name: "sw" };
        let out = render_single(&OutputFormat::Json, &sample, rows).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["id"], "42");
    }

    #[test]
    fn yaml_serializes_record() {
        let sample = Sample { id: "42", name: "sw" };
        let out = render_single(&OutputFormat::Yaml, &sample, rows).unwrap();
        assert!(out.contains("name: sw"));
    }
}
