//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one record per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use ipwatch_core::FetchFailure;

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled on `stream`.
pub fn should_color(mode: &ColorMode, stream: &impl IsTerminal) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => stream.is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

/// Tell the user that what follows on stdout is placeholder data.
///
/// Printed even in quiet mode: the data is indistinguishable from real
/// metrics otherwise.
pub fn warn_fallback(failure: &FetchFailure, color: &ColorMode) {
    let stderr = io::stderr();
    let label = if should_color(color, &stderr) {
        "warning:".yellow().bold().to_string()
    } else {
        "warning:".to_owned()
    };
    let mut handle = stderr.lock();
    let _ = writeln!(
        handle,
        "{label} showing placeholder data for {}: {} ({})",
        failure.series.label(),
        failure.reason,
        failure.message
    );
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
///
/// - `table`: uses the `Tabled` derive to build a pretty table
/// - `json` / `json-compact`: serializes the original data via serde
/// - `yaml`: serializes via serde_yaml
/// - `plain`: calls `line_fn` on each item to emit one record per line
pub fn render_list<T, R>(
    format: &OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    line_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    Ok(match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            render_table(&rows)
        }
        OutputFormat::Json => render_json_pretty(data)?,
        OutputFormat::JsonCompact => render_json_compact(data)?,
        OutputFormat::Yaml => render_yaml(data)?,
        OutputFormat::Plain => data.iter().map(&line_fn).collect::<Vec<_>>().join("\n"),
    })
}

/// Render a single serde-serializable item in the chosen format.
///
/// Table rendering uses `detail_fn`, since single-item views are key/value
/// blocks rather than `Tabled` rows.
pub fn render_single<T>(
    format: &OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    plain_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
{
    if let Some(out) = render_structured(format, data)? {
        return Ok(out);
    }
    Ok(match format {
        OutputFormat::Plain => plain_fn(data),
        _ => detail_fn(data),
    })
}

/// Serialize `data` for the structured formats. `None` for table and plain,
/// which render from a typed view instead.
pub fn render_structured<T>(format: &OutputFormat, data: &T) -> Result<Option<String>, CliError>
where
    T: serde::Serialize + ?Sized,
{
    Ok(Some(match format {
        OutputFormat::Json => render_json_pretty(data)?,
        OutputFormat::JsonCompact => render_json_compact(data)?,
        OutputFormat::Yaml => render_yaml(data)?,
        OutputFormat::Table | OutputFormat::Plain => return Ok(None),
    }))
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Key/value views ──────────────────────────────────────────────────

/// One scalar of a detail view: wire key, human label, rendered value.
///
/// `unit` is appended in table mode only, so plain output stays numeric.
pub struct Field {
    pub key: &'static str,
    pub label: &'static str,
    pub value: String,
    pub unit: &'static str,
}

impl Field {
    pub fn new(key: &'static str, label: &'static str, value: impl std::fmt::Display) -> Self {
        Self {
            key,
            label,
            value: value.to_string(),
            unit: "",
        }
    }

    pub fn unit(mut self, unit: &'static str) -> Self {
        self.unit = unit;
        self
    }
}

/// Aligned `Label: value` lines for table-mode detail views.
pub fn detail_lines(fields: &[Field]) -> String {
    let width = fields.iter().map(|f| f.label.len()).max().unwrap_or(0) + 1;
    fields
        .iter()
        .map(|f| format!("{:<width$} {}{}", format!("{}:", f.label), f.value, f.unit))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Tab-separated `key value` lines for plain output.
pub fn plain_lines(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| format!("{}\t{}", f.key, f.value))
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Format-specific renderers ────────────────────────────────────────

pub(crate) fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Pretty-printed JSON.
pub(crate) fn render_json_pretty<T: serde::Serialize + ?Sized>(
    data: &T,
) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(data)?)
}

/// Compact single-line JSON.
pub(crate) fn render_json_compact<T: serde::Serialize + ?Sized>(
    data: &T,
) -> Result<String, CliError> {
    Ok(serde_json::to_string(data)?)
}

/// YAML output.
pub(crate) fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    Ok(serde_yaml::to_string(data)?)
}
