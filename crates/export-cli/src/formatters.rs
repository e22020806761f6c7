//! Output formatters for CLI reports.
//!
//! Every command builds a serializable report and hands it to
//! [`format_output`], which renders it as JSON, flat text, or a colored tree.

use anyhow::Result;
use client_export_core::cli::OutputFormat;
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;

/// Formats `data` according to `format`.
///
/// # Errors
///
/// Returns an error if `data` cannot be serialized.
///
/// # Examples
///
/// ```
/// use client_export_cli::formatters::format_output;
/// use client_export_core::cli::OutputFormat;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Summary {
///     types: usize,
/// }
///
/// let output = format_output(&Summary { types: 2 }, OutputFormat::Text)?;
/// assert_eq!(output, "types = 2");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::format(data),
        OutputFormat::Text => text::format(data),
        OutputFormat::Pretty => pretty::format(data),
    }
}

/// JSON output.
pub mod json {
    use super::{Result, Serialize};

    /// Formats data as indented JSON.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }
}

/// Flat `key = value` lines for scripts.
pub mod text {
    use super::{Result, Serialize, Value};

    /// Formats data as one `path = value` line per leaf.
    ///
    /// Nested keys are joined with `.` and array elements are addressed by
    /// index, e.g. `types.0.leaf = written`.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        let mut lines = Vec::new();
        flatten(&value, "", &mut lines);
        Ok(lines.join("\n"))
    }

    fn flatten(value: &Value, prefix: &str, lines: &mut Vec<String>) {
        let child = |key: &str| {
            if prefix.is_empty() {
                key.to_string()
            } else {
                format!("{prefix}.{key}")
            }
        };

        match value {
            Value::Object(map) if !map.is_empty() => {
                for (key, val) in map {
                    flatten(val, &child(key), lines);
                }
            }
            Value::Array(items) if !items.is_empty() => {
                for (index, item) in items.iter().enumerate() {
                    flatten(item, &child(&index.to_string()), lines);
                }
            }
            Value::String(s) => lines.push(format!("{prefix} = {s}")),
            other => lines.push(format!("{prefix} = {other}")),
        }
    }
}

/// Colored, indented output for terminals.
pub mod pretty {
    use super::{Colorize, Result, Serialize, Value};

    /// Formats data as a colored tree.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        let mut out = String::new();
        write_value(&value, 0, &mut out);
        Ok(out.trim_end().to_string())
    }

    fn scalar(value: &Value) -> String {
        match value {
            Value::Null => "-".dimmed().to_string(),
            Value::Bool(b) => b.to_string().yellow().to_string(),
            Value::Number(n) => n.to_string().cyan().to_string(),
            Value::String(s) => s.green().to_string(),
            Value::Array(_) | Value::Object(_) => String::new(),
        }
    }

    fn is_container(value: &Value) -> bool {
        matches!(value, Value::Array(a) if !a.is_empty())
            || matches!(value, Value::Object(o) if !o.is_empty())
    }

    fn write_value(value: &Value, indent: usize, out: &mut String) {
        let pad = "  ".repeat(indent);
        match value {
            Value::Object(map) => {
                for (key, val) in map {
                    if is_container(val) {
                        out.push_str(&format!("{pad}{}:\n", key.blue().bold()));
                        write_value(val, indent + 1, out);
                    } else {
                        out.push_str(&format!("{pad}{}: {}\n", key.blue().bold(), scalar(val)));
                    }
                }
            }
            Value::Array(items) => {
                for item in items {
                    if is_container(item) {
                        out.push_str(&format!("{pad}-\n"));
                        write_value(item, indent + 1, out);
                    } else {
                        out.push_str(&format!("{pad}- {}\n", scalar(item)));
                    }
                }
            }
            other => out.push_str(&format!("{pad}{}\n", scalar(other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Outcome {
        name: String,
        methods: usize,
        preserved: bool,
    }

    #[derive(Serialize)]
    struct Report {
        files_scanned: usize,
        types: Vec<Outcome>,
    }

    fn report() -> Report {
        Report {
            files_scanned: 3,
            types: vec![Outcome {
                name: "OrderClient".to_string(),
                methods: 2,
                preserved: false,
            }],
        }
    }

    #[test]
    fn test_json_format() {
        let output = json::format(&report()).unwrap();
        let parsed: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["types"][0]["name"], "OrderClient");
        assert!(output.contains('\n'));
    }

    #[test]
    fn test_text_format_flattens_paths() {
        let output = text::format(&report()).unwrap();
        let mut lines: Vec<_> = output.lines().collect();
        lines.sort_unstable();
        assert_eq!(
            lines,
            [
                "files_scanned = 3",
                "types.0.methods = 2",
                "types.0.name = OrderClient",
                "types.0.preserved = false",
            ]
        );
    }

    #[test]
    fn test_text_format_empty_collections() {
        let output = text::format(&serde_json::json!({ "types": [] })).unwrap();
        assert_eq!(output, "types = []");
    }

    #[test]
    fn test_pretty_format_contains_keys_and_values() {
        colored::control::set_override(false);
        let output = pretty::format(&report()).unwrap();
        assert!(output.contains("files_scanned: 3"));
        assert!(output.contains("types:"));
        assert!(output.contains("    name: OrderClient"));
        assert!(output.contains("    preserved: false"));
    }

    #[test]
    fn test_format_output_dispatch() {
        let data = report();
        assert!(format_output(&data, OutputFormat::Json).unwrap().starts_with('{'));
        assert!(format_output(&data, OutputFormat::Text)
            .unwrap()
            .starts_with("files_scanned"));
        assert!(format_output(&data, OutputFormat::Pretty)
            .unwrap()
            .contains("OrderClient"));
    }
}
