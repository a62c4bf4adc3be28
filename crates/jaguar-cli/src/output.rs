//! Shared output layer for pretty/text/JSON parity across all CLI commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its output
//! accordingly: pretty output for humans, plain text for pipes (DOT and SVG
//! go straight to stdout so they can be fed to other tools), or stable JSON.
//!
//! # Output mode resolution
//!
//! Precedence (highest wins):
//! 1. `--format` / `--json` flag
//! 2. `FORMAT` env var → `"pretty"` | `"text"` | `"json"`
//! 3. Default: [`OutputMode::Pretty`] if stdout is a TTY; [`OutputMode::Text`] if piped.

use clap::ValueEnum;
use serde::Serialize;
use std::fmt;
use std::io::{self, IsTerminal, Write};

/// Shared width for human pretty separators.
pub const PRETTY_RULE_WIDTH: usize = 72;

/// Write a horizontal separator used by pretty human output.
pub fn pretty_rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:-<width$}", "", width = PRETTY_RULE_WIDTH)
}

/// Write a section heading followed by a separator.
pub fn pretty_section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    pretty_rule(w)
}

/// Render a left-aligned key/value line in human output.
pub fn pretty_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<14} {}", format!("{key}:"), value.as_ref())
}

/// The three output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Human-optimized output (sections, summaries).
    Pretty,
    /// Raw artifacts and tab-separated rows for pipes.
    Text,
    /// Machine-readable JSON.
    Json,
}

/// Resolution without I/O: flag, then `--json`, then `FORMAT`, then TTY.
///
/// An unrecognized `FORMAT` value is ignored.
fn resolve_output_mode_inner(
    format_flag: Option<OutputMode>,
    json_flag: bool,
    format_env: Option<&str>,
    is_tty: bool,
) -> OutputMode {
    if let Some(mode) = format_flag {
        return mode;
    }
    if json_flag {
        return OutputMode::Json;
    }
    format_env
        .and_then(|val| OutputMode::from_str(val.trim(), true).ok())
        .unwrap_or(if is_tty {
            OutputMode::Pretty
        } else {
            OutputMode::Text
        })
}

/// Resolve the output mode from CLI flags, environment, and TTY defaults.
pub fn resolve_output_mode(format_flag: Option<OutputMode>, json_flag: bool) -> OutputMode {
    let env_val = std::env::var("FORMAT").ok();
    resolve_output_mode_inner(
        format_flag,
        json_flag,
        env_val.as_deref(),
        io::stdout().is_terminal(),
    )
}

/// A command failure reported to the user, with an optional hint and code.
#[derive(Debug, Serialize)]
pub struct CliError {
    pub message: String,
    /// What to try next.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Stable identifier for scripts, e.g. `nothing_to_show`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl CliError {
    pub fn with_details(
        message: impl Into<String>,
        suggestion: impl Into<String>,
        error_code: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            suggestion: Some(suggestion.into()),
            error_code: Some(error_code.into()),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error: {}", self.message)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  suggestion: {suggestion}")?;
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    error: &'a CliError,
}

/// Writes one payload for a human mode.
pub type HumanFn<T> = fn(&T, &mut dyn Write) -> io::Result<()>;

/// Print `value` to stdout: serialized as JSON, or through `text` or
/// `pretty` for the human modes. Commands whose text and pretty output
/// coincide pass the same function twice.
pub fn render_mode<T: Serialize>(
    mode: OutputMode,
    value: &T,
    text: HumanFn<T>,
    pretty: HumanFn<T>,
) -> anyhow::Result<()> {
    write_payload(&mut io::stdout().lock(), mode, value, text, pretty)
}

fn write_payload<T: Serialize>(
    out: &mut dyn Write,
    mode: OutputMode,
    value: &T,
    text: HumanFn<T>,
    pretty: HumanFn<T>,
) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut *out, value)?;
            writeln!(out)?;
        }
        OutputMode::Text => text(value, out)?,
        OutputMode::Pretty => pretty(value, out)?,
    }
    Ok(())
}

/// Print `error` to stderr, as `{"error": ...}` in JSON mode.
pub fn render_error(mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    write_error(&mut io::stderr().lock(), mode, error)
}

fn write_error(out: &mut dyn Write, mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    if mode == OutputMode::Json {
        serde_json::to_writer_pretty(&mut *out, &ErrorEnvelope { error })?;
        writeln!(out)?;
    } else {
        writeln!(out, "{error}")?;
    }
    Ok(())
}

/// Write `text` followed by a newline unless it is empty.
pub fn write_artifact(w: &mut dyn Write, text: &str) -> io::Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    w.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        writeln!(w)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_format_flag_wins_over_json_and_env() {
        let mode = resolve_output_mode_inner(Some(OutputMode::Text), true, Some("pretty"), true);
        assert_eq!(mode, OutputMode::Text);
    }

    #[test]
    fn resolve_json_flag_wins_over_env() {
        let mode = resolve_output_mode_inner(None, true, Some("text"), true);
        assert_eq!(mode, OutputMode::Json);
    }

    #[test]
    fn resolve_env_is_case_insensitive() {
        let mode = resolve_output_mode_inner(None, false, Some("JSON"), true);
        assert_eq!(mode, OutputMode::Json);
    }

    #[test]
    fn resolve_unknown_env_falls_back_to_tty() {
        assert_eq!(
            resolve_output_mode_inner(None, false, Some("yaml"), true),
            OutputMode::Pretty
        );
        assert_eq!(
            resolve_output_mode_inner(None, false, None, false),
            OutputMode::Text
        );
    }

    #[test]
    fn cli_error_serializes_without_empty_fields() {
        let err = CliError {
            message: "boom".to_string(),
            suggestion: None,
            error_code: None,
        };
        let json = serde_json::to_value(&err).expect("serialize");
        assert_eq!(json, serde_json::json!({ "message": "boom" }));
    }

    #[test]
    fn resolve_env_ignores_surrounding_whitespace() {
        let mode = resolve_output_mode_inner(None, false, Some(" text\n"), true);
        assert_eq!(mode, OutputMode::Text);
    }

    #[derive(Serialize)]
    struct Sample {
        dot: &'static str,
    }

    fn sample_text(s: &Sample, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{}", s.dot)
    }

    fn sample_pretty(s: &Sample, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "graph: {}", s.dot)
    }

    fn payload_in(mode: OutputMode) -> String {
        let mut out = Vec::new();
        write_payload(
            &mut out,
            mode,
            &Sample { dot: "digraph {}" },
            sample_text,
            sample_pretty,
        )
        .expect("write");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn payload_dispatches_on_mode() {
        assert_eq!(payload_in(OutputMode::Text), "digraph {}\n");
        assert_eq!(payload_in(OutputMode::Pretty), "graph: digraph {}\n");
        let json: serde_json::Value =
            serde_json::from_str(&payload_in(OutputMode::Json)).expect("json");
        assert_eq!(json, serde_json::json!({ "dot": "digraph {}" }));
    }

    #[test]
    fn error_text_includes_suggestion() {
        let err = CliError::with_details("nothing to show", "run first", "nothing_to_show");
        let mut out = Vec::new();
        write_error(&mut out, OutputMode::Text, &err).expect("write");
        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "error: nothing to show\n  suggestion: run first\n"
        );
    }

    #[test]
    fn error_json_is_wrapped() {
        let err = CliError::with_details("nothing to show", "run first", "nothing_to_show");
        let mut out = Vec::new();
        write_error(&mut out, OutputMode::Json, &err).expect("write");
        let json: serde_json::Value = serde_json::from_slice(&out).expect("json");
        assert_eq!(json["error"]["error_code"], "nothing_to_show");
        assert_eq!(json["error"]["suggestion"], "run first");
    }

    #[test]
    fn write_artifact_adds_single_newline() {
        let mut out = Vec::new();
        write_artifact(&mut out, "digraph {}").expect("write");
        write_artifact(&mut out, "").expect("write");
        write_artifact(&mut out, "x\n").expect("write");
        assert_eq!(String::from_utf8(out).expect("utf8"), "digraph {}\nx\n");
    }

    #[test]
    fn pretty_kv_aligns_keys() {
        let mut out = Vec::new();
        pretty_kv(&mut out, "nodes", "3").expect("write");
        assert_eq!(String::from_utf8(out).expect("utf8"), "nodes:         3\n");
    }
}
