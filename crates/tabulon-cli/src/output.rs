//! Output mode control.
//!
//! [`OutputMode`] decides how a table view leaves the process, from a styled
//! terminal table to structured serialization.

use std::io::Write;

use clap::ValueEnum;
use serde::Serialize;
use tabulon::{HeaderMap, Record};

/// Controls how output is rendered.
///
/// This is the user-facing enum for the `--output` flag.
///
/// - `Auto` - Detect terminal capabilities (TTY → Term, pipe → Text)
/// - `Term` - Always apply terminal styling
/// - `Text` - Same layout, never styled
/// - `Json`, `Yaml` - Serialize the table view
/// - `Csv` - Write the processed records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputMode {
    /// Auto-detect: TTY gets Term, pipe gets Text
    #[default]
    Auto,
    /// Always use terminal styling
    Term,
    /// Never use styling (plain text)
    Text,
    /// Serialize the table view as JSON
    Json,
    /// Serialize the table view as YAML
    Yaml,
    /// Write processed records as CSV
    Csv,
}

impl OutputMode {
    /// Returns true if this is a structured output mode (JSON, YAML, CSV).
    pub fn is_structured(&self) -> bool {
        matches!(self, OutputMode::Json | OutputMode::Yaml | OutputMode::Csv)
    }

    /// Resolves Auto mode to concrete Term or Text based on TTY detection.
    ///
    /// For non-Auto modes, returns self unchanged.
    pub fn resolve_auto(&self) -> OutputMode {
        match self {
            OutputMode::Auto => {
                if atty::is(atty::Stream::Stdout) {
                    OutputMode::Term
                } else {
                    OutputMode::Text
                }
            }
            other => *other,
        }
    }

    /// Returns true if table output should carry ANSI styling.
    pub fn is_styled(&self) -> bool {
        self.resolve_auto() == OutputMode::Term
    }
}

/// Writes `data` as pretty JSON, or as YAML when `mode` asks for it.
pub fn write_serialized<T: Serialize, W: Write>(
    out: &mut W,
    data: &T,
    mode: OutputMode,
) -> anyhow::Result<()> {
    match mode {
        OutputMode::Yaml => out.write_all(serde_yaml::to_string(data)?.as_bytes())?,
        _ => writeln!(out, "{}", serde_json::to_string_pretty(data)?)?,
    }
    Ok(())
}

/// Writes processed records as CSV.
///
/// The header line carries the display labels; each row holds the values of
/// the header fields, with missing and null fields left empty.
pub fn write_csv<W: Write>(out: &mut W, headers: &HeaderMap, records: &[Record]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(headers.iter().map(|(_, label)| label))?;
    for record in records {
        wtr.write_record(
            headers
                .fields()
                .map(|field| record.get(field).map(ToString::to_string).unwrap_or_default()),
        )?;
    }
    wtr.flush()?;
    Ok(())
}
