//! Command-line front end for tabulon.
//!
//! Loads a records file, builds a [`tabulon::TableConfig`] from a
//! configuration file and flags, and writes the resulting table as text,
//! styled terminal output, JSON, YAML or CSV.

pub mod cli;
pub mod output;
pub mod render;

use std::io::{Read, Write};

use anyhow::Context;
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use tabulon::{records_from_json_str, DataTable, Record, TableEvent};

pub use cli::Cli;
pub use output::OutputMode;
pub use render::{BorderStyle, TableRenderer};

/// Width used when the terminal width is unknown.
pub const DEFAULT_WIDTH: usize = 80;

/// Gets the current terminal width, or None if not available.
pub fn terminal_width() -> Option<usize> {
    terminal_size::terminal_size().map(|(w, _)| w.0 as usize)
}

/// Log level for a `-v` count.
pub fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Installs the stderr logger.
pub fn init_logging(verbose: u8) -> anyhow::Result<()> {
    let config = ConfigBuilder::new().set_time_level(LevelFilter::Off).build();
    TermLogger::init(
        log_level(verbose),
        config,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .context("failed to initialise logging")
}

/// Loads the records named on the command line.
pub fn load_records(cli: &Cli) -> anyhow::Result<Vec<Record>> {
    if cli.records.as_os_str() == "-" {
        let mut json = String::new();
        std::io::stdin()
            .read_to_string(&mut json)
            .context("failed to read records from stdin")?;
        return records_from_json_str(&json).context("failed to parse records from stdin");
    }
    tabulon::load_records(&cli.records)
        .with_context(|| format!("failed to load records from {}", cli.records.display()))
}

/// Runs the command, writing its output to `out`.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> anyhow::Result<()> {
    let records = load_records(cli)?;
    let config = cli.table_config()?;
    let table = DataTable::new(records, config);

    if let Some((x, y)) = cli.click_coords()? {
        let payload = table
            .click(x, y)
            .with_context(|| format!("no cell at column {} of row {}", x, y))?;
        return output::write_serialized(out, &TableEvent::CellClick(payload), cli.output);
    }

    match cli.output {
        OutputMode::Json | OutputMode::Yaml => {
            output::write_serialized(out, &table.view(), cli.output)
        }
        OutputMode::Csv => output::write_csv(out, &table.headers(), &table.processed_records()),
        mode => {
            let width = cli
                .max_width
                .or_else(terminal_width)
                .unwrap_or(DEFAULT_WIDTH);
            let rendered = TableRenderer::new(width)
                .border(cli.border)
                .styled(mode.is_styled())
                .render(&table.view());
            writeln!(out, "{}", rendered)?;
            Ok(())
        }
    }
}
