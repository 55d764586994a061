//! Command-line arguments.
//!
//! Flags mirror the [`TableConfig`] options. A configuration file given with
//! `--config` is loaded first and every flag that is present overrides it.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use tabulon::{
    Dir, FilterSpec, Record, SortFormatter, SortSpec, SortValue, TableConfig, Value, WidthToken,
};

use crate::output::OutputMode;
use crate::render::BorderStyle;

/// Render a list of records as a table.
#[derive(Debug, Clone, Parser)]
#[command(name = "tabulon", version, about)]
pub struct Cli {
    /// Records file (.json, .yaml, .yml or .csv), or '-' for JSON on stdin
    pub records: PathBuf,

    /// Table configuration file (YAML or JSON)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Column order
    #[arg(long, value_name = "FIELD,..", value_delimiter = ',')]
    pub order: Option<Vec<String>>,

    /// Column widths: auto, <n>%, <n>, <n>px or <n>ch
    #[arg(long, value_name = "WIDTH,..", value_delimiter = ',')]
    pub width: Option<Vec<WidthToken>>,

    /// Fields to show
    #[arg(long, value_name = "FIELD,..", value_delimiter = ',')]
    pub include: Option<Vec<String>>,

    /// Filter entry; repeat for more entries
    #[arg(short, long, value_name = "KEY=VALUE,..")]
    pub filter: Vec<String>,

    /// Sort column, optionally with a direction
    #[arg(short, long, value_name = "COLUMN[:asc|desc]")]
    pub sort: Option<String>,

    /// Compare sort values as dates
    #[arg(long)]
    pub date: bool,

    /// Sort key extractor: identity, lowercase, numeric or length
    #[arg(long, value_name = "NAME")]
    pub sort_value: Option<SortValue>,

    /// Selected rows
    #[arg(long, value_name = "INDEX,..", value_delimiter = ',')]
    pub select: Option<Vec<usize>>,

    /// Show a checkbox column
    #[arg(short, long)]
    pub multi_select: bool,

    /// Report the full input record in click payloads
    #[arg(long)]
    pub all_records: bool,

    /// Text shown when no records remain
    #[arg(long, value_name = "TEXT")]
    pub no_records_text: Option<String>,

    /// Print the click payload of the cell at column X of row Y
    #[arg(long, value_name = "X,Y")]
    pub click: Option<String>,

    /// Output mode
    #[arg(short, long, value_enum, default_value_t = OutputMode::Auto)]
    pub output: OutputMode,

    /// Border style for table output
    #[arg(long, value_enum, default_value_t = BorderStyle::None)]
    pub border: BorderStyle,

    /// Total table width (defaults to the terminal width, or 80)
    #[arg(long, value_name = "N")]
    pub max_width: Option<usize>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Builds the table configuration from the config file and flags.
    pub fn table_config(&self) -> anyhow::Result<TableConfig> {
        let mut config = match &self.config {
            Some(path) => TableConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => TableConfig::new(),
        };

        if let Some(order) = &self.order {
            config = config.order(order.iter().cloned());
        }
        if let Some(width) = &self.width {
            config = config.widths(width.iter().copied());
        }
        if let Some(include) = &self.include {
            config = config.include(include.iter().cloned());
        }
        if !self.filter.is_empty() {
            let entries = self
                .filter
                .iter()
                .map(|entry| parse_filter_entry(entry))
                .collect::<anyhow::Result<Vec<_>>>()?;
            config = config.filter(FilterSpec::new(entries));
        }
        if let Some(sort) = &self.sort {
            config = config.sort(parse_sort(sort)?);
        }
        if self.date || self.sort_value.is_some() {
            let Some(sort) = config.order_by.as_mut() else {
                bail!("--date and --sort-value need a sort column");
            };
            if self.date {
                sort.formatter = Some(SortFormatter::Date);
            }
            if let Some(extractor) = &self.sort_value {
                sort.get_sort_value = extractor.clone();
            }
        }
        if let Some(select) = &self.select {
            config = config.select(select.iter().copied());
        }
        if self.multi_select {
            config.multi_selectable = true;
        }
        if self.all_records {
            config.return_all_records_on_click = true;
        }
        if let Some(text) = &self.no_records_text {
            config.no_records_text = text.clone();
        }
        Ok(config)
    }

    /// The requested click coordinates.
    pub fn click_coords(&self) -> anyhow::Result<Option<(usize, usize)>> {
        let Some(click) = &self.click else {
            return Ok(None);
        };
        let (x, y) = click
            .split_once(',')
            .with_context(|| format!("invalid click '{}': expected X,Y", click))?;
        let x = x
            .trim()
            .parse()
            .with_context(|| format!("invalid click column '{}'", x))?;
        let y = y
            .trim()
            .parse()
            .with_context(|| format!("invalid click row '{}'", y))?;
        Ok(Some((x, y)))
    }
}

/// Parses `key=value,key=value` into one filter entry.
pub fn parse_filter_entry(entry: &str) -> anyhow::Result<Record> {
    let mut record = Record::new();
    for pair in entry.split(',') {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("invalid filter '{}': expected KEY=VALUE", pair))?;
        let key = key.trim();
        if key.is_empty() {
            bail!("invalid filter '{}': empty field name", pair);
        }
        record.insert(key, Value::infer(value));
    }
    Ok(record)
}

/// Parses `column[:asc|desc]`.
pub fn parse_sort(sort: &str) -> anyhow::Result<SortSpec> {
    let (column, direction) = match sort.rsplit_once(':') {
        Some((column, direction)) => (column, direction.parse::<Dir>()?),
        None => (sort, Dir::Asc),
    };
    if column.trim().is_empty() {
        bail!("invalid sort '{}': empty column", sort);
    }
    Ok(SortSpec::new(column.trim(), direction))
}
