//! Output formatting for the tickfeed CLI.

use anyhow::{Context, Result};
use clap::ValueEnum;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tickfeed_lib::prelude::*;

/// Output format for decoded data.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Text,
    Csv,
    Json,
    Ndjson,
}

impl Format {
    /// Returns the file extension for this format.
    pub(crate) const fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Write metadata and rows to a file, or stdout when no path is given.
pub(crate) fn write_output(
    metadata: &Metadata,
    table: &PriceTable,
    format: Format,
    output: Option<&PathBuf>,
) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_table(metadata, table, format, &mut writer)?;
            writer.flush()?;
            tracing::info!(path = %path.display(), %format, "wrote output");
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            write_table(metadata, table, format, &mut writer)?;
            writer.flush()?;
        }
    }
    Ok(())
}

fn write_table<W: Write>(
    metadata: &Metadata,
    table: &PriceTable,
    format: Format,
    writer: W,
) -> Result<()> {
    match format {
        Format::Text => TextFormatter::new().write(metadata, table, writer)?,
        Format::Csv => CsvFormatter::new().write(metadata, table, writer)?,
        Format::Json => JsonFormatter::new().write(metadata, table, writer)?,
        Format::Ndjson => JsonFormatter::ndjson().write(metadata, table, writer)?,
    }
    Ok(())
}
