//! CSV output format.

use chrono::SecondsFormat;
use std::io::Write;
use tickfeed_types::{Metadata, PriceTable};

use crate::{FormatError, Formatter};

/// CSV formatter.
///
/// Values are written exactly as decoded; timestamps use RFC 3339 with the
/// feed offset.
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: char,
    /// Whether to include header row.
    include_header: bool,
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Creates a tab-separated values (TSV) formatter.
    #[must_use]
    pub const fn tsv() -> Self {
        Self {
            delimiter: '\t',
            include_header: true,
        }
    }
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for CsvFormatter {
    fn write<W: Write>(
        &self,
        metadata: &Metadata,
        table: &PriceTable,
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            let time_column = metadata.columns.first().map_or("DATE", String::as_str);
            write!(writer, "{time_column}")?;
            for column in table.columns() {
                write!(writer, "{d}{column}")?;
            }
            writeln!(writer)?;
        }

        for row in table {
            write!(
                writer,
                "{}",
                row.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
            )?;
            for value in &row.values {
                write!(writer, "{d}{value}")?;
            }
            writeln!(writer)?;
        }

        Ok(())
    }

    fn extension(&self) -> &str {
        "csv"
    }
}
