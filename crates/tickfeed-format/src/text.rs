//! Human-readable text output.

use std::io::Write;
use tickfeed_types::{Metadata, PriceTable};

use crate::{FormatError, Formatter, format_offset};

/// Plain-text formatter.
///
/// Writes the metadata as an indented `key: value` listing, a blank line,
/// then the rows as a column-aligned table.
#[derive(Debug, Clone)]
pub struct TextFormatter {
    /// Indent added per nesting level of the metadata listing.
    indent: usize,
    /// Whether to write the metadata listing.
    include_metadata: bool,
}

impl TextFormatter {
    /// Creates a text formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            indent: 2,
            include_metadata: true,
        }
    }

    /// Sets whether to write the metadata listing before the table.
    #[must_use]
    pub const fn with_metadata(mut self, include: bool) -> Self {
        self.include_metadata = include;
        self
    }

    fn write_metadata<W: Write>(&self, metadata: &Metadata, w: &mut W) -> std::io::Result<()> {
        let pad = " ".repeat(self.indent);

        writeln!(w, "market: {}", metadata.market)?;
        if let Some(tick) = metadata.tick {
            writeln!(w, "tick: {}s", tick.num_seconds())?;
        }
        if let Some(sessions) = &metadata.sessions {
            writeln!(w, "sessions: ")?;
            for (code, session) in sessions {
                let offset = format_offset(session.offset());
                writeln!(w, "{pad}{code}: ")?;
                writeln!(w, "{pad}{pad}start: {} {offset}", session.start())?;
                writeln!(w, "{pad}{pad}end: {} {offset}", session.end())?;
            }
        }
        if let Some(timezone) = metadata.timezone {
            writeln!(w, "timezone: {}", format_offset(timezone))?;
        }

        // Sequence values continue underneath the first element.
        let header = "columns: ";
        let mut columns = metadata.columns.iter();
        if let Some(first) = columns.next() {
            writeln!(w, "{header}{first}")?;
            for column in columns {
                writeln!(w, "{:width$}{column}", "", width = header.len())?;
            }
        }
        Ok(())
    }

    fn write_table<W: Write>(
        time_column: &str,
        table: &PriceTable,
        w: &mut W,
    ) -> std::io::Result<()> {
        let timestamps: Vec<String> = table.iter().map(|row| row.timestamp.to_string()).collect();

        let mut widths: Vec<usize> = std::iter::once(time_column.len())
            .chain(table.columns().iter().map(String::len))
            .collect();
        for (row, ts) in table.iter().zip(&timestamps) {
            widths[0] = widths[0].max(ts.len());
            for (width, value) in widths[1..].iter_mut().zip(&row.values) {
                *width = (*width).max(value.len());
            }
        }

        write!(w, "{time_column:<width$}", width = widths[0])?;
        for (column, &width) in table.columns().iter().zip(&widths[1..]) {
            write!(w, "  {column:>width$}")?;
        }
        writeln!(w)?;

        for (row, ts) in table.iter().zip(&timestamps) {
            write!(w, "{ts:<width$}", width = widths[0])?;
            for (value, &width) in row.values.iter().zip(&widths[1..]) {
                write!(w, "  {value:>width$}")?;
            }
            writeln!(w)?;
        }
        Ok(())
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for TextFormatter {
    fn write<W: Write>(
        &self,
        metadata: &Metadata,
        table: &PriceTable,
        mut writer: W,
    ) -> Result<(), FormatError> {
        if self.include_metadata {
            self.write_metadata(metadata, &mut writer)?;
            writeln!(writer)?;
        }
        let time_column = metadata.columns.first().map_or("DATE", String::as_str);
        Self::write_table(time_column, table, &mut writer)?;
        Ok(())
    }

    fn extension(&self) -> &str {
        "txt"
    }
}
