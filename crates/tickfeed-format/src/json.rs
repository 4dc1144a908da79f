//! JSON output format.

use serde::Serialize;
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;
use std::io::Write;
use tickfeed_types::{Metadata, PriceRow, PriceTable};

use crate::{FormatError, Formatter, format_offset};

/// JSON output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// One document holding metadata and all rows.
    #[default]
    Document,
    /// Newline-delimited JSON, one object per row.
    Ndjson,
}

/// JSON formatter.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    /// Output style.
    style: JsonStyle,
    /// Whether to pretty-print (document style only).
    pretty: bool,
}

/// Metadata as written to JSON.
#[derive(Serialize)]
struct MetadataView<'a> {
    market: &'a str,
    tick_seconds: Option<i64>,
    timezone: Option<String>,
    sessions: Option<BTreeMap<&'a str, SessionView>>,
    columns: &'a [String],
}

#[derive(Serialize)]
struct SessionView {
    start: String,
    end: String,
}

impl<'a> MetadataView<'a> {
    fn new(metadata: &'a Metadata) -> Self {
        let sessions = metadata.sessions.as_ref().map(|sessions| {
            sessions
                .iter()
                .map(|(code, session)| {
                    let offset = session.offset();
                    let view = SessionView {
                        start: format!("{}{offset}", session.start()),
                        end: format!("{}{offset}", session.end()),
                    };
                    (code.as_str(), view)
                })
                .collect()
        });

        Self {
            market: &metadata.market,
            tick_seconds: metadata.tick.map(|tick| tick.num_seconds()),
            timezone: metadata.timezone.map(format_offset),
            sessions,
            columns: &metadata.columns,
        }
    }
}

impl JsonFormatter {
    /// Creates a new JSON formatter with default settings (document style).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            style: JsonStyle::Document,
            pretty: false,
        }
    }

    /// Creates a new NDJSON formatter.
    #[must_use]
    pub const fn ndjson() -> Self {
        Self {
            style: JsonStyle::Ndjson,
            pretty: false,
        }
    }

    /// Sets whether to pretty-print output (document style only).
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Sets the output style.
    #[must_use]
    pub const fn with_style(mut self, style: JsonStyle) -> Self {
        self.style = style;
        self
    }
}

/// Row as an object keyed by column name.
fn row_object(time_column: &str, columns: &[String], row: &PriceRow) -> Value {
    let mut object = Map::with_capacity(columns.len() + 1);
    object.insert(time_column.to_string(), json!(row.timestamp.to_rfc3339()));
    for (column, value) in columns.iter().zip(&row.values) {
        object.insert(column.clone(), Value::String(value.clone()));
    }
    Value::Object(object)
}

impl Formatter for JsonFormatter {
    fn write<W: Write>(
        &self,
        metadata: &Metadata,
        table: &PriceTable,
        mut writer: W,
    ) -> Result<(), FormatError> {
        let time_column = metadata.columns.first().map_or("DATE", String::as_str);
        let rows = table
            .iter()
            .map(|row| row_object(time_column, table.columns(), row));

        match self.style {
            JsonStyle::Document => {
                let rows: Vec<Value> = rows.collect();
                let document = json!({
                    "metadata": MetadataView::new(metadata),
                    "rows": rows,
                });
                if self.pretty {
                    serde_json::to_writer_pretty(&mut writer, &document)?;
                } else {
                    serde_json::to_writer(&mut writer, &document)?;
                }
                writeln!(writer)?;
            }
            JsonStyle::Ndjson => {
                for row in rows {
                    serde_json::to_writer(&mut writer, &row)?;
                    writeln!(writer)?;
                }
            }
        }

        Ok(())
    }

    fn extension(&self) -> &str {
        match self.style {
            JsonStyle::Document => "json",
            JsonStyle::Ndjson => "ndjson",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = "NYSE\nINTERVAL=86400\nCOLUMNS=DATE,CLOSE,VOLUME\n\
        DATA_SESSIONS=[USA,570,960]\nTIMEZONE_OFFSET=-300\n\
        a1609459200,100,1000\n1,102,1100";

    fn render(formatter: &JsonFormatter) -> String {
        let (metadata, table) = tickfeed_decode::decode(FEED).unwrap();
        let mut out = Vec::new();
        formatter.write(&metadata, &table, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_json_document() {
        let result = render(&JsonFormatter::new());
        let value: Value = serde_json::from_str(&result).unwrap();

        assert_eq!(value["metadata"]["market"], "NYSE");
        assert_eq!(value["metadata"]["tick_seconds"], 86400);
        assert_eq!(value["metadata"]["timezone"], "UTC-05:00");
        assert_eq!(value["metadata"]["sessions"]["USA"]["start"], "09:30:00-05:00");
        assert_eq!(value["metadata"]["columns"][1], "CLOSE");

        let rows = value["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["DATE"], "2020-12-31T19:00:00-05:00");
        assert_eq!(rows[1]["CLOSE"], "102");
        assert_eq!(rows[1]["VOLUME"], "1100");
    }

    #[test]
    fn test_ndjson_rows() {
        let formatter = JsonFormatter::ndjson();
        assert_eq!(formatter.extension(), "ndjson");

        let result = render(&formatter);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        let row: Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(row["DATE"], "2021-01-01T19:00:00-05:00");
    }

    #[test]
    fn test_pretty_document() {
        let result = render(&JsonFormatter::new().with_pretty(true));
        assert!(result.contains("\n  \"metadata\": {"));
    }
}
