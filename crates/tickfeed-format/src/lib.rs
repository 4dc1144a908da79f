//! Output formatters for decoded tickfeed price tables.
//!
//! This crate provides formatters for writing metadata and rows:
//!
//! - [`TextFormatter`] - Indented metadata listing followed by an aligned table
//! - [`CsvFormatter`] - CSV rows with RFC 3339 timestamps
//! - [`JsonFormatter`] - JSON document or NDJSON rows

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickfeed/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod formatter;
mod json;
mod text;

pub use crate::csv::CsvFormatter;
pub use formatter::{FormatError, Formatter, OutputFormat};
pub use json::{JsonFormatter, JsonStyle};
pub use text::TextFormatter;

/// Formats a fixed offset as `UTC±HH:MM`.
pub(crate) fn format_offset(offset: chrono::FixedOffset) -> String {
    let secs = offset.local_minus_utc();
    let sign = if secs < 0 { '-' } else { '+' };
    let secs = secs.unsigned_abs();
    format!("UTC{sign}{:02}:{:02}", secs / 3600, (secs % 3600) / 60)
}
