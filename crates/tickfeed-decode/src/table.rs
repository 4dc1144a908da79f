//! Data section decoding.
//!
//! Each data line is `<time>,<value>,...`. A time token of the form
//! `a<unix seconds>` is absolute and becomes the anchor; a plain integer `n`
//! means `anchor + n * tick`. Only absolute rows move the anchor.

use chrono::{DateTime, FixedOffset, TimeDelta, TimeZone};
use tickfeed_types::{DecodeError, Metadata, PriceRow, PriceTable};

/// Prefix marking an absolute timestamp.
const ABSOLUTE_MARKER: char = 'a';

/// Decodes data lines into a price table.
///
/// `first_line` is the 1-based feed line number of `lines[0]`, used in error
/// reports. Rows keep input order; timestamps are expressed in the feed
/// timezone, or UTC when the header declared none.
///
/// # Errors
///
/// - [`DecodeError::RowFieldCountMismatch`] if a line's value count differs
///   from the schema
/// - [`DecodeError::MalformedNumericField`] if a time token is not an integer
/// - [`DecodeError::MissingAnchor`] if a relative row precedes every absolute row
/// - [`DecodeError::MissingInterval`] if a relative row appears without `INTERVAL`
/// - [`DecodeError::TimestampOutOfRange`] if a timestamp cannot be represented
pub fn decode_rows(
    lines: &[&str],
    first_line: usize,
    metadata: &Metadata,
) -> Result<PriceTable, DecodeError> {
    let columns = metadata.value_columns().to_vec();
    let expected = columns.len();
    let zone = metadata.zone();
    let mut table = PriceTable::with_capacity(columns, lines.len());
    let mut anchor: Option<DateTime<FixedOffset>> = None;

    for (idx, line) in lines.iter().enumerate() {
        let line_no = first_line + idx;
        let mut fields = line.split(',');
        let token = fields.next().unwrap_or_default();
        let values: Vec<String> = fields.map(str::to_string).collect();

        if values.len() != expected {
            return Err(DecodeError::RowFieldCountMismatch {
                line: line_no,
                expected,
                found: values.len(),
            });
        }

        let timestamp = match token.strip_prefix(ABSOLUTE_MARKER) {
            Some(body) => {
                let seconds = parse_token(line_no, "absolute timestamp", body)?;
                let timestamp = zone
                    .timestamp_opt(seconds, 0)
                    .single()
                    .ok_or(DecodeError::TimestampOutOfRange { line: line_no })?;
                anchor = Some(timestamp);
                timestamp
            }
            None => {
                let offset = parse_token(line_no, "time offset", token)?;
                let anchor = anchor.ok_or(DecodeError::MissingAnchor { line: line_no })?;
                let tick = metadata
                    .tick
                    .ok_or(DecodeError::MissingInterval { line: line_no })?;
                offset_from(anchor, tick, offset)
                    .ok_or(DecodeError::TimestampOutOfRange { line: line_no })?
            }
        };

        table.push(PriceRow::new(timestamp, values));
    }

    Ok(table)
}

fn parse_token(line: usize, field: &'static str, token: &str) -> Result<i64, DecodeError> {
    token
        .trim()
        .parse()
        .map_err(|_| DecodeError::MalformedNumericField {
            line,
            field,
            value: token.to_string(),
        })
}

/// `anchor + ticks * tick`, or `None` on overflow.
fn offset_from(
    anchor: DateTime<FixedOffset>,
    tick: TimeDelta,
    ticks: i64,
) -> Option<DateTime<FixedOffset>> {
    let millis = tick.num_milliseconds().checked_mul(ticks)?;
    anchor.checked_add_signed(TimeDelta::try_milliseconds(millis)?)
}
