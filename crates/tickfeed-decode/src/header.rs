//! Feed header parsing.
//!
//! The header is the market label on line 0 followed by `KEY=VALUE` lines.
//! The scan stops at the first line that does not contain `=`; that line is
//! the first data line. There is no fixed header length.

use chrono::{FixedOffset, NaiveTime, TimeDelta};
use percent_encoding::percent_decode_str;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tickfeed_types::{DecodeError, Metadata, Session};

/// Matches one `[CODE,START,END]` session triple.
static SESSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([A-Z0-9]+),([0-9]+),([0-9]+)\]").expect("session pattern is valid")
});

const MINUTES_PER_DAY: u64 = 24 * 60;

/// Parsed header and the position where data lines begin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Decoded metadata.
    pub metadata: Metadata,
    /// Index into the input lines of the first data line.
    ///
    /// Equal to the number of lines when the feed has no data section.
    pub data_start: usize,
}

/// Session boundaries as minutes since midnight, before localization.
#[derive(Debug)]
struct RawSession {
    code: String,
    start: u64,
    end: u64,
}

/// Header fields collected during the scan, before cross-field validation.
#[derive(Debug, Default)]
struct HeaderFields {
    tick: Option<TimeDelta>,
    columns: Option<Vec<String>>,
    sessions: Option<(usize, Vec<RawSession>)>,
    timezone: Option<FixedOffset>,
}

/// Parses the header from the feed lines.
///
/// `lines[0]` is the market label. Unknown keys are ignored, as are
/// `DATA_SESSIONS` entries that do not match the `[CODE,START,END]` pattern.
/// Sessions are localized after the whole header has been read, so
/// `TIMEZONE_OFFSET` may appear before or after `DATA_SESSIONS`.
///
/// # Errors
///
/// - [`DecodeError::EmptyInput`] if there is no market line
/// - [`DecodeError::MalformedNumericField`] if `INTERVAL` or
///   `TIMEZONE_OFFSET` is not an integer
/// - [`DecodeError::InvalidTimezoneOffset`] if the offset is a day or more
/// - [`DecodeError::MissingSchema`] if `COLUMNS` is absent or empty
/// - [`DecodeError::MissingTimezone`] if sessions are declared without an offset
/// - [`DecodeError::SessionOutOfRange`] if a session boundary is not a time of day
pub fn parse_header(lines: &[&str]) -> Result<Header, DecodeError> {
    let market_line = lines
        .first()
        .filter(|line| !line.trim().is_empty())
        .ok_or(DecodeError::EmptyInput)?;
    let market = percent_decode_str(market_line).decode_utf8_lossy().into_owned();

    let mut fields = HeaderFields::default();
    let data_start = lines
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, line)| !line.contains('='))
        .map_or(lines.len(), |(idx, _)| idx);

    for (idx, line) in lines[1..data_start].iter().enumerate() {
        let line_no = idx + 2;
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        fields.apply(line_no, key, value)?;
    }

    let columns = fields
        .columns
        .filter(|columns| !columns.is_empty())
        .ok_or(DecodeError::MissingSchema)?;

    let sessions = match fields.sessions {
        Some((line, raw)) => {
            let offset = fields
                .timezone
                .ok_or(DecodeError::MissingTimezone { line })?;
            Some(localize_sessions(line, raw, offset)?)
        }
        None => None,
    };

    tracing::debug!(
        market = %market,
        header_lines = data_start,
        columns = columns.len(),
        sessions = sessions.as_ref().map_or(0, BTreeMap::len),
        "parsed feed header"
    );

    Ok(Header {
        metadata: Metadata {
            market,
            tick: fields.tick,
            sessions,
            timezone: fields.timezone,
            columns,
        },
        data_start,
    })
}

impl HeaderFields {
    fn apply(&mut self, line: usize, key: &str, value: &str) -> Result<(), DecodeError> {
        match key {
            "INTERVAL" => {
                let seconds = parse_integer(line, "INTERVAL", value)?;
                let tick = TimeDelta::try_seconds(seconds).ok_or_else(|| {
                    DecodeError::MalformedNumericField {
                        line,
                        field: "INTERVAL",
                        value: value.to_string(),
                    }
                })?;
                self.tick = Some(tick);
            }
            "COLUMNS" => {
                let value = value.trim();
                self.columns = Some(if value.is_empty() {
                    Vec::new()
                } else {
                    value.split(',').map(str::to_string).collect()
                });
            }
            "DATA_SESSIONS" => {
                self.sessions = Some((line, parse_sessions(value)));
            }
            "TIMEZONE_OFFSET" => {
                let minutes = parse_integer(line, "TIMEZONE_OFFSET", value)?;
                let offset = minutes
                    .checked_mul(60)
                    .and_then(|secs| i32::try_from(secs).ok())
                    .and_then(FixedOffset::east_opt)
                    .ok_or(DecodeError::InvalidTimezoneOffset { line, minutes })?;
                self.timezone = Some(offset);
            }
            _ => tracing::trace!(line, key, "ignoring unknown header field"),
        }
        Ok(())
    }
}

fn parse_integer(line: usize, field: &'static str, value: &str) -> Result<i64, DecodeError> {
    value
        .trim()
        .parse()
        .map_err(|_| DecodeError::MalformedNumericField {
            line,
            field,
            value: value.to_string(),
        })
}

/// Collects every session triple matching the pattern; anything else is skipped.
fn parse_sessions(value: &str) -> Vec<RawSession> {
    SESSION_PATTERN
        .captures_iter(value)
        .map(|caps| RawSession {
            code: caps[1].to_string(),
            start: parse_minutes(&caps[2]),
            end: parse_minutes(&caps[3]),
        })
        .collect()
}

/// The pattern only admits digits, so the only failure is overflow.
fn parse_minutes(digits: &str) -> u64 {
    digits.parse().unwrap_or(u64::MAX)
}

fn localize_sessions(
    line: usize,
    raw: Vec<RawSession>,
    offset: FixedOffset,
) -> Result<BTreeMap<String, Session>, DecodeError> {
    raw.into_iter()
        .map(|session| {
            let start = time_of_day(line, &session.code, session.start)?;
            let end = time_of_day(line, &session.code, session.end)?;
            Ok((session.code, Session::new(start, end, offset)))
        })
        .collect()
}

fn time_of_day(line: usize, code: &str, minutes: u64) -> Result<NaiveTime, DecodeError> {
    let out_of_range = || DecodeError::SessionOutOfRange {
        line,
        code: code.to_string(),
        minutes,
    };
    if minutes >= MINUTES_PER_DAY {
        return Err(out_of_range());
    }
    let minutes = u32::try_from(minutes).map_err(|_| out_of_range())?;
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).ok_or_else(out_of_range)
}
