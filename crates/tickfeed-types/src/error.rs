//! Error types for tickfeed.

use thiserror::Error;

/// Result type alias for decode operations.
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Errors that can occur while decoding a price feed.
///
/// Line numbers are 1-based positions in the feed after surrounding
/// whitespace has been trimmed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The feed contained no market line.
    #[error("Empty input: no market line")]
    EmptyInput,

    /// The header never declared a `COLUMNS` field.
    #[error("Missing schema: no COLUMNS field in header")]
    MissingSchema,

    /// `DATA_SESSIONS` was declared without a `TIMEZONE_OFFSET` to localize it.
    #[error("Line {line}: DATA_SESSIONS declared without TIMEZONE_OFFSET")]
    MissingTimezone {
        /// Line of the `DATA_SESSIONS` field.
        line: usize,
    },

    /// A field that must be an integer was not.
    #[error("Line {line}: malformed {field} value '{value}'")]
    MalformedNumericField {
        /// Offending line.
        line: usize,
        /// Field name (header key or row time token).
        field: &'static str,
        /// Raw text that failed to parse.
        value: String,
    },

    /// A relative time offset appeared before any absolute timestamp.
    #[error("Line {line}: relative time offset without a preceding absolute timestamp")]
    MissingAnchor {
        /// Offending line.
        line: usize,
    },

    /// A relative time offset appeared but the header declared no `INTERVAL`.
    #[error("Line {line}: relative time offset but no INTERVAL in header")]
    MissingInterval {
        /// Offending line.
        line: usize,
    },

    /// A data row had a different number of values than the schema.
    #[error("Line {line}: expected {expected} values, found {found}")]
    RowFieldCountMismatch {
        /// Offending line.
        line: usize,
        /// Number of value columns in the schema.
        expected: usize,
        /// Number of values on the line.
        found: usize,
    },

    /// `TIMEZONE_OFFSET` is outside the representable range of a fixed offset.
    #[error("Line {line}: timezone offset {minutes} minutes is out of range")]
    InvalidTimezoneOffset {
        /// Line of the `TIMEZONE_OFFSET` field.
        line: usize,
        /// Declared offset in minutes.
        minutes: i64,
    },

    /// A session boundary does not fall within a single day.
    #[error("Line {line}: session {code} boundary {minutes} is not a time of day")]
    SessionOutOfRange {
        /// Line of the `DATA_SESSIONS` field.
        line: usize,
        /// Session code.
        code: String,
        /// Minutes since midnight, saturated at `u64::MAX`.
        minutes: u64,
    },

    /// A decoded timestamp is outside the supported date range.
    #[error("Line {line}: timestamp out of range")]
    TimestampOutOfRange {
        /// Offending line.
        line: usize,
    },
}

impl DecodeError {
    /// Returns the line that triggered the error, if the error is tied to one.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::EmptyInput | Self::MissingSchema => None,
            Self::MissingTimezone { line }
            | Self::MalformedNumericField { line, .. }
            | Self::MissingAnchor { line }
            | Self::MissingInterval { line }
            | Self::RowFieldCountMismatch { line, .. }
            | Self::InvalidTimezoneOffset { line, .. }
            | Self::SessionOutOfRange { line, .. }
            | Self::TimestampOutOfRange { line } => Some(*line),
        }
    }
}

/// Error converting string row values into typed [`Ohlcv`](crate::Ohlcv) bars.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoercionError {
    /// The table schema lacks a required column.
    #[error("Missing column: {0}")]
    MissingColumn(&'static str),

    /// A value could not be parsed as a number.
    #[error("Row {row}: invalid {column} value '{value}'")]
    InvalidValue {
        /// Zero-based row index.
        row: usize,
        /// Column name.
        column: &'static str,
        /// Raw value.
        value: String,
    },
}

/// Error returned when parsing an invalid period string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid period '{0}', expected <count><unit> with unit one of: Y, M, d, h, m")]
pub struct PeriodParseError(pub(crate) String);
