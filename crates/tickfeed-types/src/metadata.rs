//! Feed metadata and trading sessions.

use chrono::{FixedOffset, NaiveTime, Offset, TimeDelta, Utc};
use std::collections::BTreeMap;

/// A named trading-hours window.
///
/// Start and end are times of day in the feed's timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Session {
    start: NaiveTime,
    end: NaiveTime,
    offset: FixedOffset,
}

impl Session {
    /// Creates a session from local start and end times.
    #[must_use]
    pub const fn new(start: NaiveTime, end: NaiveTime, offset: FixedOffset) -> Self {
        Self { start, end, offset }
    }

    /// Local start time of the session.
    #[must_use]
    pub const fn start(&self) -> NaiveTime {
        self.start
    }

    /// Local end time of the session.
    #[must_use]
    pub const fn end(&self) -> NaiveTime {
        self.end
    }

    /// Timezone the start and end times are expressed in.
    #[must_use]
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Returns true if the local time of day falls within `[start, end)`.
    #[must_use]
    pub fn contains(&self, time: NaiveTime) -> bool {
        if self.start <= self.end {
            time >= self.start && time < self.end
        } else {
            time >= self.start || time < self.end
        }
    }
}

/// Metadata decoded from the feed header.
///
/// Built once per decode and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    /// Exchange or source label, percent-decoded.
    pub market: String,
    /// Nominal spacing between data points (`INTERVAL`).
    pub tick: Option<TimeDelta>,
    /// Trading sessions keyed by session code (`DATA_SESSIONS`).
    pub sessions: Option<BTreeMap<String, Session>>,
    /// Fixed UTC offset of the feed (`TIMEZONE_OFFSET`).
    pub timezone: Option<FixedOffset>,
    /// Row schema (`COLUMNS`), including the leading time column.
    pub columns: Vec<String>,
}

impl Metadata {
    /// Returns the zone row timestamps are expressed in.
    ///
    /// Falls back to UTC when the header declares no offset.
    #[must_use]
    pub fn zone(&self) -> FixedOffset {
        self.timezone.unwrap_or_else(|| Utc.fix())
    }

    /// Returns the column names that follow the time column.
    #[must_use]
    pub fn value_columns(&self) -> &[String] {
        self.columns.get(1..).unwrap_or_default()
    }

    /// Looks up a session by code.
    #[must_use]
    pub fn session(&self, code: &str) -> Option<&Session> {
        self.sessions.as_ref()?.get(code)
    }
}
