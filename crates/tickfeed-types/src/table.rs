//! Decoded price rows.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::{CoercionError, Ohlcv};

/// One decoded data line.
///
/// Values are kept as the raw strings from the feed, positionally matching
/// [`PriceTable::columns`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceRow {
    /// Absolute timestamp of the row, in the feed timezone.
    pub timestamp: DateTime<FixedOffset>,
    /// Raw column values.
    pub values: Vec<String>,
}

impl PriceRow {
    /// Creates a new row.
    #[must_use]
    pub const fn new(timestamp: DateTime<FixedOffset>, values: Vec<String>) -> Self {
        Self { timestamp, values }
    }
}

/// Ordered sequence of rows keyed by timestamp.
///
/// Rows keep feed order, which the feed guarantees to be chronological.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PriceTable {
    columns: Vec<String>,
    rows: Vec<PriceRow>,
}

impl PriceTable {
    /// Creates an empty table for the given value columns.
    #[must_use]
    pub const fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Creates an empty table with room for `capacity` rows.
    #[must_use]
    pub fn with_capacity(columns: Vec<String>, capacity: usize) -> Self {
        Self {
            columns,
            rows: Vec::with_capacity(capacity),
        }
    }

    /// Appends a row. The caller keeps rows in non-decreasing timestamp order.
    pub fn push(&mut self, row: PriceRow) {
        debug_assert_eq!(row.values.len(), self.columns.len());
        self.rows.push(row);
    }

    /// Names of the value columns (the schema without the time column).
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All rows in feed order.
    #[must_use]
    pub fn rows(&self) -> &[PriceRow] {
        &self.rows
    }

    /// Iterates over rows in feed order.
    pub fn iter(&self) -> std::slice::Iter<'_, PriceRow> {
        self.rows.iter()
    }

    /// Number of rows.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First row.
    #[must_use]
    pub fn first(&self) -> Option<&PriceRow> {
        self.rows.first()
    }

    /// Last row.
    #[must_use]
    pub fn last(&self) -> Option<&PriceRow> {
        self.rows.last()
    }

    /// Finds the first row at the given instant.
    ///
    /// Relies on timestamps being non-decreasing.
    #[must_use]
    pub fn get<Tz: chrono::TimeZone>(&self, timestamp: &DateTime<Tz>) -> Option<&PriceRow> {
        let idx = self.rows.partition_point(|row| row.timestamp < *timestamp);
        self.rows.get(idx).filter(|row| row.timestamp == *timestamp)
    }

    /// Position of a value column.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Iterates over one column's raw values, or `None` if the column is unknown.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &str> + '_> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| row.values[idx].as_str()))
    }

    /// Raw value of a column in a given row.
    #[must_use]
    pub fn value(&self, row: usize, name: &str) -> Option<&str> {
        let idx = self.column_index(name)?;
        self.rows.get(row).map(|r| r.values[idx].as_str())
    }

    /// Converts the table to typed OHLCV bars.
    ///
    /// Requires `OPEN`, `HIGH`, `LOW`, `CLOSE` and `VOLUME` columns. Decoding
    /// never calls this; column semantics are left to the consumer.
    ///
    /// # Errors
    ///
    /// Returns an error if a column is missing or a value is not numeric.
    pub fn to_ohlcv(&self) -> Result<Vec<Ohlcv>, CoercionError> {
        let index = |name: &'static str| {
            self.column_index(name)
                .ok_or(CoercionError::MissingColumn(name))
        };
        let fields = [
            ("OPEN", index("OPEN")?),
            ("HIGH", index("HIGH")?),
            ("LOW", index("LOW")?),
            ("CLOSE", index("CLOSE")?),
            ("VOLUME", index("VOLUME")?),
        ];

        self.rows
            .iter()
            .enumerate()
            .map(|(row_idx, row)| {
                let mut parsed = [0.0_f64; 5];
                for (slot, (column, idx)) in parsed.iter_mut().zip(fields) {
                    let raw = &row.values[idx];
                    *slot = raw.trim().parse().map_err(|_| CoercionError::InvalidValue {
                        row: row_idx,
                        column,
                        value: raw.clone(),
                    })?;
                }
                let [open, high, low, close, volume] = parsed;
                Ok(Ohlcv::new(row.timestamp, open, high, low, close, volume))
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a PriceTable {
    type Item = &'a PriceRow;
    type IntoIter = std::slice::Iter<'a, PriceRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn est() -> FixedOffset {
        FixedOffset::west_opt(5 * 3600).unwrap()
    }

    fn row(ts: i64, values: &[&str]) -> PriceRow {
        PriceRow::new(
            est().timestamp_opt(ts, 0).unwrap(),
            values.iter().map(|v| (*v).to_string()).collect(),
        )
    }

    fn sample_table() -> PriceTable {
        let columns = ["CLOSE", "HIGH", "LOW", "OPEN", "VOLUME"]
            .iter()
            .map(|c| (*c).to_string())
            .collect();
        let mut table = PriceTable::new(columns);
        table.push(row(1_609_459_200, &["100", "105", "95", "98", "1000"]));
        table.push(row(1_609_545_600, &["102", "106", "96", "99", "1100"]));
        table
    }

    #[test]
    fn test_table_accessors() {
        let table = sample_table();
        assert_eq!(table.len(), 2);
        assert!(!table.is_empty());
        assert_eq!(table.first().unwrap().values[0], "100");
        assert_eq!(table.last().unwrap().values[0], "102");
        assert_eq!(table.value(1, "VOLUME"), Some("1100"));
        assert_eq!(table.value(2, "VOLUME"), None);
        assert_eq!(table.value(0, "MISSING"), None);
    }

    #[test]
    fn test_column_values() {
        let table = sample_table();
        let highs: Vec<_> = table.column("HIGH").unwrap().collect();
        assert_eq!(highs, vec!["105", "106"]);
        assert!(table.column("DATE").is_none());
    }

    #[test]
    fn test_get_by_timestamp_any_zone() {
        let table = sample_table();
        let utc = Utc.with_ymd_and_hms(2021, 1, 2, 0, 0, 0).unwrap();
        assert_eq!(table.get(&utc).unwrap().values[0], "102");

        let missing = Utc.with_ymd_and_hms(2021, 1, 3, 0, 0, 0).unwrap();
        assert!(table.get(&missing).is_none());
    }

    #[test]
    fn test_to_ohlcv() {
        let bars = sample_table().to_ohlcv().unwrap();
        assert_eq!(bars.len(), 2);
        assert!((bars[0].open - 98.0).abs() < 1e-10);
        assert!((bars[0].close - 100.0).abs() < 1e-10);
        assert!((bars[1].volume - 1100.0).abs() < 1e-10);
    }

    #[test]
    fn test_to_ohlcv_errors() {
        let mut table = PriceTable::new(vec!["CLOSE".to_string()]);
        table.push(row(0, &["1"]));
        assert_eq!(
            table.to_ohlcv(),
            Err(CoercionError::MissingColumn("OPEN"))
        );

        let mut table = sample_table();
        table.push(row(1_609_632_000, &["x", "1", "1", "1", "1"]));
        assert!(matches!(
            table.to_ohlcv(),
            Err(CoercionError::InvalidValue { row: 2, column: "CLOSE", .. })
        ));
    }
}
