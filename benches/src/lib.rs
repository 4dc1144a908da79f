//! Benchmark utilities for tickfeed.

use std::fmt::Write;

/// Shape of a synthesized feed.
#[derive(Debug, Clone, Copy)]
pub struct FeedConfig {
    /// Number of data rows.
    pub rows: usize,
    /// Seconds between rows.
    pub interval: i64,
    /// An absolute row is emitted every `anchor_every` rows.
    pub anchor_every: usize,
}

impl FeedConfig {
    /// Intraday five-minute feed with a new anchor each trading day.
    pub const fn intraday(rows: usize) -> Self {
        Self {
            rows,
            interval: 300,
            anchor_every: 78,
        }
    }
}

/// Builds a feed with sessions, a timezone and OHLCV rows.
pub fn synthesize_feed(config: FeedConfig) -> String {
    let mut feed = String::with_capacity(config.rows * 40 + 256);
    feed.push_str("NASDAQ\n");
    feed.push_str("MARKET_OPEN_MINUTE=570\n");
    feed.push_str("MARKET_CLOSE_MINUTE=960\n");
    let _ = writeln!(feed, "INTERVAL={}", config.interval);
    feed.push_str("COLUMNS=DATE,CLOSE,HIGH,LOW,OPEN,VOLUME\n");
    feed.push_str("DATA=\n");
    feed.push_str("DATA_SESSIONS=[UNKNOWN,570,960][PRE,240,570][POST,960,1200]\n");
    feed.push_str("TIMEZONE_OFFSET=-240\n");

    let mut anchor = 1_609_770_600_i64;
    for i in 0..config.rows {
        let offset = i % config.anchor_every;
        let close = 100.0 + (i % 50) as f64 * 0.25;
        if offset == 0 {
            if i > 0 {
                anchor += 86_400;
            }
            let _ = write!(feed, "a{anchor}");
        } else {
            let _ = write!(feed, "{offset}");
        }
        let _ = writeln!(
            feed,
            ",{close:.2},{:.2},{:.2},{:.2},{}",
            close + 0.5,
            close - 0.5,
            close - 0.1,
            1000 + i
        );
    }
    feed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesized_feed_decodes() {
        let feed = synthesize_feed(FeedConfig::intraday(200));
        let (metadata, table) = tickfeed_decode::decode(&feed).unwrap();
        assert_eq!(metadata.sessions.unwrap().len(), 3);
        assert_eq!(table.len(), 200);

        let rows = table.rows();
        assert_eq!((rows[1].timestamp - rows[0].timestamp).num_seconds(), 300);
        assert_eq!((rows[78].timestamp - rows[0].timestamp).num_seconds(), 86_400);
    }
}
