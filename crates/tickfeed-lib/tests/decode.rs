//! End-to-end decoding through the facade crate.

use chrono::{FixedOffset, NaiveTime, TimeDelta, TimeZone, Utc};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use tickfeed_lib::prelude::*;

const NYSE_FEED: &str = "NYSE
INTERVAL=86400
COLUMNS=DATE,CLOSE,HIGH,LOW,OPEN,VOLUME
TIMEZONE_OFFSET=-300
a1609459200,100,105,95,98,1000
1,102,106,96,99,1100
";

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

fn rows_start() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap()
}

#[test]
fn decodes_daily_feed() {
    let (metadata, table) = decode(NYSE_FEED).unwrap();

    assert_eq!(metadata.market, "NYSE");
    assert_eq!(metadata.tick, Some(TimeDelta::seconds(86400)));
    assert_eq!(metadata.timezone, FixedOffset::west_opt(5 * 3600));
    assert_eq!(metadata.sessions, None);
    assert_eq!(
        table.columns(),
        strings(&["CLOSE", "HIGH", "LOW", "OPEN", "VOLUME"])
    );

    let rows = table.rows();
    assert_eq!(rows.len(), 2);

    let first = rows_start();
    assert_eq!(rows[0].timestamp, first);
    assert_eq!(rows[0].timestamp.offset().local_minus_utc(), -5 * 3600);
    assert_eq!(rows[0].values, strings(&["100", "105", "95", "98", "1000"]));

    assert_eq!(rows[1].timestamp, first + TimeDelta::days(1));
    assert_eq!(rows[1].timestamp.offset().local_minus_utc(), -5 * 3600);
    assert_eq!(rows[1].values, strings(&["102", "106", "96", "99", "1100"]));

    assert_eq!(table.get(&first).map(|r| &r.values[0]), Some(&"100".to_string()));
}

#[test]
fn decoding_is_deterministic() {
    assert_eq!(decode(NYSE_FEED).unwrap(), decode(NYSE_FEED).unwrap());
}

#[test]
fn market_label_round_trips_through_percent_encoding() {
    for label in ["NYSE", "NASDAQ GM", "TSE:1/2", "Bolsa de Valores & Mercados", "東証"] {
        let encoded = utf8_percent_encode(label, NON_ALPHANUMERIC).to_string();
        let feed = format!("{encoded}\nCOLUMNS=DATE,CLOSE\n");
        let (metadata, _) = decode(&feed).unwrap();
        assert_eq!(metadata.market, label);
    }
}

#[test]
fn sessions_localized_regardless_of_header_order() {
    let offset_first = "NASDAQ\nINTERVAL=60\nTIMEZONE_OFFSET=-240\n\
        DATA_SESSIONS=[UNKNOWN,570,960]\nCOLUMNS=DATE,CLOSE\na1000,1";
    let offset_last = "NASDAQ\nINTERVAL=60\nDATA_SESSIONS=[UNKNOWN,570,960]\n\
        COLUMNS=DATE,CLOSE\nTIMEZONE_OFFSET=-240\na1000,1";

    let (first, _) = decode(offset_first).unwrap();
    let (last, _) = decode(offset_last).unwrap();
    assert_eq!(first, last);

    let zone = FixedOffset::west_opt(4 * 3600).unwrap();
    let session = last.session("UNKNOWN").unwrap();
    assert_eq!(session.offset(), zone);
    assert_eq!(session.start(), NaiveTime::from_hms_opt(9, 30, 0).unwrap());
    assert_eq!(session.end(), NaiveTime::from_hms_opt(16, 0, 0).unwrap());
}

#[test]
fn relative_rows_follow_most_recent_anchor() {
    let feed = "X\nINTERVAL=300\nCOLUMNS=DATE,CLOSE\n\
        a1609459200,1\n1,2\n3,3\na1609545600,4\n1,5\n2,6";
    let (_, table) = decode(feed).unwrap();

    let tick = TimeDelta::seconds(300);
    let first = Utc.timestamp_opt(1_609_459_200, 0).unwrap();
    let second = Utc.timestamp_opt(1_609_545_600, 0).unwrap();
    let expected = [
        first,
        first + tick,
        first + tick * 3,
        second,
        second + tick,
        second + tick * 2,
    ];
    let actual: Vec<_> = table.iter().map(|r| r.timestamp).collect();
    assert_eq!(actual, expected);
}

#[test]
fn relative_row_without_anchor() {
    assert_eq!(
        decode("MARKET\nCOLUMNS=DATE,CLOSE\n5,10.0"),
        Err(DecodeError::MissingAnchor { line: 3 })
    );
}

#[test]
fn header_without_columns() {
    assert_eq!(
        decode("MARKET\nINTERVAL=86400\n"),
        Err(DecodeError::MissingSchema)
    );
}

#[test]
fn sessions_without_timezone() {
    assert_eq!(
        decode("MARKET\nDATA_SESSIONS=[USA,570,960]\nCOLUMNS=DATE,CLOSE\na1000,1"),
        Err(DecodeError::MissingTimezone { line: 2 })
    );
}

#[test]
fn empty_input() {
    assert_eq!(decode(""), Err(DecodeError::EmptyInput));
}

#[test]
fn typed_view_over_decoded_rows() {
    let (_, table) = decode(NYSE_FEED).unwrap();
    let bars = table.to_ohlcv().unwrap();
    assert_eq!(bars.len(), 2);
    assert_eq!(bars[0].timestamp, rows_start());
    assert!((bars[0].open - 98.0).abs() < 1e-10);
    assert!((bars[0].close - 100.0).abs() < 1e-10);
    assert!((bars[1].high - 106.0).abs() < 1e-10);
    assert!((bars[1].low - 96.0).abs() < 1e-10);
    assert!((bars[1].volume - 1100.0).abs() < 1e-10);
}
