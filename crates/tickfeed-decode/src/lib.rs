//! Header parser and delta-timestamp decoder for tickfeed price feeds.
//!
//! Decoding is a single linear pass:
//!
//! - [`header::parse_header`] - Market label and `KEY=VALUE` metadata, up to
//!   the first line that is not a header field
//! - [`table::decode_rows`] - Data lines into a [`PriceTable`], rebuilding
//!   absolute timestamps from anchor rows and tick offsets
//! - [`decode`] - Both stages over a raw feed

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickfeed/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod header;
pub mod table;

pub use header::{Header, parse_header};
pub use table::decode_rows;

use tickfeed_types::{DecodeError, Metadata, PriceTable};

/// Decodes a raw feed into metadata and a price table.
///
/// Surrounding whitespace is ignored. The call performs no I/O and holds no
/// shared state, so independent feeds may be decoded concurrently.
///
/// # Example
///
/// ```
/// let feed = "NYSE\nINTERVAL=60\nCOLUMNS=DATE,CLOSE\na1609459200,100\n1,101";
/// let (metadata, table) = tickfeed_decode::decode(feed).unwrap();
/// assert_eq!(metadata.market, "NYSE");
/// assert_eq!(table.len(), 2);
/// ```
///
/// # Errors
///
/// Returns the first [`DecodeError`] encountered; no partial result is
/// produced.
pub fn decode(text: &str) -> Result<(Metadata, PriceTable), DecodeError> {
    let lines: Vec<&str> = text.trim().lines().collect();
    let Header {
        metadata,
        data_start,
    } = parse_header(&lines)?;

    let table = decode_rows(&lines[data_start..], data_start + 1, &metadata)?;
    tracing::debug!(
        market = %metadata.market,
        rows = table.len(),
        "decoded price feed"
    );

    Ok((metadata, table))
}
