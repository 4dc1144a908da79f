//! Rust library for retrieving and decoding getprices price feeds.
//!
//! This is a facade crate that re-exports functionality from the tickfeed
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use tickfeed_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PriceClient::with_defaults()?;
//!     let query = PriceQuery::new("NASDAQ", "GOOG")
//!         .with_tick(chrono::TimeDelta::minutes(5))
//!         .with_period("5d".parse()?);
//!
//!     let (metadata, table) = client.get_prices(&query).await?;
//!     println!("{}: {} rows", metadata.market, table.len());
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickfeed/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use tickfeed_types::*;

// Re-export the decoder
pub use tickfeed_decode::{Header, decode, decode_rows, parse_header};

// Re-export fetch functionality
#[cfg(feature = "fetch")]
pub use tickfeed_fetch::{ClientConfig, FetchError, PriceClient, PriceQuery, url};

// Re-export formatters
#[cfg(feature = "format")]
pub use tickfeed_format::{
    CsvFormatter, FormatError, Formatter, JsonFormatter, JsonStyle, OutputFormat, TextFormatter,
};

/// Prelude module for convenient imports.
///
/// ```
/// use tickfeed_lib::prelude::*;
/// ```
pub mod prelude {
    pub use tickfeed_types::{
        DecodeError, Metadata, Ohlcv, Period, PeriodUnit, PriceRow, PriceTable, Session,
    };

    pub use tickfeed_decode::decode;

    #[cfg(feature = "fetch")]
    pub use tickfeed_fetch::{ClientConfig, FetchError, PriceClient, PriceQuery};

    #[cfg(feature = "format")]
    pub use tickfeed_format::{
        CsvFormatter, Formatter, JsonFormatter, OutputFormat, TextFormatter,
    };
}
