//! Core types for the tickfeed price data decoder.
//!
//! This crate provides the data structures produced by a decode:
//!
//! - [`Metadata`] - Feed-level header fields (market, tick, sessions, timezone, columns)
//! - [`Session`] - A named trading-hours window localized to the feed timezone
//! - [`PriceTable`] / [`PriceRow`] - Timestamped rows with raw string values
//! - [`Ohlcv`] - Optional typed view over a table with OHLCV columns
//! - [`Period`] - History window requested from the endpoint

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickfeed/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod metadata;
mod ohlcv;
mod period;
mod table;

pub use error::{CoercionError, DecodeError, PeriodParseError, Result};
pub use metadata::{Metadata, Session};
pub use ohlcv::Ohlcv;
pub use period::{Period, PeriodUnit};
pub use table::{PriceRow, PriceTable};
