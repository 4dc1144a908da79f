//! HTTP retrieval of getprices feeds for tickfeed.
//!
//! This crate provides the fetch collaborator around the decoder:
//!
//! - [`url::prices_url`] - Builds the endpoint query URL
//! - [`PriceQuery`] - Market, instrument, tick and period of a request
//! - [`PriceClient`] - Single-shot HTTP client returning raw or decoded feeds

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickfeed/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
pub mod url;

pub use client::{ClientConfig, FetchError, PriceClient, PriceQuery};
