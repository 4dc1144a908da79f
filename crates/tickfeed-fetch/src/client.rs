//! HTTP client for the `getprices` endpoint.

use chrono::TimeDelta;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tickfeed_types::{DecodeError, Metadata, Period, PriceTable};

use crate::url::{BASE_URL, prices_url};

/// Configuration for the price client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Endpoint the query parameters are appended to.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
            user_agent: format!("tickfeed/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Errors that can occur while retrieving a feed.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] ::url::ParseError),

    /// Transport failure: unreachable host, timeout or unreadable body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("Server error: {status}")]
    ServerError {
        /// HTTP status code.
        status: u16,
    },

    /// The response body could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl FetchError {
    /// Returns true for failures of the transport rather than of the feed contents.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::ServerError { .. })
    }
}

/// Parameters of a single price request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceQuery {
    /// Exchange code, passed through unvalidated.
    pub market: String,
    /// Instrument code, passed through unvalidated.
    pub code: String,
    /// Requested spacing between rows.
    pub tick: TimeDelta,
    /// How far back to request history.
    pub period: Period,
}

impl PriceQuery {
    /// Creates a query for daily rows over the last month.
    #[must_use]
    pub fn new(market: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            market: market.into(),
            code: code.into(),
            tick: TimeDelta::days(1),
            period: Period::default(),
        }
    }

    /// Sets the row spacing.
    #[must_use]
    pub fn with_tick(mut self, tick: TimeDelta) -> Self {
        self.tick = tick;
        self
    }

    /// Sets the history window.
    #[must_use]
    pub fn with_period(mut self, period: Period) -> Self {
        self.period = period;
        self
    }
}

/// HTTP client for price feeds.
///
/// Each call performs exactly one request; failures are not retried.
#[derive(Debug, Clone)]
pub struct PriceClient {
    client: Client,
    config: ClientConfig,
}

impl PriceClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;
        Ok(Self { client, config })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(ClientConfig::default())
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Downloads the raw feed text for a query.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] on transport failure and
    /// [`FetchError::ServerError`] on a non-success status.
    pub async fn fetch_raw(&self, query: &PriceQuery) -> Result<String, FetchError> {
        let url = prices_url(
            &self.config.base_url,
            &query.market,
            &query.code,
            query.tick.num_seconds(),
            query.period,
        )?;
        tracing::info!(%url, "requesting price feed");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::ServerError {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        tracing::debug!(bytes = body.len(), "received price feed");
        Ok(body)
    }

    /// Downloads and decodes a price feed.
    ///
    /// # Errors
    ///
    /// Returns a transport error from [`fetch_raw`](Self::fetch_raw) or a
    /// [`FetchError::Decode`] if the body is not a valid feed.
    pub async fn get_prices(
        &self,
        query: &PriceQuery,
    ) -> Result<(Metadata, PriceTable), FetchError> {
        let raw = self.fetch_raw(query).await?;
        Ok(tickfeed_decode::decode(&raw)?)
    }
}
