//! `getprices` URL construction.

use reqwest::Url;
use tickfeed_types::Period;

/// Default endpoint for the price feed.
pub const BASE_URL: &str = "https://www.google.com/finance/getprices";

/// Columns requested from the feed: date, open, high, low, close, volume.
pub const FIELDS: &str = "d,o,h,l,c,v";

/// Builds the request URL for a price query.
///
/// Query format: `{base}?f=d,o,h,l,c,v&x={market}&q={code}&i={seconds}&p={period}`
/// with every value form-urlencoded.
///
/// # Example
///
/// ```
/// use tickfeed_fetch::url::{BASE_URL, prices_url};
/// use tickfeed_types::Period;
///
/// let url = prices_url(BASE_URL, "NYSE", "IBM", 86400, Period::default()).unwrap();
/// assert_eq!(
///     url.as_str(),
///     "https://www.google.com/finance/getprices?f=d%2Co%2Ch%2Cl%2Cc%2Cv&x=NYSE&q=IBM&i=86400&p=1M"
/// );
/// ```
///
/// # Errors
///
/// Returns an error if `base` is not a valid URL.
pub fn prices_url(
    base: &str,
    market: &str,
    code: &str,
    tick_seconds: i64,
    period: Period,
) -> Result<Url, ::url::ParseError> {
    Url::parse_with_params(
        base,
        &[
            ("f", FIELDS.to_string()),
            ("x", market.to_string()),
            ("q", code.to_string()),
            ("i", tick_seconds.to_string()),
            ("p", period.to_string()),
        ],
    )
}
