//! History window requested from the price endpoint.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::PeriodParseError;

/// Unit of a [`Period`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodUnit {
    /// Calendar years (`Y`).
    Year,
    /// Calendar months (`M`).
    Month,
    /// Days (`d`).
    Day,
    /// Hours (`h`).
    Hour,
    /// Minutes (`m`).
    Minute,
}

impl PeriodUnit {
    /// Returns the suffix used on the wire.
    #[must_use]
    pub const fn suffix(&self) -> char {
        match self {
            Self::Year => 'Y',
            Self::Month => 'M',
            Self::Day => 'd',
            Self::Hour => 'h',
            Self::Minute => 'm',
        }
    }

    const fn from_suffix(c: char) -> Option<Self> {
        match c {
            'Y' => Some(Self::Year),
            'M' => Some(Self::Month),
            'd' => Some(Self::Day),
            'h' => Some(Self::Hour),
            'm' => Some(Self::Minute),
            _ => None,
        }
    }
}

/// How far back to request history, e.g. `1M`, `6h`, `30m`.
///
/// Suffixes are case-sensitive: `M` is months, `m` is minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    count: u32,
    unit: PeriodUnit,
}

impl Period {
    /// Creates a period.
    #[must_use]
    pub const fn new(count: u32, unit: PeriodUnit) -> Self {
        Self { count, unit }
    }

    /// Number of units.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Unit of the period.
    #[must_use]
    pub const fn unit(&self) -> PeriodUnit {
        self.unit
    }
}

impl Default for Period {
    fn default() -> Self {
        Self::new(1, PeriodUnit::Month)
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.count, self.unit.suffix())
    }
}

impl FromStr for Period {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || PeriodParseError(s.to_string());
        let mut chars = s.chars();
        let unit = chars
            .next_back()
            .and_then(PeriodUnit::from_suffix)
            .ok_or_else(err)?;
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }
        let count = digits.parse().map_err(|_| err())?;
        if count == 0 {
            return Err(err());
        }
        Ok(Self::new(count, unit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_parse() {
        assert_eq!("1M".parse::<Period>().unwrap(), Period::new(1, PeriodUnit::Month));
        assert_eq!("30m".parse::<Period>().unwrap(), Period::new(30, PeriodUnit::Minute));
        assert_eq!("6h".parse::<Period>().unwrap(), Period::new(6, PeriodUnit::Hour));
        assert_eq!("2Y".parse::<Period>().unwrap(), Period::new(2, PeriodUnit::Year));
        assert_eq!("3d".parse::<Period>().unwrap(), Period::new(3, PeriodUnit::Day));
    }

    #[test]
    fn test_period_parse_invalid() {
        for bad in ["", "M", "1", "1x", "1w", "1D", "-1d", "0d", "1.5h", "1 d", "99999999999d"] {
            assert!(bad.parse::<Period>().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_period_display() {
        assert_eq!(Period::default().to_string(), "1M");
        assert_eq!(Period::new(30, PeriodUnit::Minute).to_string(), "30m");
    }
}
