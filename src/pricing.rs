//! Time-of-use pricing tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sim::types::HOURS_PER_DAY;

/// Rank of the peak threshold within the ascending-sorted hourly prices.
///
/// `floor(0.75 * 24) = 18`, i.e. the 75th percentile of a 24-hour day.
const PEAK_RANK: usize = HOURS_PER_DAY * 3 / 4;

/// Named time-of-use tariff.
///
/// Each profile defines an off-peak band, a peak band, and a mid-peak price
/// for every other hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingProfile {
    /// Off-peak 00-06, peak 16-21.
    Standard,
    /// Off-peak 00-06, long peak 14-22.
    Summer,
    /// Off-peak 00-06, short peak 17-20.
    Winter,
}

/// Hour band of a profile: `[start, end)` at `price`.
struct Band {
    start: usize,
    end: usize,
    price: f64,
}

impl PricingProfile {
    /// Accepted profile names.
    pub const NAMES: &[&str] = &["standard", "summer", "winter"];

    /// Returns `(off_peak, peak, mid_peak)` for this profile.
    fn bands(self) -> (Band, Band, f64) {
        match self {
            Self::Standard => (
                Band { start: 0, end: 6, price: 0.08 },
                Band { start: 16, end: 21, price: 0.32 },
                0.15,
            ),
            Self::Summer => (
                Band { start: 0, end: 6, price: 0.09 },
                Band { start: 14, end: 22, price: 0.38 },
                0.17,
            ),
            Self::Winter => (
                Band { start: 0, end: 6, price: 0.07 },
                Band { start: 17, end: 20, price: 0.28 },
                0.14,
            ),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Summer => "summer",
            Self::Winter => "winter",
        }
    }
}

impl fmt::Display for PricingProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PricingProfile {
    type Err = ConfigError;

    /// Parses a profile name. Unknown names are rejected rather than
    /// silently mapped to some other tariff.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Self::Standard),
            "summer" => Ok(Self::Summer),
            "winter" => Ok(Self::Winter),
            other => Err(ConfigError::new(
                "pricing",
                format!(
                    "unknown pricing profile \"{other}\", available: {}",
                    Self::NAMES.join(", ")
                ),
            )),
        }
    }
}

/// Immutable hour-of-day to price mapping.
///
/// # Examples
///
/// ```
/// use energy_advisor::pricing::{PricingProfile, PricingTable};
///
/// let table = PricingTable::build(PricingProfile::Standard);
/// assert_eq!(table.price_at(3), 0.08);
/// assert_eq!(table.price_at(17), 0.32);
/// assert_eq!(table.price_at(24 + 3), 0.08);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingTable {
    /// Source profile, `None` for a custom table.
    profile: Option<PricingProfile>,
    prices: [f64; HOURS_PER_DAY],
}

impl PricingTable {
    /// Builds the 24-hour table for a named profile.
    pub fn build(profile: PricingProfile) -> Self {
        let (off_peak, peak, mid_peak) = profile.bands();
        let prices = std::array::from_fn(|hour| {
            if (off_peak.start..off_peak.end).contains(&hour) {
                off_peak.price
            } else if (peak.start..peak.end).contains(&hour) {
                peak.price
            } else {
                mid_peak
            }
        });
        Self {
            profile: Some(profile),
            prices,
        }
    }

    /// Builds a custom table from explicit hourly prices.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if any price is negative or not finite.
    pub fn from_prices(prices: [f64; HOURS_PER_DAY]) -> Result<Self, ConfigError> {
        if let Some(hour) = prices.iter().position(|p| !p.is_finite() || *p < 0.0) {
            return Err(ConfigError::new(
                format!("prices[{hour}]"),
                "must be a finite, nonnegative price",
            ));
        }
        Ok(Self {
            profile: None,
            prices,
        })
    }

    /// Price for `hour`, taken modulo 24.
    pub fn price_at(&self, hour: usize) -> f64 {
        self.prices[hour % HOURS_PER_DAY]
    }

    pub fn prices(&self) -> &[f64; HOURS_PER_DAY] {
        &self.prices
    }

    pub fn profile(&self) -> Option<PricingProfile> {
        self.profile
    }

    /// Sum of prices over `[start, start + hours)`, hours taken modulo 24.
    pub fn window_sum(&self, start: usize, hours: usize) -> f64 {
        (start..start + hours).map(|h| self.price_at(h)).sum()
    }

    /// Price at the 75th percentile rank of the sorted hourly prices.
    ///
    /// Hours priced at or above this value are treated as peak hours.
    pub fn peak_threshold(&self) -> f64 {
        let mut sorted = self.prices;
        sorted.sort_by(f64::total_cmp);
        sorted[PEAK_RANK]
    }

    /// Returns `true` if `hour` is priced at or above the peak threshold.
    pub fn is_peak(&self, hour: usize) -> bool {
        self.price_at(hour) >= self.peak_threshold()
    }
}
