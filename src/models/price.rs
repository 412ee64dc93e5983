use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{CoinGeckoError, Result};

// ---------------------------------------------------------------------------
// PricePoint: One coin's price on one day
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub id: String,
    pub date: NaiveDate,
    pub price: f64,
}

// ---------------------------------------------------------------------------
// DayRange: Lookback window for history requests
// ---------------------------------------------------------------------------

/// How far back a history request reaches: a fixed number of days or
/// everything the API has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayRange {
    Days(NonZeroU32),
    #[default]
    Max,
}

impl DayRange {
    /// A fixed lookback of `n` days. Zero is rejected.
    pub fn days(n: u32) -> Result<Self> {
        NonZeroU32::new(n)
            .map(DayRange::Days)
            .ok_or_else(|| CoinGeckoError::InvalidArgument("day range must be positive".into()))
    }
}

/// Renders the value the `days` query parameter expects.
impl fmt::Display for DayRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayRange::Days(n) => write!(f, "{}", n),
            DayRange::Max => f.write_str("max"),
        }
    }
}

impl FromStr for DayRange {
    type Err = CoinGeckoError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("max") {
            return Ok(DayRange::Max);
        }
        let n: u32 = s.parse().map_err(|_| {
            CoinGeckoError::InvalidArgument(format!(
                "day range must be a positive integer or \"max\", got {:?}",
                s
            ))
        })?;
        DayRange::days(n)
    }
}

// ---------------------------------------------------------------------------
// DateBasis: Timestamp to calendar date rule
// ---------------------------------------------------------------------------

/// Time zone used when truncating a sample timestamp to its calendar date.
///
/// `Local` depends on the machine's zone, so samples near midnight can land
/// on different dates on different hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateBasis {
    #[default]
    Utc,
    Local,
}

impl DateBasis {
    /// Calendar date of a millisecond Unix timestamp, or `None` if it is out of range.
    pub fn date_from_millis(self, millis: i64) -> Option<NaiveDate> {
        let utc = DateTime::from_timestamp_millis(millis)?;
        Some(match self {
            DateBasis::Utc => utc.date_naive(),
            DateBasis::Local => utc.with_timezone(&Local).date_naive(),
        })
    }
}

impl fmt::Display for DateBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateBasis::Utc => f.write_str("utc"),
            DateBasis::Local => f.write_str("local"),
        }
    }
}

// ---------------------------------------------------------------------------
// PriceTable: Per-coin series stacked in rank order
// ---------------------------------------------------------------------------

/// Vertical stack of per-coin price series.
///
/// Series keep the order they were appended in and rows keep their order
/// within a series. Nothing is sorted or deduplicated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceTable {
    series: Vec<Vec<PricePoint>>,
}

impl PriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stack the given series in order.
    pub fn concat<I>(series: I) -> Self
    where
        I: IntoIterator<Item = Vec<PricePoint>>,
    {
        Self {
            series: series.into_iter().collect(),
        }
    }

    /// Append one coin's series below everything already in the table.
    pub fn push_series(&mut self, series: Vec<PricePoint>) {
        self.series.push(series);
    }

    /// Total number of rows across all series.
    pub fn len(&self) -> usize {
        self.series.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    pub fn series(&self) -> &[Vec<PricePoint>] {
        &self.series
    }

    /// All rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &PricePoint> {
        self.series.iter().flatten()
    }

    /// All rows paired with their position inside their own series.
    ///
    /// The index restarts at zero at the start of each series; this is the
    /// row-index column of the CSV export.
    pub fn indexed_rows(&self) -> impl Iterator<Item = (usize, &PricePoint)> {
        self.series.iter().flat_map(|s| s.iter().enumerate())
    }

    pub fn into_rows(self) -> Vec<PricePoint> {
        self.series.into_iter().flatten().collect()
    }
}

impl FromIterator<Vec<PricePoint>> for PriceTable {
    fn from_iter<I: IntoIterator<Item = Vec<PricePoint>>>(iter: I) -> Self {
        Self::concat(iter)
    }
}
