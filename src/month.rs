// 📅 Month Index - validated 0..=11 month key
//
// Revenue is keyed by month number, January = 0 ... December = 11.
// A MonthIndex can only be built through validation, so any map keyed by it
// holds valid months only.

use crate::error::{CompensationError, CompensationResult};
use chrono::{Datelike, Month, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MONTHS_PER_YEAR: u8 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct MonthIndex(u8);

impl MonthIndex {
    /// Validate a raw month number (0 = January, 11 = December)
    pub fn new(month: i32) -> CompensationResult<Self> {
        if (0..MONTHS_PER_YEAR as i32).contains(&month) {
            Ok(MonthIndex(month as u8))
        } else {
            Err(CompensationError::invalid_argument(
                "month",
                format!("must be between 0 and 11, got {}", month),
            ))
        }
    }

    /// Month of a calendar date
    pub fn from_date(date: NaiveDate) -> Self {
        // month0() is always in 0..=11
        MonthIndex(date.month0() as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn to_chrono(&self) -> Month {
        // 12 constants in order, indexed by a value known to be < 12
        const MONTHS: [Month; 12] = [
            Month::January,
            Month::February,
            Month::March,
            Month::April,
            Month::May,
            Month::June,
            Month::July,
            Month::August,
            Month::September,
            Month::October,
            Month::November,
            Month::December,
        ];
        MONTHS[self.0 as usize]
    }

    /// English calendar name ("January", ...)
    pub fn name(&self) -> &'static str {
        self.to_chrono().name()
    }

    /// All twelve months in calendar order
    pub fn all() -> impl Iterator<Item = MonthIndex> {
        (0..MONTHS_PER_YEAR).map(MonthIndex)
    }
}

impl TryFrom<i32> for MonthIndex {
    type Error = CompensationError;

    fn try_from(month: i32) -> Result<Self, Self::Error> {
        MonthIndex::new(month)
    }
}

impl From<MonthIndex> for i32 {
    fn from(month: MonthIndex) -> Self {
        month.0 as i32
    }
}

impl fmt::Display for MonthIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// TESTS
// ============================================================================
