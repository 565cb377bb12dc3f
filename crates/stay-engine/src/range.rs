//! Calendar-date ranges and the lookahead horizon.
//!
//! Every range in this crate is half-open: `[start, end)` counted in whole days,
//! so a stay from the 10th to the 15th occupies five nights and the listing is
//! free again on the 15th.

use std::fmt;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StayError};

/// A raw booked interval exactly as a calendar source reported it.
///
/// Nothing is validated here; a feed may well report an event whose end is not
/// after its start. Such candidates are rejected when converted to a
/// [`DateRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookedRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl BookedRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }
}

/// A non-empty half-open date interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "BookedRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting empty or inverted intervals.
    ///
    /// # Errors
    /// Returns `StayError::MalformedRange` when `start >= end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start >= end {
            return Err(StayError::MalformedRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Length of the range in nights. Always at least 1.
    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Whether the night starting on `date` falls inside the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    /// Two ranges overlap iff `a.start < b.end && b.start < a.end`.
    /// Touching ranges (one ends the day the other starts) do not overlap.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Smallest range covering both `self` and `other`.
    pub fn hull(&self, other: &DateRange) -> DateRange {
        DateRange {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl TryFrom<BookedRange> for DateRange {
    type Error = StayError;

    fn try_from(raw: BookedRange) -> Result<Self> {
        DateRange::new(raw.start, raw.end)
    }
}

impl From<DateRange> for BookedRange {
    fn from(range: DateRange) -> Self {
        BookedRange::new(range.start, range.end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// The lookahead window `[today, today + days)` availability is computed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Horizon {
    today: NaiveDate,
    end: NaiveDate,
}

impl Horizon {
    /// Build the horizon starting at `today`. Saturates at `NaiveDate::MAX`.
    pub fn new(today: NaiveDate, days: u32) -> Self {
        let end = today
            .checked_add_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MAX);
        Self { today, end }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Earliest date a new stay may begin: the day after `today`.
    pub fn first_check_in(&self) -> NaiveDate {
        self.today.succ_opt().unwrap_or(self.today)
    }

    /// Clip `range` to the horizon, or `None` when it lies entirely outside.
    pub fn clip(&self, range: &DateRange) -> Option<DateRange> {
        if range.end <= self.today || range.start >= self.end {
            return None;
        }
        Some(DateRange {
            start: range.start.max(self.today),
            end: range.end.min(self.end),
        })
    }
}
