//! Merge booked ranges from every calendar into canonical occupancy.
//!
//! Drops malformed candidates, clips the rest to the horizon, sorts by start,
//! then sweeps left to right coalescing overlapping *and* touching ranges.

use chrono::NaiveDate;

use crate::range::{BookedRange, DateRange, Horizon};

/// Sorted, non-overlapping, non-touching occupied ranges inside the horizon.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MergedOccupancy {
    ranges: Vec<DateRange>,
    skipped: usize,
}

impl MergedOccupancy {
    pub fn ranges(&self) -> &[DateRange] {
        &self.ranges
    }

    pub fn into_ranges(self) -> Vec<DateRange> {
        self.ranges
    }

    /// Number of input ranges rejected because `start >= end`.
    pub fn skipped_malformed(&self) -> usize {
        self.skipped
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Total occupied nights across all merged ranges.
    pub fn occupied_nights(&self) -> i64 {
        self.ranges.iter().map(DateRange::nights).sum()
    }
}

/// Merge raw booked ranges into occupancy clipped to `[today, today + horizon_days)`.
///
/// Ranges ending on or before `today`, or starting on or after the horizon end,
/// are discarded. Ranges with `start >= end` are skipped and counted rather than
/// aborting the merge; one bad calendar entry must not hide the rest.
pub fn merge_occupied(ranges: &[BookedRange], today: NaiveDate, horizon_days: u32) -> MergedOccupancy {
    let horizon = Horizon::new(today, horizon_days);
    let mut skipped = 0;

    let mut clipped: Vec<DateRange> = ranges
        .iter()
        .filter_map(|raw| match DateRange::try_from(*raw) {
            Ok(range) => Some(range),
            Err(err) => {
                skipped += 1;
                tracing::warn!(%err, "skipping malformed booked range");
                None
            }
        })
        .filter_map(|range| horizon.clip(&range))
        .collect();

    clipped.sort_by_key(|range| (range.start(), range.end()));

    MergedOccupancy {
        ranges: coalesce(clipped),
        skipped,
    }
}

/// Coalesce a start-sorted list. `next.start <= current.end` merges, so
/// `[10, 12)` and `[12, 15)` become `[10, 15)`.
fn coalesce(sorted: Vec<DateRange>) -> Vec<DateRange> {
    let mut merged: Vec<DateRange> = Vec::with_capacity(sorted.len());
    for range in sorted {
        if let Some(last) = merged.last_mut() {
            if range.start() <= last.end() {
                *last = last.hull(&range);
                continue;
            }
        }
        merged.push(range);
    }
    merged
}
