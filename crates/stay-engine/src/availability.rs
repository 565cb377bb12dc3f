//! Derive bookable windows from merged occupancy.
//!
//! Candidate gaps are the stretch before the first occupied range (starting the
//! day after `today`), the gaps between consecutive occupied ranges, and the
//! stretch after the last one up to the horizon end. Gaps shorter than the
//! minimum stay are dropped.
//!
//! [`compute_availability`] runs the whole pipeline for a set of raw ranges and
//! is what the CLI and WASM bindings call.

use chrono::NaiveDate;
use serde::Serialize;

use crate::ics::ParsedCalendar;
use crate::normalize::{merge_occupied, MergedOccupancy};
use crate::range::{BookedRange, DateRange, Horizon};

/// Default lookahead horizon in days.
pub const DEFAULT_LOOKAHEAD_DAYS: u32 = 180;

/// Default minimum stay in nights.
pub const DEFAULT_MIN_NIGHTS: u32 = 2;

/// An open stretch of inventory long enough to book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AvailableWindow {
    #[serde(flatten)]
    pub range: DateRange,
    /// `end - start` in days.
    pub nights: i64,
}

impl AvailableWindow {
    pub fn start(&self) -> NaiveDate {
        self.range.start()
    }

    pub fn end(&self) -> NaiveDate {
        self.range.end()
    }
}

impl From<DateRange> for AvailableWindow {
    fn from(range: DateRange) -> Self {
        Self {
            range,
            nights: range.nights(),
        }
    }
}

/// Parameters of an availability run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilitySettings {
    /// Length of the lookahead horizon in days.
    pub horizon_days: u32,
    /// Shortest window, in nights, worth reporting.
    pub min_nights: u32,
}

impl Default for AvailabilitySettings {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_LOOKAHEAD_DAYS,
            min_nights: DEFAULT_MIN_NIGHTS,
        }
    }
}

/// Result of running the full pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    /// Occupancy merged across every source.
    pub occupied: MergedOccupancy,
    /// Open windows, sorted by start.
    pub windows: Vec<AvailableWindow>,
}

/// Compute the open windows left by `merged` occupancy.
///
/// `merged` must be the output of [`merge_occupied`] for the same `today` and
/// `horizon_days` (sorted, non-touching, clipped). An empty `merged` yields the
/// whole horizon from `today + 1`. A fully booked horizon yields an empty list;
/// that is a normal outcome, not an error.
///
/// Every returned window has `nights >= min_nights` and lies within
/// `[today + 1, today + horizon_days]`.
pub fn derive_availability(
    merged: &[DateRange],
    today: NaiveDate,
    horizon_days: u32,
    min_nights: u32,
) -> Vec<AvailableWindow> {
    let horizon = Horizon::new(today, horizon_days);
    let first_check_in = horizon.first_check_in();
    let horizon_end = horizon.end();

    let mut gaps: Vec<(NaiveDate, NaiveDate)> = Vec::with_capacity(merged.len() + 1);
    match (merged.first(), merged.last()) {
        (Some(first), Some(last)) => {
            if first.start() > first_check_in {
                gaps.push((first_check_in, first.start()));
            }
            gaps.extend(merged.windows(2).map(|pair| (pair[0].end(), pair[1].start())));
            if last.end() < horizon_end {
                gaps.push((last.end(), horizon_end));
            }
        }
        _ => gaps.push((first_check_in, horizon_end)),
    }

    // A zero-night gap cannot form a DateRange, so it is dropped with the rest.
    gaps.into_iter()
        .filter_map(|(start, end)| DateRange::new(start, end).ok())
        .map(AvailableWindow::from)
        .filter(|window| window.nights >= i64::from(min_nights))
        .collect()
}

/// Merge `ranges` and derive the open windows in one pass.
pub fn compute_availability(
    ranges: &[BookedRange],
    today: NaiveDate,
    settings: &AvailabilitySettings,
) -> Availability {
    let occupied = merge_occupied(ranges, today, settings.horizon_days);
    if occupied.skipped_malformed() > 0 {
        tracing::warn!(
            skipped = occupied.skipped_malformed(),
            "ignored booked ranges whose end is not after their start"
        );
    }
    for range in occupied.ranges() {
        tracing::debug!(%range, nights = range.nights(), "blocked");
    }
    tracing::debug!(
        blocked = occupied.len(),
        nights = occupied.occupied_nights(),
        "merged occupancy"
    );

    let windows = derive_availability(
        occupied.ranges(),
        today,
        settings.horizon_days,
        settings.min_nights,
    );
    for window in &windows {
        tracing::debug!(range = %window.range, nights = window.nights, "open");
    }

    Availability { occupied, windows }
}

/// Flatten the ranges of every parsed calendar and run [`compute_availability`].
pub fn compute_for_calendars(
    calendars: &[ParsedCalendar],
    today: NaiveDate,
    settings: &AvailabilitySettings,
) -> Availability {
    let all_ranges: Vec<BookedRange> = calendars
        .iter()
        .flat_map(|calendar| calendar.ranges.iter().copied())
        .collect();

    tracing::info!(
        calendars = calendars.len(),
        entries = all_ranges.len(),
        "combining booked ranges"
    );

    compute_availability(&all_ranges, today, settings)
}
