//! # stay-engine
//!
//! Availability windows for a single vacation-rental listing.
//!
//! Booked ranges from any number of iCal feeds (Airbnb, VRBO, ...) are merged
//! into one canonical occupancy timeline within a lookahead horizon, and the
//! gaps long enough for the minimum stay become bookable windows. Everything
//! works on calendar dates; a range `[start, end)` blocks the nights from
//! `start` up to, not including, `end`.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use stay_engine::{compute_availability, AvailabilitySettings, BookedRange};
//!
//! let d = |m, day| NaiveDate::from_ymd_opt(2026, m, day).unwrap();
//! let booked = [BookedRange::new(d(1, 5), d(1, 8))];
//! let settings = AvailabilitySettings { horizon_days: 30, min_nights: 2 };
//!
//! let result = compute_availability(&booked, d(1, 1), &settings);
//! assert_eq!(result.windows.len(), 2);
//! assert_eq!(result.windows[0].nights, 3); // Jan 2 - Jan 5
//! assert_eq!(result.windows[1].nights, 23); // Jan 8 - Jan 31
//! ```
//!
//! ## Modules
//!
//! - [`range`] - `DateRange`, raw `BookedRange` and the lookahead `Horizon`
//! - [`normalize`] - merge booked ranges into sorted, non-touching occupancy
//! - [`availability`] - derive open windows honoring the minimum stay
//! - [`ics`] - read booked ranges out of iCalendar feeds
//! - [`presentation`] - season, title, date and description text
//! - [`report`] - the published `availability.json` document
//! - [`error`] - Error types

pub mod availability;
pub mod error;
pub mod ics;
pub mod normalize;
pub mod presentation;
pub mod range;
pub mod report;

pub use availability::{
    compute_availability, compute_for_calendars, derive_availability, Availability,
    AvailabilitySettings, AvailableWindow, DEFAULT_LOOKAHEAD_DAYS, DEFAULT_MIN_NIGHTS,
};
pub use error::StayError;
pub use ics::{parse_booked_ranges, ParsedCalendar};
pub use normalize::{merge_occupied, MergedOccupancy};
pub use range::{BookedRange, DateRange, Horizon};
pub use report::{AvailabilityReport, ListingMeta, DEFAULT_MAX_BLOCKS};
