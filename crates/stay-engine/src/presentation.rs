//! Human-readable text for availability windows.
//!
//! All functions are pure and keyed only on dates, so the published document
//! is identical for identical inputs.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Booking season, decided by month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    /// December through March.
    Ski,
    /// April and May.
    Spring,
    /// June through August.
    Summer,
    /// September through November.
    Fall,
}

impl Season {
    pub fn for_date(date: NaiveDate) -> Self {
        match date.month() {
            12 | 1 | 2 | 3 => Season::Ski,
            4 | 5 => Season::Spring,
            6..=8 => Season::Summer,
            _ => Season::Fall,
        }
    }

    /// Rotating blurbs describing a stay that starts in this season.
    pub fn descriptions(self) -> &'static [&'static str; 3] {
        match self {
            Season::Ski => &[
                "Prime ski season with exceptional powder conditions and stunning mountain views",
                "World-class skiing with easy access to all five peaks",
                "Perfect powder days and cozy evenings by the fireplace",
            ],
            Season::Spring => &[
                "Spring skiing combined with early summer mountain activities",
                "Longer days, sunshine, and spring snow conditions",
                "The best of both seasons as the mountain transitions",
            ],
            Season::Summer => &[
                "Hiking, biking, and river activities in the Rocky Mountains",
                "Summer festivals, wildflowers, and endless mountain activities",
                "Perfect weather for outdoor adventures and exploring Main Street",
            ],
            Season::Fall => &[
                "Stunning fall foliage and crisp mountain air with fewer crowds",
                "Golden aspens and world-class mountain biking before ski season",
                "Peaceful autumn retreat with breathtaking Colorado colors",
            ],
        }
    }
}

/// Heading block for the season a report is published in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeasonInfo {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub theme: Season,
}

impl SeasonInfo {
    pub fn for_date(date: NaiveDate) -> Self {
        let theme = Season::for_date(date);
        let (title, subtitle) = match theme {
            Season::Ski => ("Ski Season Availability", "Book Your Mountain Getaway"),
            Season::Spring => ("Spring Season Availability", "Enjoy the Mountain Transition"),
            Season::Summer => ("Summer Season Availability", "Alpine Adventures Await"),
            Season::Fall => ("Fall Season Availability", "Experience Peak Foliage"),
        };
        Self {
            title,
            subtitle,
            theme,
        }
    }
}

/// Description for a window starting on `start`: the season's blurb at
/// `day % 3`.
pub fn describe(start: NaiveDate) -> &'static str {
    let options = Season::for_date(start).descriptions();
    options[start.day() as usize % options.len()]
}

/// Format a stay as display text, dropping repeated month and year:
///
/// - `January 2–5, 2026`
/// - `January 30 – February 3, 2026`
/// - `December 30, 2026 – January 2, 2027`
pub fn format_dates(start: NaiveDate, end: NaiveDate) -> String {
    if start.year() == end.year() && start.month() == end.month() {
        format!(
            "{} {}\u{2013}{}, {}",
            start.format("%B"),
            start.day(),
            end.day(),
            start.year()
        )
    } else if start.year() == end.year() {
        format!(
            "{} {} \u{2013} {} {}, {}",
            start.format("%B"),
            start.day(),
            end.format("%B"),
            end.day(),
            start.year()
        )
    } else {
        format!(
            "{} {}, {} \u{2013} {} {}, {}",
            start.format("%B"),
            start.day(),
            start.year(),
            end.format("%B"),
            end.day(),
            end.year()
        )
    }
}

/// Short heading for a window: `"March Week"` for stays of up to ten nights,
/// otherwise `"Early March"` or `"Late March"` by the start day.
pub fn format_title(start: NaiveDate, end: NaiveDate) -> String {
    let nights = (end - start).num_days();
    let month = start.format("%B");
    if nights <= 10 {
        format!("{} Week", month)
    } else if start.day() <= 15 {
        format!("Early {}", month)
    } else {
        format!("Late {}", month)
    }
}
