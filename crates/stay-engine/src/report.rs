//! The published `availability.json` document.

use chrono::NaiveDate;
use serde::Serialize;

use crate::availability::AvailableWindow;
use crate::error::Result;
use crate::presentation::{describe, format_dates, format_title, SeasonInfo};

/// How many windows the website shows.
pub const DEFAULT_MAX_BLOCKS: usize = 3;

/// Static metadata about the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingMeta {
    pub listing_id: String,
    pub airbnb_url: String,
}

impl ListingMeta {
    pub fn new(listing_id: impl Into<String>, airbnb_url: impl Into<String>) -> Self {
        Self {
            listing_id: listing_id.into(),
            airbnb_url: airbnb_url.into(),
        }
    }
}

impl Default for ListingMeta {
    fn default() -> Self {
        Self::new(
            "1286116063774289661",
            "https://www.airbnb.com/rooms/1286116063774289661",
        )
    }
}

/// One window rendered for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityBlock {
    pub title: String,
    pub dates: String,
    pub description: String,
    pub nights: i64,
}

impl From<&AvailableWindow> for AvailabilityBlock {
    fn from(window: &AvailableWindow) -> Self {
        Self {
            title: format_title(window.start(), window.end()),
            dates: format_dates(window.start(), window.end()),
            description: describe(window.start()).to_string(),
            nights: window.nights,
        }
    }
}

/// Top-level report. Field order is the serialized order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityReport {
    /// `today` at midnight, e.g. `2026-01-01T00:00:00`.
    pub last_updated: String,
    pub season: SeasonInfo,
    pub availability: Vec<AvailabilityBlock>,
    pub meta: ListingMeta,
}

impl AvailabilityReport {
    /// Build the report from windows sorted by start. Only the first
    /// `max_blocks` windows are rendered; an empty slice produces an empty
    /// `availability` list.
    pub fn build(
        windows: &[AvailableWindow],
        today: NaiveDate,
        meta: ListingMeta,
        max_blocks: usize,
    ) -> Self {
        Self {
            last_updated: format!("{}T00:00:00", today.format("%Y-%m-%d")),
            season: SeasonInfo::for_date(today),
            availability: windows
                .iter()
                .take(max_blocks)
                .map(AvailabilityBlock::from)
                .collect(),
            meta,
        }
    }

    /// Serialize with two-space indentation.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
