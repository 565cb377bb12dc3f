//! WASM bindings for stay-engine.
//!
//! Exposes occupancy merging, availability and report building to JavaScript
//! via `wasm-bindgen`, so the website can recompute openings in the browser.
//! All complex types are passed as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p stay-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir site/wasm/ \
//!   target/wasm32-unknown-unknown/release/stay_engine_wasm.wasm
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use stay_engine::{
    AvailabilityReport, AvailabilitySettings, BookedRange, ListingMeta, ParsedCalendar,
    DEFAULT_MAX_BLOCKS,
};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct OccupancyDto {
    occupied: Vec<stay_engine::DateRange>,
    skipped_malformed: usize,
}

/// Input format for a calendar document passed from JavaScript.
#[derive(Deserialize)]
struct CalendarInput {
    source: String,
    text: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a `YYYY-MM-DD` date.
fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| JsValue::from_str(&format!("Invalid date '{}': {}", s, e)))
}

/// Convert a JSON array of `{start, end}` objects into booked ranges.
/// Inverted ranges are accepted here; the merge counts and skips them.
fn parse_ranges_json(json: &str) -> Result<Vec<BookedRange>, JsValue> {
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&format!("Invalid ranges JSON: {}", e)))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Merge booked ranges into sorted, non-touching occupancy inside the horizon.
///
/// `ranges_json` is a JSON array of `{start, end}` objects with `YYYY-MM-DD`
/// dates. Returns `{occupied: [{start, end}], skipped_malformed}`.
#[wasm_bindgen(js_name = "mergeOccupied")]
pub fn merge_occupied(ranges_json: &str, today: &str, horizon_days: u32) -> Result<String, JsValue> {
    let ranges = parse_ranges_json(ranges_json)?;
    let today = parse_date(today)?;

    let merged = stay_engine::merge_occupied(&ranges, today, horizon_days);

    to_json(&OccupancyDto {
        skipped_malformed: merged.skipped_malformed(),
        occupied: merged.into_ranges(),
    })
}

/// Compute bookable windows from booked ranges.
///
/// Returns a JSON array of `{start, end, nights}` objects sorted by start.
#[wasm_bindgen(js_name = "computeAvailability")]
pub fn compute_availability(
    ranges_json: &str,
    today: &str,
    horizon_days: u32,
    min_nights: u32,
) -> Result<String, JsValue> {
    let ranges = parse_ranges_json(ranges_json)?;
    let today = parse_date(today)?;
    let settings = AvailabilitySettings {
        horizon_days,
        min_nights,
    };

    let result = stay_engine::compute_availability(&ranges, today, &settings);

    to_json(&result.windows)
}

/// Build the `availability.json` document straight from iCal texts.
///
/// `calendars_json` is a JSON array of `{source, text}` objects, one per feed.
/// The listing metadata is the default listing's.
#[wasm_bindgen(js_name = "buildReport")]
pub fn build_report(
    calendars_json: &str,
    today: &str,
    horizon_days: u32,
    min_nights: u32,
) -> Result<String, JsValue> {
    let inputs: Vec<CalendarInput> = serde_json::from_str(calendars_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid calendars JSON: {}", e)))?;
    let today = parse_date(today)?;

    let calendars: Vec<ParsedCalendar> = inputs
        .iter()
        .map(|input| stay_engine::parse_booked_ranges(&input.text, &input.source))
        .collect::<Result<_, _>>()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let settings = AvailabilitySettings {
        horizon_days,
        min_nights,
    };
    let availability = stay_engine::compute_for_calendars(&calendars, today, &settings);
    let report = AvailabilityReport::build(
        &availability.windows,
        today,
        ListingMeta::default(),
        DEFAULT_MAX_BLOCKS,
    );

    report
        .to_json_pretty()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
