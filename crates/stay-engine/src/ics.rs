//! Extract booked date ranges from iCalendar feeds.
//!
//! Uses the `icalendar` crate's parser. Airbnb and VRBO feeds only publish
//! blocked dates, so each `VEVENT` becomes one [`BookedRange`]; everything but
//! DTSTART, DTEND, DURATION and SUMMARY is ignored. DATE values, zoned local
//! datetimes, UTC and floating datetimes are all reduced to their calendar date.

use chrono::{Days, NaiveDate};
use icalendar::parser::{read_calendar, unfold, Component};
use icalendar::{CalendarDateTime, DatePerhapsTime};

use crate::error::{Result, StayError};
use crate::range::BookedRange;

/// Booked ranges read from one calendar source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCalendar {
    /// Label of the source (e.g. "Airbnb", "VRBO").
    pub source: String,
    /// One entry per usable `VEVENT`, in feed order. Not validated.
    pub ranges: Vec<BookedRange>,
    /// Events dropped because they were unreadable or had no start date.
    pub skipped: usize,
    /// Number of `VEVENT` blocks found.
    pub events_seen: usize,
}

/// Parse an iCalendar document into booked ranges.
///
/// An event without DTEND ends after its `DURATION` (whole days or weeks) or,
/// failing that, one day after it starts. Events without a readable DTSTART are
/// counted in [`ParsedCalendar::skipped`] and otherwise ignored.
///
/// When the document as a whole does not parse, each `VEVENT` block is parsed
/// on its own so one broken event only costs that event.
///
/// # Errors
/// Returns `StayError::CalendarParse` if the text is not an iCalendar document.
pub fn parse_booked_ranges(ical_text: &str, source: &str) -> Result<ParsedCalendar> {
    let trimmed = ical_text.trim_start_matches('\u{feff}').trim_start();
    if !trimmed.starts_with("BEGIN:VCALENDAR") {
        return Err(StayError::CalendarParse {
            calendar: source.to_string(),
            message: "missing BEGIN:VCALENDAR".to_string(),
        });
    }

    let unfolded = unfold(trimmed);
    let mut parsed = ParsedCalendar {
        source: source.to_string(),
        ranges: Vec::new(),
        skipped: 0,
        events_seen: 0,
    };

    match read_calendar(&unfolded) {
        Ok(calendar) => {
            for event in vevents(&calendar.components) {
                let range = booked_range(event, source, parsed.events_seen + 1);
                parsed.record(range);
            }
        }
        Err(err) => {
            tracing::warn!(source, %err, "calendar does not parse as a whole; reading events one by one");
            for block in event_blocks(&unfolded) {
                let index = parsed.events_seen + 1;
                let range = block.and_then(|body| {
                    let wrapped = format!(
                        "BEGIN:VCALENDAR\r\nBEGIN:VEVENT{}END:VEVENT\r\nEND:VCALENDAR\r\n",
                        body
                    );
                    let range = match read_calendar(&wrapped) {
                        Ok(calendar) => vevents(&calendar.components)
                            .next()
                            .and_then(|event| booked_range(event, source, index)),
                        Err(err) => {
                            tracing::warn!(source, event = index, %err, "event skipped: unreadable");
                            None
                        }
                    };
                    range
                });
                parsed.record(range);
            }
        }
    }

    if parsed.skipped > 0 {
        tracing::warn!(source, skipped = parsed.skipped, "events could not be parsed");
    }

    Ok(parsed)
}

impl ParsedCalendar {
    fn record(&mut self, range: Option<BookedRange>) {
        self.events_seen += 1;
        match range {
            Some(range) => self.ranges.push(range),
            None => self.skipped += 1,
        }
    }
}

/// Every `VEVENT`, whether it sits at the top level or inside `VCALENDAR`.
fn vevents<'a, 'b>(components: &'b [Component<'a>]) -> impl Iterator<Item = &'b Component<'a>> {
    components
        .iter()
        .flat_map(|c| std::iter::once(c).chain(c.components.iter()))
        .filter(|c| c.name == "VEVENT")
}

/// Raw bodies between `BEGIN:VEVENT` and `END:VEVENT`, one per event.
/// A block that is never closed yields `None`.
fn event_blocks(unfolded: &str) -> impl Iterator<Item = Option<&str>> {
    unfolded
        .split("BEGIN:VEVENT")
        .skip(1)
        .map(|chunk| chunk.find("END:VEVENT").map(|end| &chunk[..end]))
}

/// Read one event's booked range; `None` when it has no usable DTSTART.
fn booked_range(event: &Component<'_>, source: &str, index: usize) -> Option<BookedRange> {
    let summary = event
        .find_prop("SUMMARY")
        .map(|p| p.val.to_string())
        .unwrap_or_else(|| "(no summary)".to_string());

    let Some(start) = property_date(event, "DTSTART") else {
        tracing::warn!(source, event = index, %summary, "event skipped: no readable DTSTART");
        return None;
    };

    let end = property_date(event, "DTEND").unwrap_or_else(|| {
        let days = event
            .find_prop("DURATION")
            .and_then(|p| duration_days(p.val.as_ref()))
            .unwrap_or(1);
        start.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX)
    });

    tracing::debug!(source, event = index, %start, %end, %summary, "booked");
    Some(BookedRange::new(start, end))
}

/// Read a date-valued property as a calendar date.
///
/// Falls back to the leading `YYYYMMDD` digits of the raw value when the
/// typed conversion fails, which covers the odd TZID spellings some feeds use.
fn property_date(event: &Component<'_>, name: &str) -> Option<NaiveDate> {
    let prop = event.find_prop(name)?;
    match DatePerhapsTime::try_from(prop) {
        Ok(DatePerhapsTime::Date(date)) => Some(date),
        Ok(DatePerhapsTime::DateTime(CalendarDateTime::Utc(dt))) => Some(dt.date_naive()),
        Ok(DatePerhapsTime::DateTime(CalendarDateTime::Floating(naive))) => Some(naive.date()),
        Ok(DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone { date_time, .. })) => {
            Some(date_time.date())
        }
        Err(_) => leading_date(prop.val.as_ref()),
    }
}

fn leading_date(raw: &str) -> Option<NaiveDate> {
    let digits = raw.trim().get(..8)?;
    NaiveDate::parse_from_str(digits, "%Y%m%d").ok()
}

/// Whole days of an ISO 8601 duration such as `P3D`, `P2W` or `P3DT4H`.
/// Time components are ignored; anything else yields `None`.
fn duration_days(raw: &str) -> Option<u64> {
    let rest = raw.trim().strip_prefix('P')?;
    let digits_len = rest.chars().take_while(char::is_ascii_digit).count();
    let count: u64 = rest[..digits_len].parse().ok()?;
    match rest[digits_len..].chars().next()? {
        'D' => Some(count),
        'W' => count.checked_mul(7),
        _ => None,
    }
}
