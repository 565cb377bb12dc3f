//! Error types for stay-engine operations.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StayError {
    /// A range whose start is not strictly before its end.
    #[error("Malformed range: start {start} is not before end {end}")]
    MalformedRange { start: NaiveDate, end: NaiveDate },

    /// The calendar text could not be read as an iCalendar document.
    #[error("Invalid calendar '{calendar}': {message}")]
    CalendarParse { calendar: String, message: String },

    #[error("Report serialization error: {0}")]
    Report(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StayError>;
