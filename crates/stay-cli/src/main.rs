//! `stay` CLI - publish availability for a rental listing from its iCal feeds.
//!
//! ## Usage
//!
//! ```sh
//! # Fetch Airbnb (and optionally VRBO) feeds and write availability.json
//! AIRBNB_ICAL_URL=https://... VRBO_ICAL_URL=https://... stay
//!
//! # Use exported .ics files instead of live feeds, print to stdout
//! stay --calendar Airbnb=airbnb.ics --calendar VRBO=vrbo.ics -o -
//!
//! # Pin the date and tune the search
//! stay --today 2026-01-01 --lookahead-days 90 --min-nights 3
//!
//! # More detail on stderr
//! RUST_LOG=debug stay
//! ```

mod fetch;

use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use stay_engine::{
    compute_for_calendars, parse_booked_ranges, AvailabilityReport, AvailabilitySettings,
    ListingMeta, ParsedCalendar, DEFAULT_LOOKAHEAD_DAYS, DEFAULT_MAX_BLOCKS, DEFAULT_MIN_NIGHTS,
};
use tracing_subscriber::EnvFilter;

const DEFAULT_LISTING_ID: &str = "1286116063774289661";
const DEFAULT_LISTING_URL: &str = "https://www.airbnb.com/rooms/1286116063774289661";

#[derive(Parser)]
#[command(
    name = "stay",
    version,
    about = "Merge rental calendars and publish open booking windows as JSON"
)]
struct Cli {
    /// Airbnb iCal export URL
    #[arg(long, env = "AIRBNB_ICAL_URL", hide_env_values = true)]
    airbnb_url: Option<String>,

    /// VRBO iCal export URL (optional second calendar)
    #[arg(long, env = "VRBO_ICAL_URL", hide_env_values = true)]
    vrbo_url: Option<String>,

    /// Local calendar file as NAME=PATH (repeatable)
    #[arg(long = "calendar", value_name = "NAME=PATH", value_parser = parse_calendar_arg)]
    calendars: Vec<LocalCalendar>,

    /// Output file ("-" writes to stdout)
    #[arg(short, long, env = "AVAILABILITY_OUTPUT", default_value = "availability.json")]
    output: String,

    /// Days ahead of today to search for openings
    #[arg(long, default_value_t = DEFAULT_LOOKAHEAD_DAYS, value_parser = clap::value_parser!(u32).range(1..))]
    lookahead_days: u32,

    /// Shortest opening, in nights, worth publishing
    #[arg(long, default_value_t = DEFAULT_MIN_NIGHTS)]
    min_nights: u32,

    /// Number of openings to include in the document
    #[arg(long, default_value_t = DEFAULT_MAX_BLOCKS)]
    max_blocks: usize,

    /// Date to compute from, YYYY-MM-DD (defaults to the local date)
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Listing id written to the document metadata
    #[arg(long, default_value = DEFAULT_LISTING_ID)]
    listing_id: String,

    /// Listing URL written to the document metadata
    #[arg(long, default_value = DEFAULT_LISTING_URL)]
    listing_url: String,

    /// HTTP timeout for feed downloads, in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
}

#[derive(Clone, Debug)]
struct LocalCalendar {
    name: String,
    path: String,
}

fn parse_calendar_arg(raw: &str) -> std::result::Result<LocalCalendar, String> {
    match raw.split_once('=') {
        Some((name, path)) if !name.trim().is_empty() && !path.trim().is_empty() => {
            Ok(LocalCalendar {
                name: name.trim().to_string(),
                path: path.trim().to_string(),
            })
        }
        _ => Err(format!("expected NAME=PATH, got '{}'", raw)),
    }
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    let calendars = load_calendars(&cli)?;

    let settings = AvailabilitySettings {
        horizon_days: cli.lookahead_days,
        min_nights: cli.min_nights,
    };
    let availability = compute_for_calendars(&calendars, today, &settings);
    tracing::info!(
        blocked = availability.occupied.len(),
        open = availability.windows.len(),
        %today,
        "availability computed"
    );
    if availability.windows.is_empty() {
        tracing::warn!("no openings in the lookahead window; publishing an empty list");
    }

    let meta = ListingMeta::new(cli.listing_id.clone(), cli.listing_url.clone());
    let report = AvailabilityReport::build(&availability.windows, today, meta, cli.max_blocks);
    let json = report
        .to_json_pretty()
        .context("Failed to serialize availability report")?;

    write_output(&cli.output, &json)
}

/// Logs go to stderr so `-o -` leaves stdout as pure JSON.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .init();
}

/// Read every configured calendar: the Airbnb feed, the VRBO feed, then local
/// files. The Airbnb feed or at least one local file is required; the VRBO feed
/// is fetched whenever it is set.
fn load_calendars(cli: &Cli) -> Result<Vec<ParsedCalendar>> {
    let airbnb_url = cli.airbnb_url.as_deref().filter(|u| !u.trim().is_empty());
    let vrbo_url = cli.vrbo_url.as_deref().filter(|u| !u.trim().is_empty());

    if airbnb_url.is_none() && cli.calendars.is_empty() {
        bail!("AIRBNB_ICAL_URL is not set; pass --airbnb-url or at least one --calendar NAME=PATH");
    }

    let feeds: Vec<(&str, &str)> = [("Airbnb", airbnb_url), ("VRBO", vrbo_url)]
        .into_iter()
        .filter_map(|(name, url)| url.map(|url| (name, url)))
        .collect();

    let mut calendars = Vec::new();

    if !feeds.is_empty() {
        let client = fetch::build_client(Duration::from_secs(cli.timeout_secs))?;
        for (name, url) in feeds {
            calendars.push(load_feed(&client, name, url)?);
        }
    }

    for local in &cli.calendars {
        let text = fetch::read_calendar_file(&local.path)?;
        calendars.push(parse_calendar(&local.name, &text)?);
    }

    let has_vrbo = calendars
        .iter()
        .any(|c| c.source.eq_ignore_ascii_case("vrbo"));
    if !has_vrbo {
        tracing::info!("VRBO_ICAL_URL not set, using Airbnb calendar only");
    }

    Ok(calendars)
}

fn load_feed(client: &reqwest::blocking::Client, name: &str, url: &str) -> Result<ParsedCalendar> {
    tracing::info!(calendar = name, host = %fetch::display_host(url), "fetching feed");
    let text = fetch::fetch_calendar(client, url)?;
    parse_calendar(name, &text)
}

fn parse_calendar(name: &str, text: &str) -> Result<ParsedCalendar> {
    tracing::info!(calendar = name, bytes = text.len(), "received calendar");
    let parsed = parse_booked_ranges(text, name)
        .with_context(|| format!("Failed to parse {} calendar", name))?;
    tracing::info!(
        calendar = name,
        events = parsed.events_seen,
        entries = parsed.ranges.len(),
        skipped = parsed.skipped,
        "parsed calendar"
    );
    Ok(parsed)
}

fn write_output(path: &str, content: &str) -> Result<()> {
    if path == "-" {
        println!("{}", content);
        return Ok(());
    }
    std::fs::write(path, content).with_context(|| format!("Failed to write file: {}", path))?;
    tracing::info!(path, "wrote availability report");
    Ok(())
}
