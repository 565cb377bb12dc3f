//! Loading calendar text from feed URLs or local files.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;

/// Feeds reject requests without a browser-like user agent.
const USER_AGENT: &str = "Mozilla/5.0";

pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .context("Failed to create HTTP client")
}

/// Download an iCal feed. Non-success statuses are errors.
pub fn fetch_calendar(client: &Client, url: &str) -> Result<String> {
    let host = display_host(url);
    let response = client
        .get(url)
        .send()
        .with_context(|| format!("Failed to fetch calendar from {}", host))?
        .error_for_status()
        .with_context(|| format!("Calendar feed at {} returned an error status", host))?;

    response
        .text()
        .with_context(|| format!("Failed to read calendar body from {}", host))
}

pub fn read_calendar_file(path: &str) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
}

/// Feed URLs embed a private export token, so only the host is ever shown.
pub fn display_host(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| "<invalid url>".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_host_hides_path_and_token() {
        assert_eq!(
            display_host("https://www.airbnb.com/calendar/ical/123.ics?s=secret"),
            "www.airbnb.com"
        );
    }

    #[test]
    fn display_host_of_garbage() {
        assert_eq!(display_host("not a url"), "<invalid url>");
    }
}
