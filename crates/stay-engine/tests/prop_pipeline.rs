//! Property-based tests for the merge and availability pipeline using proptest.
//!
//! These check invariants that must hold for *any* mix of booked ranges, not
//! just the scenarios in `normalize_tests.rs` and `availability_tests.rs`.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use stay_engine::availability::derive_availability;
use stay_engine::normalize::merge_occupied;
use stay_engine::range::{BookedRange, DateRange, Horizon};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// A `today` somewhere in 2025-2027. Day capped at 28 to keep dates valid.
fn arb_today() -> impl Strategy<Value = NaiveDate> {
    (2025i32..=2027, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

/// Offsets relative to `today`. Lengths may be zero or negative so malformed
/// entries show up too.
fn arb_offsets() -> impl Strategy<Value = Vec<(i64, i64)>> {
    prop::collection::vec((-40i64..220, -3i64..45), 0..25)
}

fn arb_horizon() -> impl Strategy<Value = u32> {
    1u32..=200
}

fn arb_min_nights() -> impl Strategy<Value = u32> {
    0u32..=7
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn shift(today: NaiveDate, offset: i64) -> NaiveDate {
    today + chrono::Duration::days(offset)
}

fn to_ranges(today: NaiveDate, offsets: &[(i64, i64)]) -> Vec<BookedRange> {
    offsets
        .iter()
        .map(|&(start, len)| BookedRange::new(shift(today, start), shift(today, start + len)))
        .collect()
}

fn days_in(horizon: &Horizon) -> impl Iterator<Item = NaiveDate> {
    let end = horizon.end();
    horizon.today().iter_days().take_while(move |d| *d < end)
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Property 1: Merged output is sorted, non-overlapping and non-touching
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn merged_ranges_are_strictly_separated(
        today in arb_today(),
        offsets in arb_offsets(),
        horizon_days in arb_horizon(),
    ) {
        let merged = merge_occupied(&to_ranges(today, &offsets), today, horizon_days);

        for pair in merged.ranges().windows(2) {
            prop_assert!(
                pair[0].end() < pair[1].start(),
                "{} and {} overlap or touch", pair[0], pair[1]
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Property 2: Merged output lies within the horizon
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn merged_ranges_stay_within_horizon(
        today in arb_today(),
        offsets in arb_offsets(),
        horizon_days in arb_horizon(),
    ) {
        let horizon = Horizon::new(today, horizon_days);
        let merged = merge_occupied(&to_ranges(today, &offsets), today, horizon_days);

        for range in merged.ranges() {
            prop_assert!(range.start() >= horizon.today());
            prop_assert!(range.end() <= horizon.end());
        }
    }
}

// ---------------------------------------------------------------------------
// Property 3: Merging is idempotent
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn merging_twice_changes_nothing(
        today in arb_today(),
        offsets in arb_offsets(),
        horizon_days in arb_horizon(),
    ) {
        let once = merge_occupied(&to_ranges(today, &offsets), today, horizon_days);
        let again: Vec<BookedRange> = once.ranges().iter().copied().map(BookedRange::from).collect();
        let twice = merge_occupied(&again, today, horizon_days);

        prop_assert_eq!(once.ranges(), twice.ranges());
        prop_assert_eq!(twice.skipped_malformed(), 0);
    }
}

// ---------------------------------------------------------------------------
// Property 4: Every occupied day in the horizon is covered exactly once
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn occupied_days_are_conserved(
        today in arb_today(),
        offsets in arb_offsets(),
        horizon_days in arb_horizon(),
    ) {
        let input = to_ranges(today, &offsets);
        let valid: Vec<DateRange> = input
            .iter()
            .filter_map(|raw| DateRange::try_from(*raw).ok())
            .collect();
        let merged = merge_occupied(&input, today, horizon_days);
        let horizon = Horizon::new(today, horizon_days);

        for day in days_in(&horizon) {
            let booked = valid.iter().any(|r| r.contains(day));
            let covering = merged.ranges().iter().filter(|r| r.contains(day)).count();
            prop_assert_eq!(covering, usize::from(booked), "day {}", day);
        }
        prop_assert_eq!(merged.skipped_malformed(), input.len() - valid.len());
    }
}

// ---------------------------------------------------------------------------
// Property 5: Windows never overlap occupancy and honor the minimum stay
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn windows_complement_occupancy(
        today in arb_today(),
        offsets in arb_offsets(),
        horizon_days in arb_horizon(),
        min_nights in arb_min_nights(),
    ) {
        let merged = merge_occupied(&to_ranges(today, &offsets), today, horizon_days);
        let windows = derive_availability(merged.ranges(), today, horizon_days, min_nights);
        let horizon = Horizon::new(today, horizon_days);

        for window in &windows {
            prop_assert!(window.nights >= i64::from(min_nights));
            prop_assert_eq!(window.nights, window.range.nights());
            prop_assert!(window.start() >= horizon.first_check_in());
            prop_assert!(window.end() <= horizon.end());
            for busy in merged.ranges() {
                prop_assert!(!window.range.overlaps(busy), "{} overlaps {}", window.range, busy);
            }
        }
        for pair in windows.windows(2) {
            prop_assert!(pair[0].end() <= pair[1].start());
        }
    }
}

// ---------------------------------------------------------------------------
// Property 6: Free runs long enough for the minimum stay are all reported
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn every_free_day_in_a_long_enough_gap_is_offered(
        today in arb_today(),
        offsets in arb_offsets(),
        horizon_days in arb_horizon(),
    ) {
        let merged = merge_occupied(&to_ranges(today, &offsets), today, horizon_days);
        let windows = derive_availability(merged.ranges(), today, horizon_days, 0);
        let horizon = Horizon::new(today, horizon_days);

        // With no minimum, every free day after today belongs to some window.
        let first = horizon.first_check_in();
        for day in days_in(&horizon).filter(|d| *d >= first) {
            let busy = merged.ranges().iter().any(|r| r.contains(day));
            let offered = windows.iter().any(|w| w.range.contains(day));
            prop_assert_eq!(busy, !offered, "day {}", day);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 7: The pipeline is deterministic and order-independent
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn input_order_does_not_matter(
        today in arb_today(),
        offsets in arb_offsets(),
        horizon_days in arb_horizon(),
        min_nights in arb_min_nights(),
    ) {
        let forward = to_ranges(today, &offsets);
        let mut reversed = forward.clone();
        reversed.reverse();

        let a = merge_occupied(&forward, today, horizon_days);
        let b = merge_occupied(&reversed, today, horizon_days);
        prop_assert_eq!(&a, &b);

        let wa = derive_availability(a.ranges(), today, horizon_days, min_nights);
        let wb = derive_availability(b.ranges(), today, horizon_days, min_nights);
        prop_assert_eq!(wa, wb);
    }
}

#[test]
fn days_in_horizon_counts_every_day() {
    let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    let horizon = Horizon::new(today, 10);

    assert_eq!(days_in(&horizon).count(), 10);
    assert_eq!(horizon.end(), today.checked_add_days(Days::new(10)).unwrap());
}
