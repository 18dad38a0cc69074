// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use vaultflow::engine::series::running_total;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
}

#[test]
fn empty_input_gives_exactly_n_zero_points() {
    let series = running_total(&[], today(), 30);
    assert_eq!(series.len(), 30);
    assert!(series.iter().all(|v| v.is_zero()));
}

#[test]
fn single_event_today_moves_only_the_last_point() {
    let events = vec![(today(), dec("500"))];
    let series = running_total(&events, today(), 30);
    assert_eq!(series.len(), 30);
    assert!(series[..29].iter().all(|v| v.is_zero()));
    assert_eq!(format!("{:.2}", series[29]), "500.00");
}

#[test]
fn running_total_carries_forward_over_gap_days() {
    let events = vec![
        (today() - Duration::days(10), dec("100")),
        (today() - Duration::days(5), dec("50.50")),
    ];
    let series = running_total(&events, today(), 30);
    // Index of a day d is 29 - (today - d)
    assert!(series[..19].iter().all(|v| v.is_zero()));
    for v in &series[19..24] {
        assert_eq!(format!("{:.2}", v), "100.00");
    }
    for v in &series[24..] {
        assert_eq!(format!("{:.2}", v), "150.50");
    }
}

#[test]
fn same_day_events_accumulate() {
    let d = today() - Duration::days(2);
    let events = vec![(d, dec("10")), (d, dec("20")), (today(), dec("5"))];
    let series = running_total(&events, today(), 30);
    assert_eq!(format!("{:.2}", series[27]), "30.00");
    assert_eq!(format!("{:.2}", series[28]), "30.00");
    assert_eq!(format!("{:.2}", series[29]), "35.00");
}

#[test]
fn events_outside_the_window_are_ignored() {
    let events = vec![
        (today() - Duration::days(30), dec("999")), // one day too old for n=30
        (today() + Duration::days(1), dec("999")),
        (today() - Duration::days(29), dec("42")),
    ];
    let series = running_total(&events, today(), 30);
    assert_eq!(format!("{:.2}", series[0]), "42.00");
    assert_eq!(format!("{:.2}", series[29]), "42.00");
}

#[test]
fn series_is_monotone_for_positive_inputs() {
    let events: Vec<_> = (0..15)
        .map(|i| (today() - Duration::days(i * 2), dec("7.77")))
        .collect();
    let series = running_total(&events, today(), 30);
    for w in series.windows(2) {
        assert!(w[1] >= w[0]);
    }
}

#[test]
fn zero_window_yields_empty_series() {
    let events = vec![(today(), dec("500"))];
    assert!(running_total(&events, today(), 0).is_empty());
}
