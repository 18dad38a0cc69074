// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use vaultflow::engine::money::{round2, validate_amount, validate_event_date, AMOUNT_CEILING};
use vaultflow::engine::tax::{net_amount, tax_slice, validate_rate};

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[test]
fn slice_plus_net_reconstitutes_amount() {
    // Slice and net are both 2dp; for positive amounts they must add back up
    // to the rounded amount, not just within a cent.
    let amounts = ["0.01", "1", "99.99", "123.456", "80000", "4999.995", "100000000"];
    let rates = ["0", "1", "7.5", "18", "30", "42.5", "60"];
    for a in amounts {
        for r in rates {
            let a = dec(a);
            let r = dec(r);
            let slice = tax_slice(a, r).unwrap();
            let net = net_amount(a, r).unwrap();
            assert_eq!(
                slice + net,
                round2(a),
                "amount {} rate {} -> slice {} net {}",
                a,
                r,
                slice,
                net
            );
        }
    }
}

#[test]
fn slice_monotone_in_rate_net_antitone() {
    let amount = dec("12345.67");
    let mut prev_slice = Decimal::MIN;
    let mut prev_net = Decimal::MAX;
    for r in 0..=60 {
        let rate = Decimal::from(r);
        let slice = tax_slice(amount, rate).unwrap();
        let net = net_amount(amount, rate).unwrap();
        assert!(slice >= prev_slice, "slice dropped at rate {}", r);
        assert!(net <= prev_net, "net rose at rate {}", r);
        prev_slice = slice;
        prev_net = net;
    }
}

#[test]
fn round2_is_idempotent_and_half_away() {
    assert_eq!(round2(dec("1.005")), dec("1.01"));
    assert_eq!(round2(dec("-1.005")), dec("-1.01"));
    assert_eq!(round2(dec("2.674999")), dec("2.67"));
    for s in ["0", "0.005", "19.994", "-3.335", "12345.6789"] {
        let once = round2(dec(s));
        assert_eq!(round2(once), once, "not idempotent for {}", s);
    }
}

#[test]
fn concrete_eighty_thousand_at_thirty_percent() {
    let slice = tax_slice(dec("80000"), dec("30")).unwrap();
    let net = net_amount(dec("80000"), dec("30")).unwrap();
    assert_eq!(format!("{:.2}", slice), "24000.00");
    assert_eq!(format!("{:.2}", net), "56000.00");
}

#[test]
fn rate_bounds_are_enforced() {
    assert!(validate_rate(dec("0")).is_ok());
    assert!(validate_rate(dec("60")).is_ok());
    assert!(validate_rate(dec("-0.01")).is_err());
    assert!(validate_rate(dec("60.01")).is_err());
    assert!(tax_slice(dec("100"), dec("61")).is_err());
}

#[test]
fn amount_bounds_are_enforced() {
    assert!(validate_amount(dec("0.01")).is_ok());
    assert!(validate_amount(AMOUNT_CEILING).is_ok());
    assert!(validate_amount(Decimal::ZERO).is_err());
    assert!(validate_amount(dec("-5")).is_err());
    assert!(validate_amount(AMOUNT_CEILING + dec("0.01")).is_err());
}

#[test]
fn future_event_dates_are_rejected() {
    let today = chrono::NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
    let tomorrow = chrono::NaiveDate::from_ymd_opt(2025, 6, 16).unwrap();
    assert!(validate_event_date(today, today).is_ok());
    assert!(validate_event_date(tomorrow, today).is_err());
}
