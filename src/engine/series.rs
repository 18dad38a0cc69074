// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::money::round2;
use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Running cumulative total over the trailing `n` calendar days ending at
/// `today`, oldest point first. Days without events repeat the prior running
/// total, so the series is monotonically non-decreasing for positive inputs.
/// Always yields exactly `n` points; an empty event set yields all zeros.
/// Events dated before the window are excluded (the series shows movement
/// within the window, not an all-time balance).
pub fn running_total(events: &[(NaiveDate, Decimal)], today: NaiveDate, n: usize) -> Vec<Decimal> {
    if n == 0 {
        return Vec::new();
    }
    let start = today - Duration::days(n as i64 - 1);

    let mut by_day: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for (date, amount) in events {
        if *date >= start && *date <= today {
            *by_day.entry(*date).or_insert(Decimal::ZERO) += round2(*amount);
        }
    }

    let mut out = Vec::with_capacity(n);
    let mut running = Decimal::ZERO;
    for i in 0..n {
        let day = start + Duration::days(i as i64);
        if let Some(v) = by_day.get(&day) {
            running += *v;
        }
        out.push(running);
    }
    out
}
