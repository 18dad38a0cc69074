// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{Error, Result};
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Upper bound on any single monetary amount accepted by the engine.
pub const AMOUNT_CEILING: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

/// Round to 2 decimal places, half away from zero. Half-up is deliberate for
/// tax figures: banker's rounding would under-reserve on average.
pub fn round2(d: Decimal) -> Decimal {
    d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Validate a monetary amount before it enters any derivation: must be
/// strictly positive and under the configured ceiling.
pub fn validate_amount(d: Decimal) -> Result<Decimal> {
    if d <= Decimal::ZERO {
        return Err(Error::validation(format!(
            "Amount must be positive, got {}",
            d
        )));
    }
    if d > AMOUNT_CEILING {
        return Err(Error::validation(format!(
            "Amount {} exceeds ceiling {}",
            d, AMOUNT_CEILING
        )));
    }
    Ok(d)
}

/// Income and expense dates may not be in the future.
pub fn validate_event_date(date: NaiveDate, today: NaiveDate) -> Result<NaiveDate> {
    if date > today {
        return Err(Error::validation(format!(
            "Date {} is in the future",
            date
        )));
    }
    Ok(date)
}
