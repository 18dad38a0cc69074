// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::money::{round2, validate_amount};
use crate::error::{Error, Result};
use rust_decimal::Decimal;

pub const MAX_TAX_RATE: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// Percentage rates are accepted in [0, 60].
pub fn validate_rate(rate: Decimal) -> Result<Decimal> {
    if rate < Decimal::ZERO || rate > MAX_TAX_RATE {
        return Err(Error::validation(format!(
            "Tax rate must be between 0 and {}, got {}",
            MAX_TAX_RATE, rate
        )));
    }
    Ok(rate)
}

/// Portion of a gross amount reserved for tax at the given percentage rate.
/// Computed once at income recognition and frozen onto the event; the
/// profile's default rate can change later without rewriting history.
pub fn tax_slice(amount: Decimal, rate: Decimal) -> Result<Decimal> {
    validate_amount(amount)?;
    validate_rate(rate)?;
    Ok(round2(amount * rate / Decimal::ONE_HUNDRED))
}

pub fn net_amount(amount: Decimal, rate: Decimal) -> Result<Decimal> {
    let slice = tax_slice(amount, rate)?;
    Ok(round2(amount - slice))
}
