// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::money::round2;
use crate::models::{CommittedBill, Expense, IncomeEvent};
use rust_decimal::Decimal;
use serde::Serialize;

/// Flat estimate applied to deductible spend. Deductions actually reduce
/// taxable income at the marginal rate, which this system does not model;
/// the figure is labelled an estimate everywhere it is shown.
pub const ASSUMED_DEDUCTION_RATE: Decimal = Decimal::from_parts(30, 0, 0, false, 2);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceSummary {
    pub gross: Decimal,
    pub tax_reserve: Decimal,
    pub bills_total: Decimal,
    pub real_balance: Decimal,
    pub deductible_total: Decimal,
    pub estimated_tax_saving: Decimal,
}

impl BalanceSummary {
    pub fn zero() -> Self {
        BalanceSummary {
            gross: Decimal::ZERO,
            tax_reserve: Decimal::ZERO,
            bills_total: Decimal::ZERO,
            real_balance: Decimal::ZERO,
            deductible_total: Decimal::ZERO,
            estimated_tax_saving: Decimal::ZERO,
        }
    }
}

/// Fold the three independent collections into the summary shown on the
/// dashboard. Each term is rounded before accumulating so drift cannot grow
/// with collection size; empty collections produce the zero summary.
pub fn summarize(
    incomes: &[IncomeEvent],
    bills: &[CommittedBill],
    expenses: &[Expense],
) -> BalanceSummary {
    let mut gross = Decimal::ZERO;
    let mut tax_reserve = Decimal::ZERO;
    for ev in incomes {
        gross += round2(ev.net_amount);
        tax_reserve += round2(ev.tax_slice);
    }

    let mut bills_total = Decimal::ZERO;
    for b in bills.iter().filter(|b| b.active) {
        bills_total += round2(b.amount);
    }

    let mut deductible_total = Decimal::ZERO;
    for e in expenses.iter().filter(|e| e.is_deductible == Some(true)) {
        deductible_total += round2(e.amount);
    }

    BalanceSummary {
        gross,
        tax_reserve,
        bills_total,
        real_balance: round2(gross - bills_total),
        deductible_total,
        estimated_tax_saving: round2(deductible_total * ASSUMED_DEDUCTION_RATE),
    }
}
