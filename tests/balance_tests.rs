// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use vaultflow::engine::balance::{summarize, BalanceSummary};
use vaultflow::models::{
    BillFrequency, CommittedBill, Expense, ExpenseCategory, IncomeEvent,
};

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn income(amount: &str, slice: &str, net: &str) -> IncomeEvent {
    IncomeEvent {
        id: 0,
        amount: dec(amount),
        tax_rate: dec("30"),
        tax_slice: dec(slice),
        net_amount: dec(net),
        event_date: date("2025-06-01"),
        client_name: None,
        description: None,
        created_at: "2025-06-01 00:00:00".into(),
    }
}

fn bill(amount: &str, active: bool) -> CommittedBill {
    CommittedBill {
        id: 0,
        name: "Studio rent".into(),
        amount: dec(amount),
        frequency: BillFrequency::Monthly,
        next_due: date("2025-07-01"),
        active,
        created_at: "2025-01-01 00:00:00".into(),
    }
}

fn expense(amount: &str, deductible: Option<bool>) -> Expense {
    Expense {
        id: 0,
        description: "Editor license".into(),
        amount: dec(amount),
        expense_date: date("2025-06-10"),
        category: Some(ExpenseCategory::Software),
        ai_confidence: Some(0.9),
        is_deductible: deductible,
        reviewed: false,
        created_at: "2025-06-10 00:00:00".into(),
    }
}

#[test]
fn empty_collections_yield_zero_summary() {
    let s = summarize(&[], &[], &[]);
    assert_eq!(s, BalanceSummary::zero());
}

#[test]
fn folds_income_bills_and_deductibles() {
    let incomes = vec![
        income("80000", "24000", "56000"),
        income("10000", "3000", "7000"),
    ];
    let bills = vec![bill("1500", true), bill("800.50", true)];
    let expenses = vec![
        expense("1000", Some(true)),
        expense("250.25", Some(true)),
        expense("9999", Some(false)),
        expense("9999", None), // uncategorized yet: not counted
    ];
    let s = summarize(&incomes, &bills, &expenses);
    assert_eq!(format!("{:.2}", s.gross), "63000.00");
    assert_eq!(format!("{:.2}", s.tax_reserve), "27000.00");
    assert_eq!(format!("{:.2}", s.bills_total), "2300.50");
    assert_eq!(format!("{:.2}", s.real_balance), "60699.50");
    assert_eq!(format!("{:.2}", s.deductible_total), "1250.25");
    // 1250.25 * 0.30 = 375.075 -> half away from zero
    assert_eq!(format!("{:.2}", s.estimated_tax_saving), "375.08");
}

#[test]
fn inactive_bills_are_excluded() {
    let incomes = vec![income("1000", "300", "700")];
    let bills = vec![bill("400", true), bill("9000", false)];
    let s = summarize(&incomes, &bills, &[]);
    assert_eq!(format!("{:.2}", s.bills_total), "400.00");
    assert_eq!(format!("{:.2}", s.real_balance), "300.00");
}

#[test]
fn real_balance_is_exact_on_rounded_inputs() {
    // Both terms already 2dp: the subtraction must be exact
    let incomes = vec![income("500", "150", "350")];
    let bills = vec![bill("123.45", true)];
    let s = summarize(&incomes, &bills, &[]);
    assert_eq!(s.real_balance, s.gross - s.bills_total);
}

#[test]
fn real_balance_can_go_negative() {
    let incomes = vec![income("100", "30", "70")];
    let bills = vec![bill("500", true)];
    let s = summarize(&incomes, &bills, &[]);
    assert_eq!(format!("{:.2}", s.real_balance), "-430.00");
}
