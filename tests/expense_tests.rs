// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::Utc;
use rusqlite::Connection;
use rust_decimal::Decimal;
use vaultflow::ai::{
    categorize_with_fallback, Categorization, CategorizationPolicy, CategorizeRequest,
    RuleCategorizer,
};
use vaultflow::commands::expenses::{add_expense, get_expense, review};
use vaultflow::db;
use vaultflow::error::Error;
use vaultflow::models::ExpenseCategory;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

/// Stand-in for a dead or timing-out hosted categorizer.
struct FailingPolicy;

impl CategorizationPolicy for FailingPolicy {
    fn categorize(&self, _req: &CategorizeRequest) -> Result<Categorization, Error> {
        Err(Error::collaborator("request timed out"))
    }
}

#[test]
fn collaborator_failure_falls_back_and_never_blocks_creation() {
    let conn = setup();
    let today = Utc::now().date_naive();
    let exp = add_expense(
        &conn,
        "Mystery purchase",
        dec("1234.56"),
        today,
        today,
        "INR",
        &FailingPolicy,
    )
    .unwrap();

    // The record exists and carries the fallback, not an error
    assert_eq!(exp.category, Some(ExpenseCategory::Miscellaneous));
    assert_eq!(exp.ai_confidence, Some(0.0));
    assert_eq!(exp.is_deductible, Some(false));
    assert!(!exp.reviewed);
}

#[test]
fn fallback_wrapper_swallows_policy_errors() {
    let req = CategorizeRequest {
        description: "anything".into(),
        amount: dec("10"),
        currency: "INR".into(),
    };
    let c = categorize_with_fallback(&FailingPolicy, &req);
    assert_eq!(c, Categorization::fallback());
}

#[test]
fn rule_categorizer_matches_keywords() {
    let rules = RuleCategorizer;
    let cases = [
        ("Figma subscription renewal", ExpenseCategory::Software, true),
        ("New 27-inch monitor", ExpenseCategory::Hardware, true),
        ("Uber to client office", ExpenseCategory::Travel, true),
        ("Team lunch", ExpenseCategory::Meals, false),
        ("Instagram ads campaign", ExpenseCategory::Marketing, true),
    ];
    for (desc, want_cat, want_ded) in cases {
        let c = rules
            .categorize(&CategorizeRequest {
                description: desc.into(),
                amount: dec("100"),
                currency: "INR".into(),
            })
            .unwrap();
        assert_eq!(c.category, want_cat, "{}", desc);
        assert_eq!(c.is_deductible, want_ded, "{}", desc);
        assert!(c.confidence > 0.0);
    }

    let c = rules
        .categorize(&CategorizeRequest {
            description: "zzqx".into(),
            amount: dec("100"),
            currency: "INR".into(),
        })
        .unwrap();
    assert_eq!(c, Categorization::fallback());
}

#[test]
fn review_is_monotonic_and_may_override_category() {
    let conn = setup();
    let today = Utc::now().date_naive();
    let exp = add_expense(
        &conn,
        "Team lunch with client",
        dec("2400"),
        today,
        today,
        "INR",
        &RuleCategorizer,
    )
    .unwrap();
    assert_eq!(exp.category, Some(ExpenseCategory::Meals));
    assert!(!exp.reviewed);

    let exp = review(&conn, exp.id, Some(ExpenseCategory::Marketing), Some(true)).unwrap();
    assert!(exp.reviewed);
    assert_eq!(exp.category, Some(ExpenseCategory::Marketing));
    assert_eq!(exp.is_deductible, Some(true));

    // Reviewing again keeps the flag; nothing flips it back
    let exp = review(&conn, exp.id, None, None).unwrap();
    assert!(exp.reviewed);
    assert_eq!(exp.category, Some(ExpenseCategory::Marketing));

    let exp = get_expense(&conn, exp.id).unwrap();
    assert!(exp.reviewed);
}

#[test]
fn expense_amount_and_date_are_validated_before_insert() {
    let conn = setup();
    let today = Utc::now().date_naive();
    let tomorrow = today + chrono::Duration::days(1);
    assert!(add_expense(&conn, "x", dec("0"), today, today, "INR", &RuleCategorizer).is_err());
    assert!(
        add_expense(&conn, "x", dec("10"), tomorrow, today, "INR", &RuleCategorizer).is_err()
    );
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM expenses", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 0);
}
