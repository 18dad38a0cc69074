// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::InvoiceStatus;
use chrono::NaiveDate;
use serde::Serialize;

/// Visual urgency of an unpaid invoice, derived from its age. Never
/// persisted; the stored status stays authoritative for business logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AgingTier {
    Normal,
    Warning,
    Critical,
}

impl AgingTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgingTier::Normal => "normal",
            AgingTier::Warning => "warning",
            AgingTier::Critical => "critical",
        }
    }
}

/// Whole days elapsed since the due date; negative while the invoice is not
/// yet due.
pub fn age_days(due_date: NaiveDate, today: NaiveDate) -> i64 {
    (today - due_date).num_days()
}

/// Tier boundaries are inclusive at 15 and 30: 15 days late is still NORMAL,
/// 30 days late is still WARNING.
pub fn tier_for_age(days: i64) -> AgingTier {
    if days > 30 {
        AgingTier::Critical
    } else if days > 15 {
        AgingTier::Warning
    } else {
        AgingTier::Normal
    }
}

/// Display tier for an invoice. PAID invoices have no age; everything else
/// derives urgency from the due date regardless of stored status.
pub fn display_tier(
    status: InvoiceStatus,
    due_date: NaiveDate,
    today: NaiveDate,
) -> Option<AgingTier> {
    if status == InvoiceStatus::Paid {
        return None;
    }
    Some(tier_for_age(age_days(due_date, today)))
}

/// Implicit overdue derivation for display: a SENT invoice whose due date has
/// passed reads as overdue without its stored status changing. The stored
/// OVERDUE status is only ever set by the explicit mark-overdue transition.
pub fn is_past_due(status: InvoiceStatus, due_date: NaiveDate, today: NaiveDate) -> bool {
    status == InvoiceStatus::Overdue || (status == InvoiceStatus::Sent && due_date < today)
}

/// Invoice lifecycle: DRAFT -> SENT -> {OVERDUE, PAID}; OVERDUE -> PAID;
/// PAID is terminal.
pub fn can_transition(from: InvoiceStatus, to: InvoiceStatus) -> bool {
    use InvoiceStatus::*;
    matches!(
        (from, to),
        (Draft, Sent) | (Sent, Overdue) | (Sent, Paid) | (Overdue, Paid)
    )
}
