// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical record of recognized income. The tax slice and net amount are
/// frozen at creation with whatever rate applied at that moment; later
/// profile changes never rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeEvent {
    pub id: i64,
    pub amount: Decimal,
    pub tax_rate: Decimal,
    pub tax_slice: Decimal,
    pub net_amount: Decimal,
    pub event_date: NaiveDate,
    pub client_name: Option<String>,
    pub description: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Overdue,
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "DRAFT",
            InvoiceStatus::Sent => "SENT",
            InvoiceStatus::Overdue => "OVERDUE",
            InvoiceStatus::Paid => "PAID",
        }
    }
}

impl FromStr for InvoiceStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(InvoiceStatus::Draft),
            "SENT" => Ok(InvoiceStatus::Sent),
            "OVERDUE" => Ok(InvoiceStatus::Overdue),
            "PAID" => Ok(InvoiceStatus::Paid),
            other => Err(format!("Unknown invoice status '{}'", other)),
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: i64,
    pub client_name: String,
    pub amount: Decimal,
    pub currency: String,
    pub status: InvoiceStatus,
    pub due_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
    pub invoice_ref: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Software,
    Hardware,
    Travel,
    Meals,
    Marketing,
    Miscellaneous,
}

impl ExpenseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Software => "Software",
            ExpenseCategory::Hardware => "Hardware",
            ExpenseCategory::Travel => "Travel",
            ExpenseCategory::Meals => "Meals",
            ExpenseCategory::Marketing => "Marketing",
            ExpenseCategory::Miscellaneous => "Miscellaneous",
        }
    }
}

impl FromStr for ExpenseCategory {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Software" => Ok(ExpenseCategory::Software),
            "Hardware" => Ok(ExpenseCategory::Hardware),
            "Travel" => Ok(ExpenseCategory::Travel),
            "Meals" => Ok(ExpenseCategory::Meals),
            "Marketing" => Ok(ExpenseCategory::Marketing),
            "Miscellaneous" => Ok(ExpenseCategory::Miscellaneous),
            other => Err(format!("Unknown expense category '{}'", other)),
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expense records start uncategorized; the categorization collaborator fills
/// in category/confidence/deductibility after insert, and the user flips
/// `reviewed` (one way only) once they have checked it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub description: String,
    pub amount: Decimal,
    pub expense_date: NaiveDate,
    pub category: Option<ExpenseCategory>,
    pub ai_confidence: Option<f64>,
    pub is_deductible: Option<bool>,
    pub reviewed: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillFrequency {
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl BillFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillFrequency::Weekly => "WEEKLY",
            BillFrequency::Monthly => "MONTHLY",
            BillFrequency::Quarterly => "QUARTERLY",
            BillFrequency::Yearly => "YEARLY",
        }
    }
}

impl FromStr for BillFrequency {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "WEEKLY" => Ok(BillFrequency::Weekly),
            "MONTHLY" => Ok(BillFrequency::Monthly),
            "QUARTERLY" => Ok(BillFrequency::Quarterly),
            "YEARLY" => Ok(BillFrequency::Yearly),
            other => Err(format!("Unknown bill frequency '{}'", other)),
        }
    }
}

/// Recurring obligation counted against the real balance whether or not it
/// has been paid this cycle. Deactivated bills are kept for history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommittedBill {
    pub id: i64,
    pub name: String,
    pub amount: Decimal,
    pub frequency: BillFrequency,
    pub next_due: NaiveDate,
    pub active: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub tax_rate: Decimal,
    pub gst_enabled: bool,
    pub currency: String,
}
