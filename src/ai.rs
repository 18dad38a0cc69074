// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{Error, Result};
use crate::models::ExpenseCategory;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fixed text shown when the drafting collaborator is unreachable.
pub const FOLLOWUP_PLACEHOLDER: &str =
    "AI service unavailable. Please draft follow-up manually.";

#[derive(Debug, Clone, Serialize)]
pub struct CategorizeRequest {
    pub description: String,
    pub amount: Decimal,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Categorization {
    pub category: ExpenseCategory,
    pub confidence: f64,
    pub is_deductible: bool,
}

impl Categorization {
    /// Applied whenever a provider fails: the expense still gets stored, just
    /// uncategorized in all but name.
    pub fn fallback() -> Self {
        Categorization {
            category: ExpenseCategory::Miscellaneous,
            confidence: 0.0,
            is_deductible: false,
        }
    }
}

/// Contract any expense-categorization provider must satisfy. Callers go
/// through [`categorize_with_fallback`], so a provider error can never block
/// expense creation.
pub trait CategorizationPolicy {
    fn categorize(&self, req: &CategorizeRequest) -> Result<Categorization>;
}

pub fn categorize_with_fallback(
    policy: &dyn CategorizationPolicy,
    req: &CategorizeRequest,
) -> Categorization {
    match policy.categorize(req) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Categorization unavailable ({}); using fallback", e);
            Categorization::fallback()
        }
    }
}

static KEYWORD_RULES: Lazy<Vec<(Regex, ExpenseCategory, bool)>> = Lazy::new(|| {
    // Deductible set mirrors what the hosted classifier is instructed to use:
    // Software, Hardware, Marketing, and work-related Travel.
    [
        (
            r"(?i)\b(saas|subscription|license|figma|adobe|github|hosting|domain|server|api|software|app)\b",
            ExpenseCategory::Software,
            true,
        ),
        (
            r"(?i)\b(laptop|monitor|keyboard|mouse|ssd|ram|webcam|microphone|hardware|printer)\b",
            ExpenseCategory::Hardware,
            true,
        ),
        (
            r"(?i)\b(flight|train|taxi|cab|uber|ola|hotel|travel|fuel|petrol)\b",
            ExpenseCategory::Travel,
            true,
        ),
        (
            r"(?i)\b(lunch|dinner|coffee|restaurant|meal|food|cafe)\b",
            ExpenseCategory::Meals,
            false,
        ),
        (
            r"(?i)\b(ads?|advertising|marketing|promotion|campaign|sponsorship|seo)\b",
            ExpenseCategory::Marketing,
            true,
        ),
    ]
    .into_iter()
    .map(|(pat, cat, ded)| (Regex::new(pat).unwrap(), cat, ded))
    .collect()
});

/// Offline provider: first keyword rule that matches the description wins.
/// Confidence is fixed low so reviewed-by-human stays the expectation.
pub struct RuleCategorizer;

impl CategorizationPolicy for RuleCategorizer {
    fn categorize(&self, req: &CategorizeRequest) -> Result<Categorization> {
        for (re, category, is_deductible) in KEYWORD_RULES.iter() {
            if re.is_match(&req.description) {
                return Ok(Categorization {
                    category: *category,
                    confidence: 0.6,
                    is_deductible: *is_deductible,
                });
            }
        }
        Ok(Categorization::fallback())
    }
}

#[derive(Debug, Deserialize)]
struct CategorizeResponse {
    category: String,
    confidence: f64,
    is_deductible: bool,
    #[serde(default)]
    #[allow(dead_code)]
    reasoning: String,
}

/// Provider backed by the hosted categorization endpoint. Any transport or
/// shape problem is a collaborator failure, recovered by the caller.
pub struct HttpCategorizer {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpCategorizer {
    pub fn new(client: reqwest::blocking::Client, endpoint: String) -> Self {
        HttpCategorizer { client, endpoint }
    }
}

impl CategorizationPolicy for HttpCategorizer {
    fn categorize(&self, req: &CategorizeRequest) -> Result<Categorization> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(req)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::collaborator(e.to_string()))?;
        let body: CategorizeResponse = resp
            .json()
            .map_err(|e| Error::collaborator(format!("Malformed response: {}", e)))?;
        let category = body
            .category
            .parse::<ExpenseCategory>()
            .map_err(Error::Collaborator)?;
        if !(0.0..=1.0).contains(&body.confidence) {
            return Err(Error::collaborator(format!(
                "Confidence {} out of range",
                body.confidence
            )));
        }
        Ok(Categorization {
            category,
            confidence: body.confidence,
            is_deductible: body.is_deductible,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowupRequest {
    pub client_name: String,
    pub invoice_ref: String,
    pub amount: Decimal,
    pub due_date: String,
    pub days_past_due: i64,
}

#[derive(Debug, Deserialize)]
struct FollowupResponse {
    draft: String,
}

/// Ask the drafting collaborator for a payment follow-up. Never errors: with
/// no endpoint configured, or on any failure, the caller gets the fixed
/// placeholder and drafts by hand.
pub fn draft_followup(
    client: &reqwest::blocking::Client,
    endpoint: Option<&str>,
    req: &FollowupRequest,
) -> String {
    let Some(endpoint) = endpoint else {
        return FOLLOWUP_PLACEHOLDER.to_string();
    };
    let result = client
        .post(endpoint)
        .json(req)
        .send()
        .and_then(|r| r.error_for_status())
        .map_err(|e| Error::collaborator(e.to_string()))
        .and_then(|r| {
            r.json::<FollowupResponse>()
                .map_err(|e| Error::collaborator(format!("Malformed response: {}", e)))
        });
    match result {
        Ok(r) => r.draft,
        Err(e) => {
            eprintln!("Follow-up drafting unavailable ({})", e);
            FOLLOWUP_PLACEHOLDER.to_string()
        }
    }
}
