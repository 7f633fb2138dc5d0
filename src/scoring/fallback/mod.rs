//! Conservative scoring for companies without reliable financial statements.
//!
//! When no authoritative bilan or premium analytic exists, the score is built
//! from weak signals only (filing discipline, procedure history, payment
//! reputation, structural profile) and capped at 70: without real financials
//! the engine never claims high confidence.

mod categories;

pub(crate) use categories::{
    legal_obligations, legal_procedures, payment_behavior, structural_profile,
};

use crate::scoring::domain::CompanyFullData;
use chrono::NaiveDate;
use serde::Serialize;

/// Ceiling for any score computed without authoritative financial data.
pub const FALLBACK_SCORE_CAP: u8 = 70;

/// Weak-signal categories, ordered by weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackCategory {
    LegalObligations,
    LegalProcedures,
    PaymentBehavior,
    StructuralProfile,
}

impl FallbackCategory {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::LegalObligations,
            Self::LegalProcedures,
            Self::PaymentBehavior,
            Self::StructuralProfile,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::LegalObligations => "Legal obligations",
            Self::LegalProcedures => "Legal procedures",
            Self::PaymentBehavior => "Payments & reputation",
            Self::StructuralProfile => "Structural profile",
        }
    }

    /// Approximate share of the fallback score the category can move.
    pub const fn weight(self) -> u8 {
        match self {
            Self::LegalObligations => 40,
            Self::LegalProcedures => 30,
            Self::PaymentBehavior => 20,
            Self::StructuralProfile => 10,
        }
    }
}

/// Itemized contribution of one category to the fallback score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub category: FallbackCategory,
    pub category_label: &'static str,
    pub weight: u8,
    pub penalty: u32,
    pub bonus: u32,
    pub details: Vec<String>,
}

/// Result of the weak-signal calculator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FallbackScoreResult {
    /// Final score, always within [0, 70].
    pub score: u8,
    /// True when the raw total exceeded the cap and was clamped down.
    pub capped: bool,
    /// Comma-joined list of the absent financial sources, for audit display.
    pub reason: String,
    pub explanation: String,
    pub breakdown: Vec<CategoryBreakdown>,
}

/// True when no bilan covers the last two calendar years and no purchased
/// Infogreffe analytic (NOTAPME or AFDCC) is present.
pub fn should_use_fallback(data: &CompanyFullData, today: NaiveDate) -> bool {
    !data.has_recent_bilan(today) && !data.has_premium_score()
}

/// Compute the capped weak-signal score. Never fails: absent sub-data simply
/// contributes no penalty for its category.
pub fn compute(data: &CompanyFullData, today: NaiveDate) -> FallbackScoreResult {
    let assessments = [
        (
            FallbackCategory::LegalObligations,
            legal_obligations(data, today),
        ),
        (
            FallbackCategory::LegalProcedures,
            legal_procedures(data, today),
        ),
        (FallbackCategory::PaymentBehavior, payment_behavior(data)),
        (
            FallbackCategory::StructuralProfile,
            structural_profile(data, today),
        ),
    ];

    let total_penalty: i64 = assessments
        .iter()
        .map(|(_, assessment)| assessment.penalty as i64)
        .sum();
    let total_bonus: i64 = assessments
        .iter()
        .map(|(_, assessment)| assessment.bonus as i64)
        .sum();

    let raw = 100 - total_penalty + total_bonus;
    let score = raw.clamp(0, FALLBACK_SCORE_CAP as i64) as u8;
    let capped = raw > FALLBACK_SCORE_CAP as i64;

    let breakdown = assessments
        .into_iter()
        .map(|(category, assessment)| CategoryBreakdown {
            category,
            category_label: category.label(),
            weight: category.weight(),
            penalty: assessment.penalty,
            bonus: assessment.bonus,
            details: assessment.details,
        })
        .collect();

    FallbackScoreResult {
        score,
        capped,
        reason: missing_sources_reason(data, today),
        explanation: explanation_for(score),
        breakdown,
    }
}

fn missing_sources_reason(data: &CompanyFullData, today: NaiveDate) -> String {
    let mut missing = Vec::new();
    if !data.has_recent_bilan(today) {
        missing.push("bilans");
    }
    let infogreffe = data.infogreffe.as_ref();
    if infogreffe.map(|r| r.notapme_scores.is_none()).unwrap_or(true) {
        missing.push("NOTAPME");
    }
    if infogreffe.map(|r| r.afdcc_score.is_none()).unwrap_or(true) {
        missing.push("AFDCC");
    }

    if missing.is_empty() {
        "none".to_string()
    } else {
        missing.join(", ")
    }
}

fn explanation_for(score: u8) -> String {
    let band = match score {
        60.. => "Profile acceptable despite missing financial statements.",
        40..=59 => "Some warning signals; financial statements would clarify the picture.",
        20..=39 => "Significant risk factors detected from indirect signals.",
        _ => "High-risk profile; avoid or strictly limit exposure.",
    };
    format!(
        "Score computed from indirect signals only (capped at {FALLBACK_SCORE_CAP}/100). {band}"
    )
}
