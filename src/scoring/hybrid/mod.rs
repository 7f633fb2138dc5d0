//! Primary displayed score: four independently-reasoned sub-scores, each
//! carrying its own confidence, combined into a weighted 0-100 global score.

mod recommendations;
mod reliability;
mod subscores;

pub use recommendations::ScoreRecommendation;
pub use reliability::ReliabilityReport;

use crate::scoring::domain::CompanyFullData;
use crate::scoring::fallback;
use chrono::NaiveDate;
use serde::Serialize;

pub const ECONOMIC_WEIGHT: f32 = 0.40;
pub const LEGAL_WEIGHT: f32 = 0.25;
pub const FINANCIAL_WEIGHT: f32 = 0.20;
pub const RISK_WEIGHT: f32 = 0.15;

/// A sub-score and its confidence, kept together so value and reliability can
/// never drift out of alignment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SubScore {
    pub score: u8,
    pub weight: f32,
    pub reliability: u8,
}

/// Output of the hybrid calculator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HybridScoreResult {
    pub global_score: u8,
    pub economic: SubScore,
    pub legal: SubScore,
    pub financial: SubScore,
    pub risk: SubScore,
    pub reliability: ReliabilityReport,
    pub recommendation: ScoreRecommendation,
    pub is_fallback: bool,
    pub explanation: String,
}

impl HybridScoreResult {
    pub fn sub_scores(&self) -> [SubScore; 4] {
        [self.economic, self.legal, self.financial, self.risk]
    }
}

/// Compute the hybrid score. Best effort by design: a dossier holding nothing
/// but the mandatory SIRENE record still produces a result.
pub fn compute(data: &CompanyFullData, today: NaiveDate) -> HybridScoreResult {
    let economic = subscores::economic(data, today);
    let legal = subscores::legal(data, today);
    let financial = subscores::financial(data);
    let risk = subscores::risk(data, today);

    let global = [economic, legal, financial, risk]
        .iter()
        .map(|sub| f32::from(sub.score) * sub.weight)
        .sum::<f32>()
        .round()
        .clamp(0.0, 100.0) as u8;

    let reliability = reliability::assess(data, today);
    let recommendation = recommendations::recommend(data, today, global);
    let is_fallback = fallback::should_use_fallback(data, today);
    let explanation = explanation_for(global, &reliability, is_fallback);

    HybridScoreResult {
        global_score: global,
        economic,
        legal,
        financial,
        risk,
        reliability,
        recommendation,
        is_fallback,
        explanation,
    }
}

fn explanation_for(global: u8, reliability: &ReliabilityReport, is_fallback: bool) -> String {
    let band = match global {
        80.. => "Solid profile across economic, legal, and risk signals.",
        60..=79 => "Sound profile with some points to monitor.",
        40..=59 => "Mixed profile; several signals deserve attention.",
        _ => "Weak profile; significant risk factors are present.",
    };

    let mut explanation = format!(
        "{band} Confidence {}% based on {}.",
        reliability.percentage,
        reliability.sources.join(", ")
    );

    if is_fallback {
        explanation.push_str(
            " No recent financial statement or premium score: indirect signals drive this result.",
        );
    }

    explanation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::domain::{CompanyStatus, SireneRecord};

    #[test]
    fn weights_sum_to_one() {
        let total = ECONOMIC_WEIGHT + LEGAL_WEIGHT + FINANCIAL_WEIGHT + RISK_WEIGHT;
        assert!((total - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn bare_sirene_dossier_still_scores() {
        let data = CompanyFullData {
            sirene: SireneRecord {
                siren: "552100554".to_string(),
                siret: None,
                denomination: Some("MINIMAL SA".to_string()),
                naf_code: None,
                headcount_bracket: None,
                address: Some("5 quai Voltaire, Paris".to_string()),
                creation_date: None,
                status: CompanyStatus::Active,
            },
            pappers: None,
            infogreffe: None,
            bodacc: None,
            ruby_payeur: None,
            predictor: None,
            errors: Vec::new(),
        };
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let result = compute(&data, today);

        assert!(result.global_score <= 100);
        assert!(result.is_fallback);
        assert!(result.recommendation.needs_premium);
        for sub in result.sub_scores() {
            assert!(sub.score <= 100);
            assert!(sub.reliability <= 100);
        }
    }
}
