//! Scoring core: pure, synchronous computations over an already-aggregated
//! company dossier. No I/O, no shared state; the evaluation date is always
//! injected so results are reproducible.

pub mod domain;
pub mod fallback;
pub mod hybrid;
pub mod legacy;
pub mod premium;

pub use domain::CompanyFullData;
pub use fallback::{should_use_fallback, FallbackScoreResult};
pub use hybrid::{HybridScoreResult, ReliabilityReport, ScoreRecommendation, SubScore};
pub use legacy::{ScoreReading, ScoreSource};
pub use premium::{
    analyze_company_profile, calculate_potential_savings, generate_recommendations,
    should_recommend, CompanyProfile, PotentialSavings, PremiumEndpoint, PremiumRecommendation,
    RecommendationLevel,
};

use chrono::NaiveDate;
use serde::Serialize;

/// Everything the display layer needs for one company, computed in one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreDossier {
    pub siren: String,
    pub denomination: Option<String>,
    pub evaluated_on: NaiveDate,
    pub hybrid: HybridScoreResult,
    pub fallback: FallbackScoreResult,
    pub premium: Vec<PremiumRecommendation>,
    pub legacy_financial: ScoreReading,
    pub legacy_risk: ScoreReading,
}

/// Run every calculator over the dossier. Pure and infallible, like the
/// individual calculators it composes.
pub fn score_dossier(data: &CompanyFullData, today: NaiveDate) -> ScoreDossier {
    ScoreDossier {
        siren: data.sirene.siren.clone(),
        denomination: data.sirene.denomination.clone(),
        evaluated_on: today,
        hybrid: hybrid::compute(data, today),
        fallback: fallback::compute(data, today),
        premium: generate_recommendations(data, today),
        legacy_financial: legacy::financial_score(data),
        legacy_risk: legacy::risk_score(data),
    }
}
