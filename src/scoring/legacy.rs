//! Source-priority scorer retained for older display surfaces.
//!
//! Premium Infogreffe products win over cheaper fallbacks, which win over the
//! internal predictor. Scores live on the historical 1-10 scale (0 marks the
//! unavailable sentinel). This path can disagree with the hybrid calculator
//! on the same dossier; the two are deliberately kept separate.

use crate::scoring::domain::{CompanyFullData, RubyPayeurRecord};
use serde::Serialize;

/// AFDCC letter notations mapped to the historical 1-10 scale, best first.
/// Longest prefix must be tried first so "AAA" is not read as "A".
const AFDCC_TIERS: [(&str, f64); 10] = [
    ("AAA", 9.0),
    ("AA", 8.5),
    ("A", 8.0),
    ("BBB", 7.0),
    ("BB", 6.0),
    ("B", 5.0),
    ("CCC", 4.0),
    ("CC", 3.0),
    ("C", 2.0),
    ("D", 1.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSource {
    Infogreffe,
    Pappers,
    RubyPayeur,
    Predictor,
    Unavailable,
}

impl ScoreSource {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Infogreffe => "Infogreffe (premium)",
            Self::Pappers => "Pappers bilans",
            Self::RubyPayeur => "RubyPayeur",
            Self::Predictor => "Internal predictor",
            Self::Unavailable => "Unavailable",
        }
    }
}

/// A score together with the source that produced it, for UI attribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReading {
    pub score: f64,
    pub source: ScoreSource,
    pub source_label: &'static str,
}

impl ScoreReading {
    fn from(score: f64, source: ScoreSource) -> Self {
        Self {
            score,
            source,
            source_label: source.label(),
        }
    }

    fn unavailable() -> Self {
        Self::from(0.0, ScoreSource::Unavailable)
    }
}

/// Financial score: NOTAPME composite, then bilan margin, then predictor.
pub fn financial_score(data: &CompanyFullData) -> ScoreReading {
    if let Some(notapme) = data
        .infogreffe
        .as_ref()
        .and_then(|record| record.notapme_scores.as_ref())
    {
        let composite = notapme.performance * 0.4
            + notapme.solvency * 0.3
            + notapme.profitability * 0.2
            + notapme.robustness * 0.1;
        return ScoreReading::from(composite.clamp(1.0, 10.0), ScoreSource::Infogreffe);
    }

    if let Some(margin) = data.latest_bilan().and_then(|bilan| bilan.margin()) {
        let score = (5.0 + margin * 25.0).clamp(1.0, 10.0);
        return ScoreReading::from(score, ScoreSource::Pappers);
    }

    if let Some(score) = data
        .predictor
        .as_ref()
        .and_then(|predictor| predictor.financial_score)
    {
        return ScoreReading::from((score / 10.0).clamp(1.0, 10.0), ScoreSource::Predictor);
    }

    ScoreReading::unavailable()
}

/// Risk score: AFDCC letter rating, then RubyPayeur, then predictor.
pub fn risk_score(data: &CompanyFullData) -> ScoreReading {
    if let Some(afdcc) = data
        .infogreffe
        .as_ref()
        .and_then(|record| record.afdcc_score.as_ref())
    {
        if let Some(score) = afdcc_tier_score(&afdcc.notation) {
            return ScoreReading::from(score, ScoreSource::Infogreffe);
        }
    }

    if let Some(RubyPayeurRecord::Available(profile)) = data.ruby_payeur.as_ref() {
        if let Some(score) = profile.global_score.or(profile.payment_score) {
            return ScoreReading::from((score / 10.0).clamp(1.0, 10.0), ScoreSource::RubyPayeur);
        }
    }

    if let Some(score) = data
        .predictor
        .as_ref()
        .and_then(|predictor| predictor.risk_score)
    {
        return ScoreReading::from((score / 10.0).clamp(1.0, 10.0), ScoreSource::Predictor);
    }

    ScoreReading::unavailable()
}

fn afdcc_tier_score(notation: &str) -> Option<f64> {
    let normalized = notation.trim().to_ascii_uppercase();
    AFDCC_TIERS
        .iter()
        .find(|(prefix, _)| normalized.starts_with(prefix))
        .map(|(_, score)| *score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::domain::{
        AfdccScore, Bilan, CompanyStatus, InfogreffeRecord, NotapmeScores, PappersRecord,
        PaymentProfile, PaymentTrend, PredictorAnalysis, SireneRecord,
    };

    fn base() -> CompanyFullData {
        CompanyFullData {
            sirene: SireneRecord {
                siren: "552100554".to_string(),
                siret: None,
                denomination: None,
                naf_code: None,
                headcount_bracket: None,
                address: None,
                creation_date: None,
                status: CompanyStatus::Active,
            },
            pappers: None,
            infogreffe: None,
            bodacc: None,
            ruby_payeur: None,
            predictor: None,
            errors: Vec::new(),
        }
    }

    fn infogreffe_with(
        notapme: Option<NotapmeScores>,
        afdcc: Option<AfdccScore>,
    ) -> InfogreffeRecord {
        InfogreffeRecord {
            legal_form: None,
            capital: None,
            rcs_number: None,
            registry_court: None,
            procedures: Vec::new(),
            filed_account_years: Vec::new(),
            notapme_scores: notapme,
            afdcc_score: afdcc,
        }
    }

    #[test]
    fn notapme_composite_outranks_bilans() {
        let mut company = base();
        company.infogreffe = Some(infogreffe_with(
            Some(NotapmeScores {
                performance: 10.0,
                solvency: 8.0,
                profitability: 6.0,
                robustness: 4.0,
            }),
            None,
        ));
        company.pappers = Some(PappersRecord {
            legal_form: None,
            capital: None,
            bilans: vec![Bilan {
                year: 2024,
                revenue: 1_000_000.0,
                net_result: -200_000.0,
                equity: 100_000.0,
                debts: 50_000.0,
                headcount: None,
            }],
        });

        let reading = financial_score(&company);
        assert_eq!(reading.source, ScoreSource::Infogreffe);
        // 10*0.4 + 8*0.3 + 6*0.2 + 4*0.1 = 8.0
        assert!((reading.score - 8.0).abs() < 1e-9);
    }

    #[test]
    fn afdcc_letters_match_longest_prefix_first() {
        assert_eq!(afdcc_tier_score("AAA"), Some(9.0));
        assert_eq!(afdcc_tier_score("AA"), Some(8.5));
        assert_eq!(afdcc_tier_score("A"), Some(8.0));
        assert_eq!(afdcc_tier_score("BBB"), Some(7.0));
        assert_eq!(afdcc_tier_score("d"), Some(1.0));
        assert_eq!(afdcc_tier_score("X"), None);
    }

    #[test]
    fn ruby_payeur_is_skipped_when_unavailable() {
        let mut company = base();
        company.ruby_payeur = Some(RubyPayeurRecord::Unavailable);
        company.predictor = Some(PredictorAnalysis {
            global_score: None,
            financial_score: None,
            legal_score: None,
            fiscal_score: None,
            risk_score: Some(64.0),
            default_probabilities: Vec::new(),
        });

        let reading = risk_score(&company);
        assert_eq!(reading.source, ScoreSource::Predictor);
        assert!((reading.score - 6.4).abs() < 1e-9);
    }

    #[test]
    fn operational_ruby_payeur_outranks_predictor() {
        let mut company = base();
        company.ruby_payeur = Some(RubyPayeurRecord::Available(PaymentProfile {
            global_score: Some(72.0),
            payment_score: None,
            average_delay_days: 12.0,
            incident_count: 1,
            trend: PaymentTrend::Stable,
            alerts: Vec::new(),
        }));
        company.predictor = Some(PredictorAnalysis {
            global_score: None,
            financial_score: None,
            legal_score: None,
            fiscal_score: None,
            risk_score: Some(20.0),
            default_probabilities: Vec::new(),
        });

        let reading = risk_score(&company);
        assert_eq!(reading.source, ScoreSource::RubyPayeur);
        assert!((reading.score - 7.2).abs() < 1e-9);
    }

    #[test]
    fn everything_missing_yields_the_sentinel() {
        let reading = financial_score(&base());
        assert_eq!(reading.score, 0.0);
        assert_eq!(reading.source, ScoreSource::Unavailable);
        assert_eq!(reading.source_label, "Unavailable");
    }
}
