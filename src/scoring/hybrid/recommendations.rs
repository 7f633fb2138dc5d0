use crate::scoring::domain::CompanyFullData;
use crate::scoring::premium::PremiumEndpoint;
use chrono::NaiveDate;
use serde::Serialize;

/// Maximum score improvement a purchase bundle is allowed to promise.
const IMPROVEMENT_CAP: u8 = 25;

/// Upsell block attached to a hybrid score: which premium endpoints would
/// raise reliability, and by how many points at most.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRecommendation {
    pub needs_premium: bool,
    pub suggested_endpoints: Vec<PremiumEndpoint>,
    pub potential_improvement: u8,
}

pub(crate) fn recommend(
    data: &CompanyFullData,
    today: NaiveDate,
    global_score: u8,
) -> ScoreRecommendation {
    let infogreffe = data.infogreffe.as_ref();
    let has_notapme = infogreffe.map(|r| r.notapme_scores.is_some()).unwrap_or(false);
    let has_afdcc = infogreffe.map(|r| r.afdcc_score.is_some()).unwrap_or(false);
    let has_payment_score = data
        .payment_profile()
        .map(|profile| profile.global_score.is_some())
        .unwrap_or(false);

    let mut suggested = Vec::new();
    let mut improvement: u32 = 0;

    if !data.has_recent_bilan(today) && !has_notapme {
        suggested.push(PremiumEndpoint::NotapmeEssentiel);
        improvement += 15;
    }

    if !has_afdcc && !has_payment_score {
        suggested.push(PremiumEndpoint::Afdcc);
        improvement += 10;
    }

    if global_score < 70 && !data.has_premium_score() {
        suggested.push(PremiumEndpoint::NotapmePerformance);
        improvement += 20;
    }

    ScoreRecommendation {
        needs_premium: !suggested.is_empty(),
        suggested_endpoints: suggested,
        potential_improvement: improvement.min(IMPROVEMENT_CAP as u32) as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::domain::{CompanyStatus, SireneRecord};

    fn bare() -> CompanyFullData {
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

    #[test]
    fn bare_dossier_with_low_score_suggests_everything_capped() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let recommendation = recommend(&bare(), today, 55);
        assert!(recommendation.needs_premium);
        assert_eq!(
            recommendation.suggested_endpoints,
            vec![
                PremiumEndpoint::NotapmeEssentiel,
                PremiumEndpoint::Afdcc,
                PremiumEndpoint::NotapmePerformance,
            ]
        );
        // 15 + 10 + 20 capped at 25.
        assert_eq!(recommendation.potential_improvement, 25);
    }

    #[test]
    fn high_score_without_premium_still_suggests_financial_sources() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let recommendation = recommend(&bare(), today, 85);
        assert_eq!(
            recommendation.suggested_endpoints,
            vec![PremiumEndpoint::NotapmeEssentiel, PremiumEndpoint::Afdcc]
        );
        assert_eq!(recommendation.potential_improvement, 25);
    }
}
