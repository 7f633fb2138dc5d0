//! Decides, per costly premium endpoint, whether purchasing it is justified
//! by the company's estimated profile. Drives upsell display and explains why
//! the hybrid score's reliability could be improved.

mod profile;
mod thresholds;

pub use profile::{analyze_company_profile, CompanyProfile};
pub use thresholds::{EndpointConfig, PremiumEndpoint};

use crate::scoring::domain::CompanyFullData;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationLevel {
    Skip,
    Optional,
    Recommended,
    Essential,
}

impl RecommendationLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Skip => "Skip",
            Self::Optional => "Optional",
            Self::Recommended => "Recommended",
            Self::Essential => "Essential",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EndpointCost {
    pub credits: u32,
    pub euros: f64,
}

/// Purchase advice for one premium endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PremiumRecommendation {
    pub endpoint: PremiumEndpoint,
    pub endpoint_id: &'static str,
    pub endpoint_label: &'static str,
    pub level: RecommendationLevel,
    pub reason: String,
    /// Expected informational value of the purchase, 0-100.
    pub estimated_value: u8,
    pub cost: EndpointCost,
    /// Display ranking, 1 (lowest) to 5 (highest).
    pub priority: u8,
}

/// Credits and euros that were (or could have been) avoided by skipping
/// endpoints the rules did not justify.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PotentialSavings {
    pub recommended_endpoints: Vec<&'static str>,
    pub skipped_endpoints: Vec<&'static str>,
    pub total_credits: u32,
    pub total_euros: f64,
}

/// Evaluate all four premium endpoints, highest priority first.
pub fn generate_recommendations(
    data: &CompanyFullData,
    today: NaiveDate,
) -> Vec<PremiumRecommendation> {
    let profile = analyze_company_profile(data, today);
    let mut recommendations: Vec<PremiumRecommendation> = PremiumEndpoint::ordered()
        .into_iter()
        .map(|endpoint| evaluate_endpoint(endpoint, &profile))
        .collect();
    recommendations.sort_by(|a, b| b.priority.cmp(&a.priority));
    recommendations
}

/// True when the rules put `endpoint` above the skip level for this company.
pub fn should_recommend(data: &CompanyFullData, endpoint: PremiumEndpoint, today: NaiveDate) -> bool {
    let profile = analyze_company_profile(data, today);
    evaluate_endpoint(endpoint, &profile).level != RecommendationLevel::Skip
}

/// Partition a recommendation set into purchases worth making and purchases
/// worth avoiding, summing the avoided costs.
pub fn calculate_potential_savings(recommendations: &[PremiumRecommendation]) -> PotentialSavings {
    let mut recommended = Vec::new();
    let mut skipped = Vec::new();
    let mut total_credits = 0;
    let mut total_euros = 0.0;

    for recommendation in recommendations {
        if recommendation.level == RecommendationLevel::Skip {
            skipped.push(recommendation.endpoint_id);
            total_credits += recommendation.cost.credits;
            total_euros += recommendation.cost.euros;
        } else {
            recommended.push(recommendation.endpoint_id);
        }
    }

    PotentialSavings {
        recommended_endpoints: recommended,
        skipped_endpoints: skipped,
        total_credits,
        total_euros,
    }
}

fn evaluate_endpoint(endpoint: PremiumEndpoint, profile: &CompanyProfile) -> PremiumRecommendation {
    let config = endpoint.config();
    let meets_revenue = profile.estimated_revenue >= config.min_revenue;
    let meets_headcount = profile.headcount >= config.min_headcount;
    let preferred_form = config.prefers_form(profile.legal_form.as_deref());

    let (level, estimated_value, priority, reason): (RecommendationLevel, u8, u8, String) =
        match endpoint {
            PremiumEndpoint::NotapmePerformance => {
                if meets_revenue && meets_headcount {
                    (
                        RecommendationLevel::Essential,
                        90,
                        5,
                        "Company size justifies the full performance analysis".to_string(),
                    )
                } else if meets_revenue
                    || meets_headcount
                    || (profile.headcount >= 5 && preferred_form)
                {
                    (
                        RecommendationLevel::Recommended,
                        75,
                        4,
                        "Company is close to the size where the analysis pays off".to_string(),
                    )
                } else if preferred_form && profile.age_years > 3 {
                    (
                        RecommendationLevel::Optional,
                        50,
                        2,
                        "Established structured company; analysis is informative".to_string(),
                    )
                } else {
                    skip_reason("Too small for the full performance analysis")
                }
            }
            PremiumEndpoint::NotapmeEssentiel => {
                if meets_revenue || meets_headcount {
                    (
                        RecommendationLevel::Recommended,
                        80,
                        4,
                        "Size threshold met; the essential pack covers the need".to_string(),
                    )
                } else if profile.headcount >= 2 && preferred_form {
                    (
                        RecommendationLevel::Optional,
                        60,
                        3,
                        "Small structured company; the essential pack may help".to_string(),
                    )
                } else {
                    skip_reason("Below every threshold for the essential pack")
                }
            }
            PremiumEndpoint::Afdcc => {
                if config.requires_procedures
                    && (profile.has_active_procedures || profile.has_payment_incidents)
                {
                    // Visible trouble puts the risk rating on top of the list.
                    (
                        RecommendationLevel::Essential,
                        95,
                        5,
                        "Procedures or payment incidents already visible".to_string(),
                    )
                } else if meets_revenue && preferred_form {
                    (
                        RecommendationLevel::Recommended,
                        70,
                        3,
                        "Revenue and legal form justify a default-risk rating".to_string(),
                    )
                } else if meets_headcount {
                    (
                        RecommendationLevel::Optional,
                        45,
                        2,
                        "Workforce alone suggests a rating could be useful".to_string(),
                    )
                } else {
                    skip_reason("No risk trigger and below size thresholds")
                }
            }
            PremiumEndpoint::RepartitionCapital => {
                if preferred_form && meets_revenue {
                    (
                        RecommendationLevel::Recommended,
                        65,
                        2,
                        "Share-capital structure is relevant at this scale".to_string(),
                    )
                } else if profile.headcount >= 50 {
                    (
                        RecommendationLevel::Optional,
                        40,
                        1,
                        "Large workforce; ownership structure may matter".to_string(),
                    )
                } else {
                    skip_reason("Ownership breakdown adds little at this size")
                }
            }
        };

    PremiumRecommendation {
        endpoint,
        endpoint_id: endpoint.id(),
        endpoint_label: endpoint.label(),
        level,
        reason,
        estimated_value,
        cost: EndpointCost {
            credits: config.credits,
            euros: config.cost_euros,
        },
        priority,
    }
}

fn skip_reason(reason: &str) -> (RecommendationLevel, u8, u8, String) {
    (RecommendationLevel::Skip, 0, 1, reason.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::domain::{CompanyStatus, SireneRecord};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date")
    }

    fn empty_shell() -> CompanyFullData {
        CompanyFullData {
            sirene: SireneRecord {
                siren: "552100554".to_string(),
                siret: None,
                denomination: None,
                naf_code: None,
                headcount_bracket: Some("0 salarié".to_string()),
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
    fn empty_shell_skips_all_endpoints() {
        let recommendations = generate_recommendations(&empty_shell(), today());
        assert_eq!(recommendations.len(), 4);
        assert!(recommendations
            .iter()
            .all(|r| r.level == RecommendationLevel::Skip));

        let savings = calculate_potential_savings(&recommendations);
        assert!(savings.recommended_endpoints.is_empty());
        assert_eq!(savings.skipped_endpoints.len(), 4);
        assert_eq!(savings.total_credits, 130);
    }

    #[test]
    fn recommendations_are_sorted_by_priority() {
        let recommendations = generate_recommendations(&empty_shell(), today());
        for pair in recommendations.windows(2) {
            assert!(pair[0].priority >= pair[1].priority);
        }
    }
}
