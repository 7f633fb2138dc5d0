use serde::{Deserialize, Serialize};

/// Costly Infogreffe premium endpoints the engine can recommend purchasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PremiumEndpoint {
    NotapmePerformance,
    NotapmeEssentiel,
    Afdcc,
    RepartitionCapital,
}

impl PremiumEndpoint {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::NotapmePerformance,
            Self::NotapmeEssentiel,
            Self::Afdcc,
            Self::RepartitionCapital,
        ]
    }

    pub const fn id(self) -> &'static str {
        match self {
            Self::NotapmePerformance => "notapme-performance",
            Self::NotapmeEssentiel => "notapme-essentiel",
            Self::Afdcc => "afdcc",
            Self::RepartitionCapital => "repartitioncapital",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NotapmePerformance => "NOTAPME Performance",
            Self::NotapmeEssentiel => "NOTAPME Essentiel",
            Self::Afdcc => "AFDCC Score",
            Self::RepartitionCapital => "Répartition du capital",
        }
    }

    pub const fn config(self) -> EndpointConfig {
        match self {
            Self::NotapmePerformance => EndpointConfig {
                credits: 50,
                cost_euros: 25.0,
                min_revenue: 500_000.0,
                min_headcount: 10,
                requires_procedures: false,
                preferred_forms: &["SAS", "SA", "SARL"],
            },
            Self::NotapmeEssentiel => EndpointConfig {
                credits: 20,
                cost_euros: 10.0,
                min_revenue: 100_000.0,
                min_headcount: 3,
                requires_procedures: false,
                preferred_forms: &["SAS", "SA", "SARL"],
            },
            Self::Afdcc => EndpointConfig {
                credits: 40,
                cost_euros: 20.0,
                min_revenue: 250_000.0,
                min_headcount: 5,
                requires_procedures: true,
                preferred_forms: &["SAS", "SA", "SARL"],
            },
            Self::RepartitionCapital => EndpointConfig {
                credits: 20,
                cost_euros: 10.0,
                min_revenue: 1_000_000.0,
                min_headcount: 50,
                requires_procedures: false,
                preferred_forms: &["SA", "SAS"],
            },
        }
    }
}

/// Static purchase thresholds for one premium endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EndpointConfig {
    pub credits: u32,
    pub cost_euros: f64,
    pub min_revenue: f64,
    pub min_headcount: u32,
    /// Whether visible trouble (procedures, incidents) is this endpoint's
    /// primary trigger rather than size thresholds.
    pub requires_procedures: bool,
    pub preferred_forms: &'static [&'static str],
}

impl EndpointConfig {
    pub fn prefers_form(&self, legal_form: Option<&str>) -> bool {
        let Some(form) = legal_form else {
            return false;
        };
        let token = form
            .split(|c: char| c.is_whitespace() || c == ',')
            .next()
            .unwrap_or(form);
        self.preferred_forms
            .iter()
            .any(|preferred| token.eq_ignore_ascii_case(preferred))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credit_costs_sum_to_catalog_total() {
        let total: u32 = PremiumEndpoint::ordered()
            .iter()
            .map(|endpoint| endpoint.config().credits)
            .sum();
        assert_eq!(total, 130);
    }

    #[test]
    fn only_the_risk_rating_triggers_on_visible_trouble() {
        for endpoint in PremiumEndpoint::ordered() {
            assert_eq!(
                endpoint.config().requires_procedures,
                endpoint == PremiumEndpoint::Afdcc
            );
        }
    }

    #[test]
    fn form_matching_uses_the_leading_token() {
        let config = PremiumEndpoint::RepartitionCapital.config();
        assert!(config.prefers_form(Some("SAS")));
        assert!(config.prefers_form(Some("SA, société anonyme")));
        assert!(!config.prefers_form(Some("SARL")));
        assert!(!config.prefers_form(None));
    }
}
