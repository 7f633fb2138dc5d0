use crate::scoring::domain::{AnnonceKind, CompanyFullData, PaymentAlertKind};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Average revenue per employee used when no bilan gives a real figure.
const REVENUE_PER_EMPLOYEE: f64 = 80_000.0;

/// Ephemeral profile derived per call; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub estimated_revenue: f64,
    pub headcount: u32,
    pub legal_form: Option<String>,
    pub has_active_procedures: bool,
    pub has_payment_incidents: bool,
    pub age_years: u32,
}

/// Derive the profile the recommendation rules reason about.
pub fn analyze_company_profile(data: &CompanyFullData, today: NaiveDate) -> CompanyProfile {
    let headcount = data
        .latest_bilan()
        .and_then(|bilan| bilan.headcount)
        .or_else(|| data.sirene.headcount_floor())
        .unwrap_or(0);

    let estimated_revenue = data
        .latest_bilan()
        .map(|bilan| bilan.revenue)
        .unwrap_or_else(|| f64::from(headcount) * REVENUE_PER_EMPLOYEE);

    let bodacc_procedures = data
        .bodacc
        .iter()
        .flat_map(|record| record.annonces.iter())
        .any(|annonce| annonce.kind == AnnonceKind::CollectiveProcedure);
    let registry_procedures = data
        .infogreffe
        .as_ref()
        .map(|record| !record.procedures.is_empty())
        .unwrap_or(false);

    let has_payment_incidents = data
        .payment_profile()
        .map(|profile| {
            profile.incident_count > 0
                || profile
                    .alerts
                    .iter()
                    .any(|alert| alert.kind == PaymentAlertKind::Incident)
        })
        .unwrap_or(false);

    CompanyProfile {
        estimated_revenue,
        headcount,
        legal_form: data.legal_form().map(str::to_string),
        has_active_procedures: bodacc_procedures || registry_procedures,
        has_payment_incidents,
        age_years: data.age_years(today).unwrap_or(0),
    }
}
