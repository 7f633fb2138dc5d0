use crate::scoring::domain::{AnnonceKind, CompanyFullData, RubyPayeurRecord};
use chrono::{Duration, NaiveDate};

/// NAF prefixes treated as structurally volatile sectors.
const RISK_SECTOR_PREFIXES: [&str; 6] = ["47", "56", "68.2", "77", "81", "95"];

/// Outcome of one weak-signal category, with its contribution already capped.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct CategoryAssessment {
    pub penalty: u32,
    pub bonus: u32,
    pub details: Vec<String>,
}

impl CategoryAssessment {
    fn penalize(&mut self, points: u32, detail: impl Into<String>) {
        self.penalty += points;
        self.details.push(detail.into());
    }

    fn reward(&mut self, points: u32, detail: impl Into<String>) {
        self.bonus += points;
        self.details.push(detail.into());
    }

    fn cap(mut self, penalty_cap: u32, bonus_cap: u32) -> Self {
        self.penalty = self.penalty.min(penalty_cap);
        self.bonus = self.bonus.min(bonus_cap);
        self
    }
}

/// Filing discipline: companies old enough to have filed accounts but with no
/// bilan on record, and dossiers missing core identity fields.
pub(crate) fn legal_obligations(data: &CompanyFullData, today: NaiveDate) -> CategoryAssessment {
    let mut assessment = CategoryAssessment::default();

    let has_bilans = data
        .pappers
        .as_ref()
        .map(|pappers| !pappers.bilans.is_empty())
        .unwrap_or(false);

    if !has_bilans {
        match data.age_years(today) {
            Some(age) if age > 2 => {
                assessment.penalize(25, "no financial statement filed for over 2 years");
            }
            Some(age) if age >= 1 => {
                assessment.penalize(15, "no financial statement filed since creation");
            }
            _ => {}
        }
    }

    let name_missing = data.sirene.denomination.is_none();
    let address_missing = data.sirene.address.is_none();
    if name_missing || address_missing {
        assessment.penalize(15, "core identity fields missing from the registry record");
    }

    assessment.cap(40, 0)
}

/// Collective-procedure history from BODACC and Infogreffe.
pub(crate) fn legal_procedures(data: &CompanyFullData, today: NaiveDate) -> CategoryAssessment {
    let mut assessment = CategoryAssessment::default();

    let procedure_dates = data
        .bodacc
        .iter()
        .flat_map(|record| record.annonces.iter())
        .filter(|annonce| annonce.kind == AnnonceKind::CollectiveProcedure)
        .map(|annonce| annonce.date);

    let one_year_ago = today - Duration::days(365);
    let three_years_ago = today - Duration::days(3 * 365);

    let mut recent = false;
    let mut older = false;
    for date in procedure_dates {
        if date >= one_year_ago {
            recent = true;
        } else if date >= three_years_ago {
            older = true;
        }
    }

    if recent {
        assessment.penalize(20, "collective procedure announced within the last year");
    } else if older {
        assessment.penalize(10, "collective procedure announced within the last 3 years");
    }

    let infogreffe_procedures = data
        .infogreffe
        .as_ref()
        .map(|record| !record.procedures.is_empty())
        .unwrap_or(false);
    if infogreffe_procedures {
        assessment.penalize(5, "procedure recorded at the registry court");
    }

    assessment.cap(30, 0)
}

/// Payment behavior and reputation from RubyPayeur.
pub(crate) fn payment_behavior(data: &CompanyFullData) -> CategoryAssessment {
    let mut assessment = CategoryAssessment::default();

    let profile = match data.ruby_payeur.as_ref() {
        Some(RubyPayeurRecord::Available(profile)) => profile,
        _ => {
            assessment.penalize(5, "payment data unavailable");
            return assessment.cap(20, 10);
        }
    };

    if profile.incident_count > 5 {
        assessment.penalize(
            15,
            format!("{} payment incidents on record", profile.incident_count),
        );
    } else if profile.incident_count >= 2 {
        assessment.penalize(
            8,
            format!("{} payment incidents on record", profile.incident_count),
        );
    }

    if profile.average_delay_days > 30.0 {
        assessment.penalize(
            5,
            format!(
                "average payment delay of {:.0} days",
                profile.average_delay_days
            ),
        );
    }

    if profile.incident_count == 0 && profile.average_delay_days < 10.0 {
        assessment.reward(8, "excellent payer: no incident, settles under 10 days");
    } else if profile.incident_count < 2 && profile.average_delay_days < 20.0 {
        assessment.reward(4, "good payment record");
    }

    assessment.cap(20, 10)
}

/// Structural fragility: young companies, no employees, volatile sectors.
pub(crate) fn structural_profile(data: &CompanyFullData, today: NaiveDate) -> CategoryAssessment {
    let mut assessment = CategoryAssessment::default();

    if matches!(data.age_years(today), Some(age) if age < 2) {
        assessment.penalize(5, "company created less than 2 years ago");
    }

    if data.sirene.headcount_floor() == Some(0) {
        assessment.penalize(3, "no declared employee");
    }

    if let Some(naf) = data.sirene.naf_code.as_deref() {
        if RISK_SECTOR_PREFIXES
            .iter()
            .any(|prefix| naf.starts_with(prefix))
        {
            assessment.penalize(2, format!("activity {naf} is in a volatile sector"));
        }
    }

    assessment.cap(10, 0)
}
