use crate::scoring::domain::{CompanyFullData, RubyPayeurRecord};
use chrono::NaiveDate;
use serde::Serialize;

/// Confidence attached to the global score, with the sources that backed it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReliabilityReport {
    pub percentage: u8,
    pub sources: Vec<&'static str>,
    pub has_recent_financials: bool,
    pub has_premium_data: bool,
}

/// Fixed confidence each source contributes when present.
const SIRENE_BASE: u32 = 60;
const PAPPERS_BASE: u32 = 70;
const BODACC_BASE: u32 = 50;
const RUBY_PAYEUR_BASE: u32 = 80;
const INFOGREFFE_PREMIUM_BASE: u32 = 95;

/// Overall reliability is the mean of the per-source bases across whichever
/// sources are present; a dossier with no source at all defaults to 30.
pub(crate) fn assess(data: &CompanyFullData, today: NaiveDate) -> ReliabilityReport {
    let mut contributions: Vec<(&'static str, u32)> = vec![("SIRENE", SIRENE_BASE)];

    let has_bilans = data
        .pappers
        .as_ref()
        .map(|pappers| !pappers.bilans.is_empty())
        .unwrap_or(false);
    if has_bilans {
        contributions.push(("Pappers", PAPPERS_BASE));
    }

    if data.bodacc.is_some() {
        contributions.push(("BODACC", BODACC_BASE));
    }

    if matches!(data.ruby_payeur, Some(RubyPayeurRecord::Available(_))) {
        contributions.push(("RubyPayeur", RUBY_PAYEUR_BASE));
    }

    if data.has_premium_score() {
        contributions.push(("Infogreffe premium", INFOGREFFE_PREMIUM_BASE));
    }

    let percentage = if contributions.is_empty() {
        30
    } else {
        let total: u32 = contributions.iter().map(|(_, base)| base).sum();
        (total / contributions.len() as u32).min(100) as u8
    };

    ReliabilityReport {
        percentage,
        sources: contributions.into_iter().map(|(name, _)| name).collect(),
        has_recent_financials: data.has_recent_bilan(today),
        has_premium_data: data.has_premium_score(),
    }
}
