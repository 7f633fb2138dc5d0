use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Aggregated company dossier assembled by the upstream fetch layer.
///
/// Only `sirene` is guaranteed; every other source may be absent when the
/// corresponding registry call failed or was never purchased. Absent sources
/// degrade score reliability, never correctness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyFullData {
    pub sirene: SireneRecord,
    #[serde(default)]
    pub pappers: Option<PappersRecord>,
    #[serde(default)]
    pub infogreffe: Option<InfogreffeRecord>,
    #[serde(default)]
    pub bodacc: Option<BodaccRecord>,
    #[serde(default)]
    pub ruby_payeur: Option<RubyPayeurRecord>,
    #[serde(default)]
    pub predictor: Option<PredictorAnalysis>,
    #[serde(default)]
    pub errors: Vec<SourceError>,
}

impl CompanyFullData {
    /// Latest filed bilan by accounting year, if any.
    pub fn latest_bilan(&self) -> Option<&Bilan> {
        self.pappers
            .as_ref()
            .and_then(|pappers| pappers.bilans.iter().max_by_key(|bilan| bilan.year))
    }

    /// Whether a bilan exists for an accounting year within the last two
    /// calendar years relative to `today`.
    pub fn has_recent_bilan(&self, today: NaiveDate) -> bool {
        use chrono::Datelike;
        let floor = today.year() - 2;
        self.pappers
            .as_ref()
            .map(|pappers| pappers.bilans.iter().any(|bilan| bilan.year >= floor))
            .unwrap_or(false)
    }

    /// Whether a purchased Infogreffe analytic (NOTAPME or AFDCC) is present.
    pub fn has_premium_score(&self) -> bool {
        self.infogreffe
            .as_ref()
            .map(|record| record.notapme_scores.is_some() || record.afdcc_score.is_some())
            .unwrap_or(false)
    }

    /// Legal form as reported by Infogreffe, falling back to Pappers.
    pub fn legal_form(&self) -> Option<&str> {
        self.infogreffe
            .as_ref()
            .and_then(|record| record.legal_form.as_deref())
            .or_else(|| {
                self.pappers
                    .as_ref()
                    .and_then(|record| record.legal_form.as_deref())
            })
    }

    /// Whole years elapsed between the SIRENE creation date and `today`.
    pub fn age_years(&self, today: NaiveDate) -> Option<u32> {
        let created = self.sirene.creation_date?;
        if created > today {
            return Some(0);
        }
        let days = (today - created).num_days();
        Some((days / 365) as u32)
    }

    pub(crate) fn payment_profile(&self) -> Option<&PaymentProfile> {
        match self.ruby_payeur.as_ref()? {
            RubyPayeurRecord::Available(profile) => Some(profile),
            RubyPayeurRecord::Unavailable => None,
        }
    }
}

/// Official SIRENE registry record. Always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SireneRecord {
    pub siren: String,
    #[serde(default)]
    pub siret: Option<String>,
    #[serde(default)]
    pub denomination: Option<String>,
    #[serde(default)]
    pub naf_code: Option<String>,
    /// INSEE headcount bracket label, e.g. "0 salarié" or "10 à 19 salariés".
    #[serde(default)]
    pub headcount_bracket: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub creation_date: Option<NaiveDate>,
    pub status: CompanyStatus,
}

impl SireneRecord {
    /// Lower bound of the INSEE headcount bracket, when the label is parseable.
    pub fn headcount_floor(&self) -> Option<u32> {
        let label = self.headcount_bracket.as_deref()?;
        let digits: String = label
            .chars()
            .skip_while(|c| !c.is_ascii_digit())
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanyStatus {
    Active,
    Ceased,
    Suspended,
}

impl CompanyStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Ceased => "Ceased",
            Self::Suspended => "Suspended",
        }
    }
}

/// Enriched legal and financial record from Pappers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PappersRecord {
    #[serde(default)]
    pub legal_form: Option<String>,
    #[serde(default)]
    pub capital: Option<f64>,
    #[serde(default)]
    pub bilans: Vec<Bilan>,
}

/// Annual financial statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bilan {
    pub year: i32,
    pub revenue: f64,
    pub net_result: f64,
    pub equity: f64,
    pub debts: f64,
    #[serde(default)]
    pub headcount: Option<u32>,
}

impl Bilan {
    /// Net margin, guarded against zero revenue so downstream weighted sums
    /// never see NaN.
    pub fn margin(&self) -> Option<f64> {
        if self.revenue == 0.0 {
            None
        } else {
            Some(self.net_result / self.revenue)
        }
    }

    /// Debt-to-equity ratio, defined only for strictly positive equity.
    pub fn debt_to_equity(&self) -> Option<f64> {
        if self.equity <= 0.0 {
            None
        } else {
            Some(self.debts / self.equity)
        }
    }
}

/// Legal-registry record from Infogreffe, including purchased analytics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfogreffeRecord {
    #[serde(default)]
    pub legal_form: Option<String>,
    #[serde(default)]
    pub capital: Option<f64>,
    #[serde(default)]
    pub rcs_number: Option<String>,
    #[serde(default)]
    pub registry_court: Option<String>,
    #[serde(default)]
    pub procedures: Vec<CollectiveProcedure>,
    #[serde(default)]
    pub filed_account_years: Vec<i32>,
    #[serde(default)]
    pub notapme_scores: Option<NotapmeScores>,
    #[serde(default)]
    pub afdcc_score: Option<AfdccScore>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectiveProcedure {
    pub kind: String,
    #[serde(default)]
    pub opened_on: Option<NaiveDate>,
}

/// NOTAPME financial-health indices. `performance` is a 0-20 index; the
/// remaining components share the product's 0-10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NotapmeScores {
    pub performance: f64,
    pub solvency: f64,
    pub profitability: f64,
    pub robustness: f64,
}

/// AFDCC default-risk rating: numeric note plus the letter notation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AfdccScore {
    pub note: u8,
    pub notation: String,
}

/// BODACC legal announcement history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodaccRecord {
    #[serde(default)]
    pub annonces: Vec<BodaccAnnonce>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodaccAnnonce {
    pub date: NaiveDate,
    pub kind: AnnonceKind,
    #[serde(default)]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnonceKind {
    Creation,
    Modification,
    CollectiveProcedure,
    Dissolution,
    Other,
}

impl AnnonceKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Creation => "Création",
            Self::Modification => "Modification",
            Self::CollectiveProcedure => "Procédure collective",
            Self::Dissolution => "Dissolution",
            Self::Other => "Autre",
        }
    }
}

/// Payment-behavior source: either an operational profile or a marker that the
/// RubyPayeur service could not be reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "profile")]
pub enum RubyPayeurRecord {
    Available(PaymentProfile),
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentProfile {
    #[serde(default)]
    pub global_score: Option<f64>,
    #[serde(default)]
    pub payment_score: Option<f64>,
    pub average_delay_days: f64,
    pub incident_count: u32,
    pub trend: PaymentTrend,
    #[serde(default)]
    pub alerts: Vec<PaymentAlert>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentTrend {
    Improving,
    Stable,
    Deteriorating,
}

impl PaymentTrend {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Improving => "Improving",
            Self::Stable => "Stable",
            Self::Deteriorating => "Deteriorating",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentAlert {
    pub kind: PaymentAlertKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentAlertKind {
    Incident,
    Delay,
    Other,
}

/// Internally computed prior analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictorAnalysis {
    #[serde(default)]
    pub global_score: Option<f64>,
    #[serde(default)]
    pub financial_score: Option<f64>,
    #[serde(default)]
    pub legal_score: Option<f64>,
    #[serde(default)]
    pub fiscal_score: Option<f64>,
    #[serde(default)]
    pub risk_score: Option<f64>,
    #[serde(default)]
    pub default_probabilities: Vec<DefaultProbability>,
}

/// Default probability over a given horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DefaultProbability {
    pub horizon_months: u8,
    pub probability: f64,
}

/// Per-source fetch failure recorded by the aggregation layer. Informational
/// only: it feeds reliability, not control flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceError {
    pub source: DataSource,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Sirene,
    Pappers,
    Infogreffe,
    Bodacc,
    RubyPayeur,
    Predictor,
}

impl DataSource {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sirene => "SIRENE",
            Self::Pappers => "Pappers",
            Self::Infogreffe => "Infogreffe",
            Self::Bodacc => "BODACC",
            Self::RubyPayeur => "RubyPayeur",
            Self::Predictor => "Predictor",
        }
    }
}
