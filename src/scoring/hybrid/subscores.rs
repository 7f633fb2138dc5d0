use super::{SubScore, ECONOMIC_WEIGHT, FINANCIAL_WEIGHT, LEGAL_WEIGHT, RISK_WEIGHT};
use crate::scoring::domain::{AnnonceKind, Bilan, CompanyFullData};
use crate::scoring::fallback;
use chrono::{Duration, NaiveDate};

fn clamp_score(value: i32) -> u8 {
    value.clamp(0, 100) as u8
}

fn clamp_reliability(value: u32) -> u8 {
    value.min(100) as u8
}

/// Economic health: turnover scale, growth, workforce, profitability.
pub(crate) fn economic(data: &CompanyFullData, today: NaiveDate) -> SubScore {
    let mut score: i32 = 50;
    let mut reliability: u32 = 30;

    if data.has_recent_bilan(today) {
        let mut bilans: Vec<&Bilan> = data
            .pappers
            .as_ref()
            .map(|pappers| pappers.bilans.iter().collect())
            .unwrap_or_default();
        bilans.sort_by_key(|bilan| std::cmp::Reverse(bilan.year));

        if let Some(latest) = bilans.first() {
            reliability += 40;

            score += revenue_tier(latest.revenue);

            if let Some(previous) = bilans.get(1) {
                reliability += 20;
                if previous.revenue != 0.0 {
                    let growth = (latest.revenue - previous.revenue) / previous.revenue;
                    score += growth_tier(growth);
                }
            }

            let headcount = latest.headcount.or_else(|| data.sirene.headcount_floor());
            if let Some(count) = headcount {
                score += match count {
                    51.. => 15,
                    11..=50 => 10,
                    1..=10 => 5,
                    0 => -10,
                };
            }

            if let Some(margin) = latest.margin() {
                if margin > 0.15 {
                    score += 20;
                } else if margin > 0.05 {
                    score += 10;
                } else if margin > 0.0 {
                    score += 5;
                } else if latest.net_result < 0.0 {
                    score -= 15;
                }
            } else if latest.net_result < 0.0 {
                score -= 15;
            }
        }
    } else if let Some(count) = data.sirene.headcount_floor() {
        // Without financial statements only the SIRENE bracket remains, with
        // reduced bonuses and no reliability uplift.
        reliability += 10;
        score += match count {
            51.. => 10,
            11..=50 => 5,
            1..=10 => 2,
            0 => -5,
        };
    }

    if let Some(naf) = data.sirene.naf_code.as_deref() {
        reliability += 10;
        if ["56", "47", "41"].iter().any(|p| naf.starts_with(p)) {
            score -= 10;
        } else if ["62", "71", "86"].iter().any(|p| naf.starts_with(p)) {
            score += 5;
        }
    }

    SubScore {
        score: clamp_score(score),
        weight: ECONOMIC_WEIGHT,
        reliability: clamp_reliability(reliability),
    }
}

fn revenue_tier(revenue: f64) -> i32 {
    if revenue > 10_000_000.0 {
        25
    } else if revenue > 1_000_000.0 {
        20
    } else if revenue > 100_000.0 {
        10
    } else if revenue < 10_000.0 {
        -15
    } else {
        0
    }
}

fn growth_tier(growth: f64) -> i32 {
    if growth > 0.20 {
        15
    } else if growth > 0.10 {
        10
    } else if growth > 0.0 {
        5
    } else if growth < -0.20 {
        -20
    } else if growth < -0.10 {
        -10
    } else {
        0
    }
}

/// Legal standing: starts from a presumption of innocence and subtracts the
/// weak-signal penalties shared with the fallback calculator.
pub(crate) fn legal(data: &CompanyFullData, today: NaiveDate) -> SubScore {
    let mut score: i32 = 80;
    let mut reliability: u32 = 60;

    let procedures = fallback::legal_procedures(data, today);
    score -= procedures.penalty as i32;

    let obligations = fallback::legal_obligations(data, today);
    score -= obligations.penalty.min(30) as i32;

    if let Some(form) = data.legal_form() {
        reliability += 10;
        if has_formal_governance(form) {
            score += 5;
        }
    }

    if data.bodacc.is_some() {
        reliability += 30;
    }

    SubScore {
        score: clamp_score(score),
        weight: LEGAL_WEIGHT,
        reliability: clamp_reliability(reliability),
    }
}

/// SA and SAS/SASU forms carry stricter governance; SARL and others do not.
fn has_formal_governance(form: &str) -> bool {
    let token = form
        .split(|c: char| c.is_whitespace() || c == ',')
        .next()
        .unwrap_or(form)
        .to_ascii_uppercase();
    token == "SA" || token.starts_with("SAS")
}

/// Financial strength: premium NOTAPME index when purchased, otherwise ratios
/// from the latest Pappers bilan.
pub(crate) fn financial(data: &CompanyFullData) -> SubScore {
    if let Some(notapme) = data
        .infogreffe
        .as_ref()
        .and_then(|record| record.notapme_scores.as_ref())
    {
        // The 0-20 performance index maps directly onto the 0-100 scale.
        let score = clamp_score((notapme.performance / 20.0 * 100.0).round() as i32);
        return SubScore {
            score,
            weight: FINANCIAL_WEIGHT,
            reliability: 95,
        };
    }

    let mut score: i32 = 50;
    let mut reliability: u32 = 20;

    if let Some(latest) = data.latest_bilan() {
        reliability = 70;

        if let Some(margin) = latest.margin() {
            if margin > 0.15 {
                score += 30;
            } else if margin > 0.05 {
                score += 20;
            } else if margin > 0.0 {
                score += 10;
            } else if margin < -0.10 {
                score -= 20;
            }
        }

        if let Some(ratio) = latest.debt_to_equity() {
            if ratio < 0.5 {
                score += 15;
            } else if ratio < 1.0 {
                score += 10;
            } else if ratio > 3.0 {
                score -= 20;
            } else if ratio > 2.0 {
                score -= 10;
            }
        }

        if latest.revenue > 1_000_000.0 {
            score += 10;
        } else if latest.revenue < 50_000.0 {
            score -= 10;
        }
    }

    SubScore {
        score: clamp_score(score),
        weight: FINANCIAL_WEIGHT,
        reliability: clamp_reliability(reliability),
    }
}

/// Default risk: AFDCC rating when purchased, otherwise payment behavior,
/// the internal predictor, and procedure announcements.
pub(crate) fn risk(data: &CompanyFullData, today: NaiveDate) -> SubScore {
    if let Some(afdcc) = data
        .infogreffe
        .as_ref()
        .and_then(|record| record.afdcc_score.as_ref())
    {
        let score = clamp_score(100 - afdcc.note as i32 * 5);
        return SubScore {
            score,
            weight: RISK_WEIGHT,
            reliability: 95,
        };
    }

    let mut score: i32 = 80;
    let mut reliability: u32 = 30;

    if let Some(profile) = data.payment_profile() {
        reliability += 40;
        if let Some(global) = profile.global_score {
            score = clamp_score(global.round() as i32) as i32;
        }

        score -= (profile.incident_count.saturating_mul(5)).min(30) as i32;

        // NOTE: the >60 arm is unreachable because >30 already matches; the
        // ladder is kept as shipped until product confirms the intended order.
        if profile.average_delay_days > 30.0 {
            score -= 15;
        } else if profile.average_delay_days > 60.0 {
            score -= 25;
        }
    }

    if let Some(global) = data
        .predictor
        .as_ref()
        .and_then(|predictor| predictor.global_score)
    {
        reliability += 20;
        score = score.max(clamp_score(global.round() as i32) as i32);
    }

    if has_active_collective_procedure(data, today) {
        reliability += 20;
        score -= 40;
    }

    SubScore {
        score: clamp_score(score),
        weight: RISK_WEIGHT,
        reliability: clamp_reliability(reliability),
    }
}

/// A collective-procedure announcement within the last twelve months.
pub(crate) fn has_active_collective_procedure(data: &CompanyFullData, today: NaiveDate) -> bool {
    let one_year_ago = today - Duration::days(365);
    data.bodacc
        .iter()
        .flat_map(|record| record.annonces.iter())
        .any(|annonce| {
            annonce.kind == AnnonceKind::CollectiveProcedure && annonce.date >= one_year_ago
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::domain::{
        AfdccScore, CompanyStatus, InfogreffeRecord, NotapmeScores, PappersRecord, SireneRecord,
    };

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date")
    }

    fn company_with(bilans: Vec<Bilan>) -> CompanyFullData {
        CompanyFullData {
            sirene: SireneRecord {
                siren: "552100554".to_string(),
                siret: None,
                denomination: Some("EXEMPLE SAS".to_string()),
                naf_code: None,
                headcount_bracket: None,
                address: Some("10 rue des Scores, Paris".to_string()),
                creation_date: Some(NaiveDate::from_ymd_opt(2015, 1, 1).unwrap()),
                status: CompanyStatus::Active,
            },
            pappers: Some(PappersRecord {
                legal_form: Some("SAS".to_string()),
                capital: Some(50_000.0),
                bilans,
            }),
            infogreffe: None,
            bodacc: None,
            ruby_payeur: None,
            predictor: None,
            errors: Vec::new(),
        }
    }

    fn bilan(year: i32, revenue: f64, net_result: f64) -> Bilan {
        Bilan {
            year,
            revenue,
            net_result,
            equity: 1_000_000.0,
            debts: 200_000.0,
            headcount: Some(60),
        }
    }

    #[test]
    fn economic_rewards_growth_and_scale() {
        let company = company_with(vec![
            bilan(2024, 2_400_000.0, 360_000.0),
            bilan(2023, 1_800_000.0, 200_000.0),
        ]);
        let sub = economic(&company, today());
        // 50 + 20 revenue + 15 growth (>20 %) + 15 headcount + 10 margin (15 %).
        assert_eq!(sub.score, 100);
        // 30 + 40 bilans + 20 multi-year.
        assert_eq!(sub.reliability, 90);
    }

    #[test]
    fn economic_uses_sirene_bracket_without_bilans() {
        let mut company = company_with(Vec::new());
        company.sirene.headcount_bracket = Some("20 à 49 salariés".to_string());
        let sub = economic(&company, today());
        assert_eq!(sub.score, 55);
        assert_eq!(sub.reliability, 40);
    }

    #[test]
    fn financial_short_circuits_on_notapme() {
        let mut company = company_with(Vec::new());
        company.infogreffe = Some(InfogreffeRecord {
            legal_form: None,
            capital: None,
            rcs_number: None,
            registry_court: None,
            procedures: Vec::new(),
            filed_account_years: Vec::new(),
            notapme_scores: Some(NotapmeScores {
                performance: 16.0,
                solvency: 7.0,
                profitability: 6.5,
                robustness: 8.0,
            }),
            afdcc_score: None,
        });
        let sub = financial(&company);
        assert_eq!(sub.score, 80);
        assert_eq!(sub.reliability, 95);
    }

    #[test]
    fn financial_reads_margin_and_leverage_from_bilan() {
        // Margin exactly 15 % lands in the >5 % tier: 50 + 20 + 15 + 10 = 95.
        let company = company_with(vec![bilan(2024, 2_000_000.0, 300_000.0)]);
        let sub = financial(&company);
        assert_eq!(sub.score, 95);
        assert_eq!(sub.reliability, 70);
    }

    #[test]
    fn risk_short_circuits_on_afdcc() {
        let mut company = company_with(Vec::new());
        company.infogreffe = Some(InfogreffeRecord {
            legal_form: None,
            capital: None,
            rcs_number: None,
            registry_court: None,
            procedures: Vec::new(),
            filed_account_years: Vec::new(),
            notapme_scores: None,
            afdcc_score: Some(AfdccScore {
                note: 7,
                notation: "BBB".to_string(),
            }),
        });
        let sub = risk(&company, today());
        assert_eq!(sub.score, 65);
        assert_eq!(sub.reliability, 95);
    }

    #[test]
    fn legal_bonus_skips_sarl() {
        assert!(has_formal_governance("SA"));
        assert!(has_formal_governance("SAS"));
        assert!(has_formal_governance("SASU"));
        assert!(!has_formal_governance("SARL"));
        assert!(!has_formal_governance("EURL"));
    }
}
