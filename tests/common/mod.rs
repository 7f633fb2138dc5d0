#![allow(dead_code)]

use chrono::NaiveDate;
use predicor::scoring::domain::{
    AfdccScore, AnnonceKind, Bilan, BodaccAnnonce, BodaccRecord, CompanyFullData, CompanyStatus,
    InfogreffeRecord, PappersRecord, PaymentProfile, PaymentTrend, RubyPayeurRecord, SireneRecord,
};

pub fn evaluation_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid evaluation date")
}

/// A dossier holding nothing but the mandatory registry record: the company
/// exists, nothing else is known.
pub fn sirene_only() -> CompanyFullData {
    CompanyFullData {
        sirene: SireneRecord {
            siren: "421595051".to_string(),
            siret: Some("42159505100033".to_string()),
            denomination: Some("MAISON DELORME".to_string()),
            naf_code: None,
            headcount_bracket: None,
            address: Some("4 place du Marché, 69002 Lyon".to_string()),
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

/// A healthy mid-size SAS with two filed bilans showing growth and a 15 %
/// net margin on the latest year.
pub fn healthy_sas() -> CompanyFullData {
    CompanyFullData {
        sirene: SireneRecord {
            siren: "552100554".to_string(),
            siret: None,
            denomination: Some("NOVATECH SAS".to_string()),
            naf_code: Some("62.01Z".to_string()),
            headcount_bracket: Some("20 à 49 salariés".to_string()),
            address: Some("8 rue de l'Innovation, 44000 Nantes".to_string()),
            creation_date: Some(NaiveDate::from_ymd_opt(2012, 5, 10).expect("valid date")),
            status: CompanyStatus::Active,
        },
        pappers: Some(PappersRecord {
            legal_form: Some("SAS".to_string()),
            capital: Some(100_000.0),
            bilans: vec![
                Bilan {
                    year: 2024,
                    revenue: 2_000_000.0,
                    net_result: 300_000.0,
                    equity: 1_000_000.0,
                    debts: 200_000.0,
                    headcount: Some(25),
                },
                Bilan {
                    year: 2023,
                    revenue: 1_700_000.0,
                    net_result: 210_000.0,
                    equity: 850_000.0,
                    debts: 260_000.0,
                    headcount: Some(22),
                },
            ],
        }),
        infogreffe: None,
        bodacc: None,
        ruby_payeur: None,
        predictor: None,
        errors: Vec::new(),
    }
}

/// An older company with a collective procedure announced six months before
/// the evaluation date and no financial statement on record.
pub fn troubled_company() -> CompanyFullData {
    let mut company = sirene_only();
    company.sirene.siren = "339863417".to_string();
    company.sirene.denomination = Some("BATIMENTS REUNIS".to_string());
    company.sirene.creation_date = NaiveDate::from_ymd_opt(2010, 2, 1);
    company.bodacc = Some(BodaccRecord {
        annonces: vec![BodaccAnnonce {
            date: NaiveDate::from_ymd_opt(2024, 12, 10).expect("valid date"),
            kind: AnnonceKind::CollectiveProcedure,
            detail: Some("Jugement d'ouverture de redressement judiciaire".to_string()),
        }],
    });
    company
}

/// A company whose only purchased analytic is an AFDCC rating of BBB
/// (note 7 on the 0-20 scale).
pub fn afdcc_rated_company() -> CompanyFullData {
    let mut company = sirene_only();
    company.sirene.siren = "775665019".to_string();
    company.infogreffe = Some(InfogreffeRecord {
        legal_form: Some("SA".to_string()),
        capital: Some(500_000.0),
        rcs_number: Some("RCS Paris 775 665 019".to_string()),
        registry_court: Some("Paris".to_string()),
        procedures: Vec::new(),
        filed_account_years: Vec::new(),
        notapme_scores: None,
        afdcc_score: Some(AfdccScore {
            note: 7,
            notation: "BBB".to_string(),
        }),
    });
    company
}

pub fn clean_payment_profile() -> RubyPayeurRecord {
    RubyPayeurRecord::Available(PaymentProfile {
        global_score: Some(82.0),
        payment_score: Some(85.0),
        average_delay_days: 6.0,
        incident_count: 0,
        trend: PaymentTrend::Stable,
        alerts: Vec::new(),
    })
}
