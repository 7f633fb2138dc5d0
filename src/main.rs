use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use predicor::config::AppConfig;
use predicor::error::AppError;
use predicor::scoring::{
    self, calculate_potential_savings, should_use_fallback, CompanyFullData, FallbackScoreResult,
    HybridScoreResult, PotentialSavings, PremiumRecommendation, ScoreDossier, ScoreReading,
};
use predicor::telemetry;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Predicor",
    about = "Score French companies from aggregated registry, legal, and payment data",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score company dossiers from the command line
    Score {
        #[command(subcommand)]
        command: ScoreCommand,
    },
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum ScoreCommand {
    /// Score one dossier and print a full plain-text report
    Report(ScoreReportArgs),
    /// Score a JSON array of dossiers and export a CSV summary
    Batch(ScoreBatchArgs),
}

#[derive(Args, Debug)]
struct ScoreReportArgs {
    /// JSON file holding one aggregated company dossier
    #[arg(long)]
    input: PathBuf,
    /// Evaluation date for the report (defaults to today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
struct ScoreBatchArgs {
    /// JSON file holding an array of aggregated company dossiers
    #[arg(long)]
    input: PathBuf,
    /// Destination CSV file for the per-company summary
    #[arg(long)]
    output: PathBuf,
    /// Evaluation date for the batch (defaults to today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
struct ScoreRequest {
    company: CompanyFullData,
    #[serde(default)]
    today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
struct FallbackScoreResponse {
    applicable: bool,
    result: FallbackScoreResult,
}

#[derive(Debug, Serialize)]
struct PremiumResponse {
    recommendations: Vec<PremiumRecommendation>,
    savings: PotentialSavings,
}

#[derive(Debug, Serialize)]
struct LegacyScoreResponse {
    financial: ScoreReading,
    risk: ScoreReading,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Score {
            command: ScoreCommand::Report(args),
        } => run_score_report(args),
        Command::Score {
            command: ScoreCommand::Batch(args),
        } => run_score_batch(args),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .merge(score_routes())
        .layer(prometheus_layer)
        .with_state(state);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "company scoring service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_score_report(args: ScoreReportArgs) -> Result<(), AppError> {
    let ScoreReportArgs { input, today } = args;

    let raw = fs::read_to_string(input)?;
    let company: CompanyFullData = serde_json::from_str(&raw)?;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let dossier = scoring::score_dossier(&company, today);

    render_dossier_report(&dossier);
    Ok(())
}

fn run_score_batch(args: ScoreBatchArgs) -> Result<(), AppError> {
    let ScoreBatchArgs {
        input,
        output,
        today,
    } = args;

    let raw = fs::read_to_string(input)?;
    let companies: Vec<CompanyFullData> = serde_json::from_str(&raw)?;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let count = companies.len();

    let mut writer = csv::Writer::from_path(&output)?;
    writer.write_record([
        "siren",
        "denomination",
        "global_score",
        "economic",
        "legal",
        "financial",
        "risk",
        "reliability_pct",
        "is_fallback",
        "fallback_score",
        "legacy_financial",
        "legacy_risk",
    ])?;

    for company in &companies {
        let dossier = scoring::score_dossier(company, today);
        writer.write_record([
            dossier.siren.clone(),
            dossier.denomination.clone().unwrap_or_default(),
            dossier.hybrid.global_score.to_string(),
            dossier.hybrid.economic.score.to_string(),
            dossier.hybrid.legal.score.to_string(),
            dossier.hybrid.financial.score.to_string(),
            dossier.hybrid.risk.score.to_string(),
            dossier.hybrid.reliability.percentage.to_string(),
            dossier.hybrid.is_fallback.to_string(),
            dossier.fallback.score.to_string(),
            format!("{:.1}", dossier.legacy_financial.score),
            format!("{:.1}", dossier.legacy_risk.score),
        ])?;
    }

    writer.flush()?;
    info!(count, output = %output.display(), "batch scoring summary written");
    println!(
        "Scored {count} companies; summary written to {}",
        output.display()
    );
    Ok(())
}

fn score_routes<S: Clone + Send + Sync + 'static>() -> Router<S> {
    Router::new()
        .route("/api/v1/scores/hybrid", post(hybrid_score_endpoint))
        .route("/api/v1/scores/fallback", post(fallback_score_endpoint))
        .route("/api/v1/scores/premium", post(premium_score_endpoint))
        .route("/api/v1/scores/legacy", post(legacy_score_endpoint))
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

async fn hybrid_score_endpoint(
    Json(payload): Json<ScoreRequest>,
) -> Result<Json<HybridScoreResult>, AppError> {
    let ScoreRequest { company, today } = payload;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    let result = scoring::hybrid::compute(&company, today);
    info!(
        siren = %company.sirene.siren,
        score = result.global_score,
        reliability = result.reliability.percentage,
        "hybrid score computed"
    );

    Ok(Json(result))
}

async fn fallback_score_endpoint(
    Json(payload): Json<ScoreRequest>,
) -> Result<Json<FallbackScoreResponse>, AppError> {
    let ScoreRequest { company, today } = payload;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    let applicable = should_use_fallback(&company, today);
    let result = scoring::fallback::compute(&company, today);
    info!(
        siren = %company.sirene.siren,
        score = result.score,
        applicable,
        "fallback score computed"
    );

    Ok(Json(FallbackScoreResponse { applicable, result }))
}

async fn premium_score_endpoint(
    Json(payload): Json<ScoreRequest>,
) -> Result<Json<PremiumResponse>, AppError> {
    let ScoreRequest { company, today } = payload;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    let recommendations = scoring::generate_recommendations(&company, today);
    let savings = calculate_potential_savings(&recommendations);
    info!(
        siren = %company.sirene.siren,
        recommended = savings.recommended_endpoints.len(),
        skipped = savings.skipped_endpoints.len(),
        "premium recommendations computed"
    );

    Ok(Json(PremiumResponse {
        recommendations,
        savings,
    }))
}

async fn legacy_score_endpoint(
    Json(payload): Json<ScoreRequest>,
) -> Result<Json<LegacyScoreResponse>, AppError> {
    let ScoreRequest { company, today: _ } = payload;

    let financial = scoring::legacy::financial_score(&company);
    let risk = scoring::legacy::risk_score(&company);
    info!(
        siren = %company.sirene.siren,
        financial = financial.score,
        risk = risk.score,
        "legacy scores computed"
    );

    Ok(Json(LegacyScoreResponse { financial, risk }))
}

fn render_dossier_report(dossier: &ScoreDossier) {
    let denomination = dossier.denomination.as_deref().unwrap_or("(unnamed)");
    println!("Company scoring report");
    println!(
        "{} (SIREN {}), evaluated {}",
        denomination, dossier.siren, dossier.evaluated_on
    );

    println!("\nHybrid score: {}/100", dossier.hybrid.global_score);
    for (label, sub) in [
        ("Economic", dossier.hybrid.economic),
        ("Legal", dossier.hybrid.legal),
        ("Financial", dossier.hybrid.financial),
        ("Risk", dossier.hybrid.risk),
    ] {
        println!(
            "- {}: {}/100 (weight {:.0}%, reliability {}%)",
            label,
            sub.score,
            sub.weight * 100.0,
            sub.reliability
        );
    }
    println!(
        "Reliability: {}% from {}",
        dossier.hybrid.reliability.percentage,
        dossier.hybrid.reliability.sources.join(", ")
    );
    println!("{}", dossier.hybrid.explanation);

    if dossier.hybrid.is_fallback {
        println!("\nFallback score: {}/70", dossier.fallback.score);
        println!("Missing sources: {}", dossier.fallback.reason);
        for entry in &dossier.fallback.breakdown {
            println!(
                "- {}: -{} / +{}",
                entry.category_label, entry.penalty, entry.bonus
            );
            for detail in &entry.details {
                println!("  * {detail}");
            }
        }
        println!("{}", dossier.fallback.explanation);
    }

    if dossier.hybrid.recommendation.needs_premium {
        println!(
            "\nPremium data could improve this score by up to {} points.",
            dossier.hybrid.recommendation.potential_improvement
        );
    }

    println!("\nPremium purchase advice");
    for recommendation in &dossier.premium {
        println!(
            "- {} [{}]: {} ({} credits, {:.0} EUR)",
            recommendation.endpoint_label,
            recommendation.level.label(),
            recommendation.reason,
            recommendation.cost.credits,
            recommendation.cost.euros
        );
    }

    println!("\nLegacy scores (1-10 scale)");
    println!(
        "- Financial: {:.1} via {}",
        dossier.legacy_financial.score, dossier.legacy_financial.source_label
    );
    println!(
        "- Risk: {:.1} via {}",
        dossier.legacy_risk.score, dossier.legacy_risk.source_label
    );
}
