//! The report pipeline: SEARCH → COMPARE → RENDER → DELIVER.
//!
//! Strictly sequential; a failure at any stage ends the run with that stage
//! named in the error. The only designed degradation is the per-field
//! empty-list default inside the comparison parser.

#[cfg(test)]
mod run_test;

use chrono::Utc;
use thiserror::Error;

use rivalscan_core::validate::{validate_product_name, validate_recipient, ValidationError};
use rivalscan_core::{AppConfig, DEFAULT_ASPECTS};
use rivalscan_llm::{compare_candidates, LlmError, OpenRouterClient};
use rivalscan_mailer::{MailError, ReportMailer, SmtpMailer};
use rivalscan_report::{render_comparison_report, ReportError};
use rivalscan_serp::{discover_competitors, product_description, SerpClient, SerpError};

pub(crate) const DEFAULT_COMPETITOR_LIMIT: usize = 5;

const MAIL_BODY: &str = "Hi,\n\nAttached is your generated competitor report PDF.\n\nBest regards,\nrivalscan";

/// A search or generation provider failure.
#[derive(Debug, Error)]
pub(crate) enum UpstreamError {
    #[error(transparent)]
    Search(#[from] SerpError),
    #[error(transparent)]
    Generation(#[from] LlmError),
}

/// Why a pipeline run failed, by stage.
#[derive(Debug, Error)]
pub(crate) enum RunError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("{stage} upstream unavailable: {source}")]
    UpstreamUnavailable {
        stage: &'static str,
        #[source]
        source: UpstreamError,
    },

    #[error("render failed: {0}")]
    Render(#[from] ReportError),

    #[error("delivery failed: {0}")]
    Delivery(#[from] MailError),
}

impl RunError {
    pub(crate) fn search(error: SerpError) -> Self {
        Self::UpstreamUnavailable {
            stage: "search",
            source: error.into(),
        }
    }

    pub(crate) fn compare(error: LlmError) -> Self {
        Self::UpstreamUnavailable {
            stage: "compare",
            source: error.into(),
        }
    }

    pub(crate) fn stage(&self) -> &'static str {
        match self {
            RunError::Validation(_) => "validate",
            RunError::UpstreamUnavailable { stage, .. } => stage,
            RunError::Render(_) => "render",
            RunError::Delivery(_) => "deliver",
        }
    }
}

/// Inputs for one report run.
#[derive(Debug, Clone)]
pub(crate) struct ReportRequest {
    pub product: String,
    pub niche: Option<String>,
    pub recipient: String,
    pub limit: usize,
    pub aspects: Vec<String>,
}

/// What a successful run produced.
#[derive(Debug)]
pub(crate) struct RunOutcome {
    pub title: String,
    pub competitors: usize,
    pub delivered_at: chrono::DateTime<Utc>,
}

/// Run the full pipeline once with the given clients.
///
/// Validation happens before any network call. Zero discovered candidates
/// still produce (and deliver) a placeholder report.
pub(crate) async fn execute<M: ReportMailer>(
    serp: &SerpClient,
    llm: &OpenRouterClient,
    mailer: &M,
    request: &ReportRequest,
) -> Result<RunOutcome, RunError> {
    let product = validate_product_name(&request.product)?;
    let recipient = validate_recipient(&request.recipient)?;
    let aspects = effective_aspects(&request.aspects);

    tracing::info!(product, stage = "search", "discovering competitors");
    let description = product_description(serp, product, request.niche.as_deref())
        .await
        .map_err(RunError::search)?;
    let candidates = discover_competitors(serp, product, request.limit)
        .await
        .map_err(RunError::search)?;

    tracing::info!(
        product,
        stage = "compare",
        candidates = candidates.len(),
        "comparing against candidates"
    );
    let comparisons = compare_candidates(llm, product, &description, &candidates, &aspects)
        .await
        .map_err(RunError::compare)?;

    tracing::info!(product, stage = "render", "rendering report");
    let document = render_comparison_report(product, &comparisons, Utc::now())?;

    tracing::info!(product, stage = "deliver", to = recipient, "sending report");
    let subject = format!("Your competitor report for {product} is ready");
    let delivered_at = mailer.send(recipient, &subject, MAIL_BODY, &document).await?;

    Ok(RunOutcome {
        title: document.title,
        competitors: comparisons.len(),
        delivered_at,
    })
}

/// `report` command: build production clients, run the pipeline, and
/// optionally record a subscription after full success.
pub(crate) async fn run_report(
    config: &AppConfig,
    request: &ReportRequest,
    subscribe: bool,
) -> anyhow::Result<()> {
    let serp = SerpClient::new(&config.serpapi_key, config.search_timeout_secs)?;
    let llm = OpenRouterClient::new(
        &config.openrouter_api_key,
        &config.llm_model,
        config.llm_timeout_secs,
    )?;
    let mailer = SmtpMailer::new(
        &config.smtp_host,
        &config.sender_address,
        &config.sender_password,
    )?;

    let outcome = execute(&serp, &llm, &mailer, request).await.map_err(|e| {
        tracing::error!(stage = e.stage(), error = %e, "report run failed");
        e
    })?;

    println!(
        "'{}' delivered to {} at {} ({} competitors)",
        outcome.title,
        request.recipient.trim(),
        outcome.delivered_at.format("%Y-%m-%d %H:%M:%S UTC"),
        outcome.competitors
    );

    if subscribe {
        let pool = rivalscan_db::connect_pool(&config.database_url).await?;
        rivalscan_db::run_migrations(&pool).await?;
        let row = rivalscan_db::subscribe(
            &pool,
            request.recipient.trim(),
            request.product.trim(),
        )
        .await?;
        println!(
            "subscribed {} to recurring reports for {}",
            row.user_email, row.tracked_product
        );
    }

    Ok(())
}

/// `run-due` command: run the pipeline for every due subscription.
///
/// Per-subscription failures are logged and skipped; the command fails only
/// when every due run failed.
pub(crate) async fn run_due(config: &AppConfig) -> anyhow::Result<()> {
    let pool = rivalscan_db::connect_pool(&config.database_url).await?;
    rivalscan_db::run_migrations(&pool).await?;

    let due = rivalscan_db::list_due(&pool, Utc::now(), config.cadence_days).await?;
    if due.is_empty() {
        println!("no subscriptions due");
        return Ok(());
    }

    let serp = SerpClient::new(&config.serpapi_key, config.search_timeout_secs)?;
    let llm = OpenRouterClient::new(
        &config.openrouter_api_key,
        &config.llm_model,
        config.llm_timeout_secs,
    )?;
    let mailer = SmtpMailer::new(
        &config.smtp_host,
        &config.sender_address,
        &config.sender_password,
    )?;

    let mut failed = 0usize;
    for subscription in &due {
        let request = ReportRequest {
            product: subscription.tracked_product.clone(),
            niche: None,
            recipient: subscription.user_email.clone(),
            limit: DEFAULT_COMPETITOR_LIMIT,
            aspects: Vec::new(),
        };

        match execute(&serp, &llm, &mailer, &request).await {
            Ok(outcome) => {
                rivalscan_db::mark_run(&pool, subscription.id, Utc::now()).await?;
                tracing::info!(
                    subscription = %subscription.public_id,
                    product = %subscription.tracked_product,
                    competitors = outcome.competitors,
                    "scheduled run delivered"
                );
            }
            Err(e) => {
                tracing::error!(
                    subscription = %subscription.public_id,
                    stage = e.stage(),
                    error = %e,
                    "scheduled run failed"
                );
                failed += 1;
            }
        }
    }

    if failed == due.len() {
        anyhow::bail!("all {failed} due runs failed");
    }

    println!("completed {} of {} due runs", due.len() - failed, due.len());
    Ok(())
}

/// Caller-supplied aspects, or the defaults; blank entries are dropped.
fn effective_aspects(aspects: &[String]) -> Vec<String> {
    let cleaned: Vec<String> = aspects
        .iter()
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .collect();

    if cleaned.is_empty() {
        DEFAULT_ASPECTS.iter().map(ToString::to_string).collect()
    } else {
        cleaned
    }
}
