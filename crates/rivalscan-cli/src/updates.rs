//! The competitor-updates pipeline: changelog search → summary → PDF → email.
//!
//! Same stage taxonomy as the report pipeline, keyed on the caller-supplied
//! competitor names instead of discovered candidates.

use chrono::Utc;

use rivalscan_core::validate::{validate_product_name, validate_recipient};
use rivalscan_core::{AppConfig, UpdateDigest};
use rivalscan_llm::{summarize_updates, OpenRouterClient};
use rivalscan_mailer::{ReportMailer, SmtpMailer};
use rivalscan_report::render_updates_report;
use rivalscan_serp::{changelog_snippets, SerpClient};

use crate::report::RunError;

const MAIL_BODY: &str =
    "Hi,\n\nAttached is your competitor updates digest PDF.\n\nBest regards,\nrivalscan";

/// Run the updates pipeline once with the given clients.
pub(crate) async fn execute<M: ReportMailer>(
    serp: &SerpClient,
    llm: &OpenRouterClient,
    mailer: &M,
    product: &str,
    competitors: &[String],
    recipient: &str,
    max_snippets: usize,
) -> Result<usize, RunError> {
    let product = validate_product_name(product)?;
    let recipient = validate_recipient(recipient)?;

    let mut digests: Vec<UpdateDigest> = Vec::with_capacity(competitors.len());
    for competitor in competitors {
        let competitor = competitor.trim();
        if competitor.is_empty() {
            continue;
        }

        tracing::info!(competitor, stage = "search", "collecting changelog snippets");
        let snippets = changelog_snippets(serp, competitor, max_snippets)
            .await
            .map_err(RunError::search)?;

        tracing::info!(
            competitor,
            stage = "compare",
            snippets = snippets.len(),
            "summarizing updates"
        );
        let digest = summarize_updates(llm, competitor, &snippets)
            .await
            .map_err(RunError::compare)?;
        digests.push(digest);
    }

    tracing::info!(product, stage = "render", "rendering updates digest");
    let document = render_updates_report(product, &digests, Utc::now())?;

    tracing::info!(product, stage = "deliver", to = recipient, "sending digest");
    let subject = format!("Competitor updates digest for {product}");
    mailer.send(recipient, &subject, MAIL_BODY, &document).await?;

    Ok(digests.len())
}

/// `updates` command: build production clients and run the updates pipeline.
pub(crate) async fn run_updates(
    config: &AppConfig,
    product: &str,
    competitors: &[String],
    recipient: &str,
    max_snippets: usize,
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

    let count = execute(
        &serp,
        &llm,
        &mailer,
        product,
        competitors,
        recipient,
        max_snippets,
    )
    .await
    .map_err(|e| {
        tracing::error!(stage = e.stage(), error = %e, "updates run failed");
        e
    })?;

    println!(
        "updates digest for {count} competitor(s) delivered to {}",
        recipient.trim()
    );

    Ok(())
}
