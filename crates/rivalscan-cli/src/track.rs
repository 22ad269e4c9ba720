//! Subscription management command handlers.

use chrono::Utc;
use clap::Subcommand;

use rivalscan_core::validate::{validate_product_name, validate_recipient};
use rivalscan_core::AppConfig;
use rivalscan_db::SubscriptionRow;

/// Sub-commands available under `track`.
#[derive(Debug, Subcommand)]
pub(crate) enum TrackCommands {
    /// Record a recurring-report subscription
    Subscribe {
        /// Recipient email address
        #[arg(long)]
        email: String,

        /// Product to track
        #[arg(long)]
        product: String,
    },
    /// Remove a subscription
    Unsubscribe {
        /// Recipient email address
        #[arg(long)]
        email: String,

        /// Product to stop tracking
        #[arg(long)]
        product: String,
    },
    /// List subscriptions due for a run under the cadence
    Due,
    /// List all subscriptions
    List,
}

pub(crate) async fn run_track(config: &AppConfig, command: TrackCommands) -> anyhow::Result<()> {
    let pool = rivalscan_db::connect_pool(&config.database_url).await?;
    rivalscan_db::run_migrations(&pool).await?;

    match command {
        TrackCommands::Subscribe { email, product } => {
            let email = validate_recipient(&email)?;
            let product = validate_product_name(&product)?;

            let row = rivalscan_db::subscribe(&pool, email, product).await?;
            println!(
                "subscribed {} to recurring reports for {}",
                row.user_email, row.tracked_product
            );
        }
        TrackCommands::Unsubscribe { email, product } => {
            let removed =
                rivalscan_db::unsubscribe(&pool, email.trim(), product.trim()).await?;
            if removed {
                println!("unsubscribed {} from {}", email.trim(), product.trim());
            } else {
                println!(
                    "no subscription found for {} / {}",
                    email.trim(),
                    product.trim()
                );
            }
        }
        TrackCommands::Due => {
            let rows = rivalscan_db::list_due(&pool, Utc::now(), config.cadence_days).await?;
            print_rows(&rows, "no subscriptions due");
        }
        TrackCommands::List => {
            let rows = rivalscan_db::list_subscriptions(&pool).await?;
            print_rows(&rows, "no subscriptions recorded");
        }
    }

    Ok(())
}

fn print_rows(rows: &[SubscriptionRow], empty_message: &str) {
    if rows.is_empty() {
        println!("{empty_message}");
        return;
    }
    for row in rows {
        let last_run = row
            .last_run_at
            .map_or_else(|| "never".to_string(), |t| t.format("%Y-%m-%d").to_string());
        println!(
            "{}  {}  (created {}, last run {})",
            row.user_email,
            row.tracked_product,
            row.created_at.format("%Y-%m-%d"),
            last_run
        );
    }
}
