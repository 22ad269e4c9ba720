use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod report;
mod track;
mod updates;

#[derive(Debug, Parser)]
#[command(name = "rivalscan")]
#[command(about = "Competitor discovery and comparison reports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate a competitor comparison report and email it
    Report {
        /// Product or company to report on
        #[arg(long)]
        product: String,

        /// Niche/industry of the product, used for the description lookup
        #[arg(long)]
        niche: Option<String>,

        /// Recipient email address
        #[arg(long = "to")]
        recipient: String,

        /// Maximum number of competitors to compare
        #[arg(long, default_value_t = report::DEFAULT_COMPETITOR_LIMIT)]
        limit: usize,

        /// Comparison aspect to weigh; repeat for several
        #[arg(long = "aspect")]
        aspects: Vec<String>,

        /// Record a weekly recurring-report subscription after a successful run
        #[arg(long)]
        subscribe: bool,
    },
    /// Summarize competitor changelog activity and email the digest
    Updates {
        /// Product or company the digest is for
        #[arg(long)]
        product: String,

        /// Competitor to track; repeat for several
        #[arg(long = "competitor", required = true)]
        competitors: Vec<String>,

        /// Recipient email address
        #[arg(long = "to")]
        recipient: String,

        /// Maximum changelog snippets per competitor
        #[arg(long, default_value_t = 5)]
        max_snippets: usize,
    },
    /// Manage recurring-report subscriptions
    Track {
        #[command(subcommand)]
        command: track::TrackCommands,
    },
    /// Run reports for every subscription due under the cadence
    RunDue,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = rivalscan_core::load_app_config()?;
    init_tracing(&config.log_level);
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Report {
            product,
            niche,
            recipient,
            limit,
            aspects,
            subscribe,
        } => {
            let request = report::ReportRequest {
                product,
                niche,
                recipient,
                limit,
                aspects,
            };
            report::run_report(&config, &request, subscribe).await
        }
        Commands::Updates {
            product,
            competitors,
            recipient,
            max_snippets,
        } => updates::run_updates(&config, &product, &competitors, &recipient, max_snippets).await,
        Commands::Track { command } => track::run_track(&config, command).await,
        Commands::RunDue => report::run_due(&config).await,
    }
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
