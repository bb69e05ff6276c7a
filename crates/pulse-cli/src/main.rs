mod analyze;
mod score;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pulse-cli")]
#[command(about = "Comment sentiment aggregation pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Analyze a source and print the final report
    Analyze(analyze::AnalyzeArgs),
    /// Analyze a source, printing each progress snapshot as NDJSON
    Stream(analyze::AnalyzeArgs),
    /// Score a single text and print the result
    Score {
        /// The text to score
        text: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = pulse_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze(args) => analyze::run_analyze(&config, args).await,
        Commands::Stream(args) => analyze::run_stream(&config, args).await,
        Commands::Score { text } => score::run_score(&config, &text).await,
    }
}
