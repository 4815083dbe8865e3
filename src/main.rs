use analytics::AnalyticsEngine;
use analyzer::{BatchRunner, Summary};
use anyhow::Context;
use api_client::YahooChartClient;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use configuration::settings::Config;
use configuration::{Evaluation, OutputFormat, load_config};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod report;

/// The main entry point for the tickrank application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // TICKRANK__* overrides may live in a .env file; it is optional.
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    match cli.command {
        Commands::Rank(args) => handle_rank(args).await?,
        Commands::Universe(args) => handle_universe(args)?,
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Ranks a universe of equities by their performance over a historical window.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch prices, compute metrics and recommend the best performer.
    Rank(RankArgs),
    /// List the configured tickers and company names.
    Universe(UniverseArgs),
}

#[derive(Parser)]
struct RankArgs {
    /// Path to the configuration file (defaults to ./config.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the start of the evaluation window (format: YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Override the end of the evaluation window (format: YYYY-MM-DD).
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Output format; defaults to the `[output]` section of the config.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(Parser)]
struct UniverseArgs {
    /// Path to the configuration file (defaults to ./config.toml).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn read_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    load_config(path.map(PathBuf::as_path)).with_context(|| match path {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Failed to load configuration from config.toml".to_string(),
    })
}

// ==============================================================================
// Rank Command Logic
// ==============================================================================

/// Handles the orchestration of a ranking run.
async fn handle_rank(args: RankArgs) -> anyhow::Result<()> {
    let config = read_config(args.config.as_ref())?;

    let evaluation = Evaluation {
        start_date: args.from.unwrap_or(config.evaluation.start_date),
        end_date: args.to.unwrap_or(config.evaluation.end_date),
    };
    let window = evaluation.window()?;
    let format = args.format.unwrap_or(config.output.format);

    let client = YahooChartClient::new(&config.data_source)
        .context("Failed to build the market data client")?;
    let engine = AnalyticsEngine::new(config.metrics);
    let runner = BatchRunner::new(&client, engine, window)
        .with_max_concurrency(config.data_source.max_concurrency);

    // Set up the progress bar
    let progress_bar = ProgressBar::new(config.universe.len() as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let batch = runner
        .run(&config.universe, |entry, _| {
            progress_bar.set_message(entry.ticker.clone());
            progress_bar.inc(1);
        })
        .await;

    progress_bar.finish_and_clear();

    let skipped = batch.skipped;
    let summary = Summary::new(batch.records).with_context(|| {
        format!(
            "None of the {} configured tickers produced a performance record",
            config.universe.len()
        )
    })?;

    match format {
        OutputFormat::Table => println!("{}", report::render_table(&summary, &skipped, window)),
        OutputFormat::Json => println!("{}", report::render_json(&summary, &skipped, window)?),
    }

    Ok(())
}

// ==============================================================================
// Universe Command Logic
// ==============================================================================

fn handle_universe(args: UniverseArgs) -> anyhow::Result<()> {
    let config = read_config(args.config.as_ref())?;
    println!("{}", report::render_universe(&config.universe));
    Ok(())
}
