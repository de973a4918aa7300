//! quote-send - Unattended single posting run
//!
//! Generates one quote, posts it, prints the outcome, and exits. Repetition
//! belongs to an external scheduler (cron, CI): a crashed interval is then
//! retried by the scheduler instead of silently skipped by a sleeping
//! process.

use clap::Parser;
use tracing::info;

use libquotecast::coordinator::build_coordinator;
use libquotecast::logging::{LogFormat, LoggingConfig};
use libquotecast::{Config, Result};

#[derive(Parser, Debug)]
#[command(name = "quote-send")]
#[command(version)]
#[command(about = "Generate one AI quote, post it to X, and exit")]
#[command(long_about = "\
quote-send - Unattended single posting run

DESCRIPTION:
    quote-send runs one generate-and-post invocation and exits. It is the
    entry point meant for external schedulers (cron, systemd timers, CI):
    repetition and catch-up are their concern.

USAGE:
    # Post one quote
    quote-send

    # Enable verbose logging
    quote-send --verbose

CONFIGURATION:
    Settings come from the environment (MAX_QUOTE_LENGTH, QUOTE_TOPICS,
    POST_INTERVAL_HOURS, QUOTECAST_STATE_FILE), an optional config file at
    $QUOTECAST_CONFIG or ~/.config/quotecast/config.toml, and a .env file
    in the working directory. GEMINI_API_KEY and TWITTER_ACCESS_TOKEN are
    required.

EXIT CODES:
    0 - Quote posted
    1 - Posting failed
    2 - Credential or permission problem
    3 - Invalid input
")]
struct Cli {
    /// Enable verbose logging to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    LoggingConfig::new(LogFormat::Text, level.to_string(), cli.verbose).init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run() -> Result<()> {
    let config = Config::load()?;
    let (mut coordinator, account) = build_coordinator(&config).await?;
    println!("Connected to X as @{}", account.handle);

    let receipt = coordinator.run_once().await?;
    println!("Quote posted: {}", receipt.text);
    println!("Post id: {}", receipt.id);
    info!(total = coordinator.store().len(), "posted-quote history size");

    Ok(())
}
