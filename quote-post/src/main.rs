//! quote-post - Generate an AI quote and post it to X
//!
//! Interactive entry point: choose between a single post and an in-process
//! schedule that posts every N hours until interrupted. For unattended
//! execution under an external scheduler, use quote-send instead.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use tokio::time::{sleep, Duration};
use tracing::{error, info};

use libquotecast::coordinator::{build_coordinator, Coordinator};
use libquotecast::logging::{LogFormat, LoggingConfig};
use libquotecast::{Config, QuotecastError, Result};

#[derive(Parser, Debug)]
#[command(name = "quote-post")]
#[command(version)]
#[command(about = "Generate an AI quote and post it to X", long_about = None)]
struct Cli {
    /// Post a single quote and exit
    #[arg(long, conflicts_with = "schedule")]
    once: bool,

    /// Post on a fixed schedule until interrupted
    #[arg(long)]
    schedule: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    LoggingConfig::new(LogFormat::Text, level.to_string(), cli.verbose).init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let (mut coordinator, account) = build_coordinator(&config).await?;

    println!(
        "Connected to X as @{} ({} followers)",
        account.handle, account.followers
    );

    let scheduled = if cli.once {
        false
    } else if cli.schedule {
        true
    } else {
        prompt_for_schedule(config.bot.post_interval_hours)?
    };

    if scheduled {
        run_scheduled(&mut coordinator, config.bot.post_interval_hours).await
    } else {
        post_once(&mut coordinator).await
    }
}

fn prompt_for_schedule(interval_hours: u64) -> Result<bool> {
    println!();
    println!("Choose run mode:");
    println!("  1. Post once");
    println!("  2. Post on a schedule (every {} hours)", interval_hours);
    print!("\nEnter choice (1 or 2): ");
    io::stdout()
        .flush()
        .map_err(|e| QuotecastError::InvalidInput(e.to_string()))?;

    let mut choice = String::new();
    io::stdin()
        .read_line(&mut choice)
        .map_err(|e| QuotecastError::InvalidInput(e.to_string()))?;

    match choice.trim() {
        "1" => Ok(false),
        "2" => Ok(true),
        other => {
            println!("Unrecognized choice '{}', posting once.", other);
            Ok(false)
        }
    }
}

async fn post_once(coordinator: &mut Coordinator) -> Result<()> {
    let receipt = coordinator.run_once().await?;
    println!("Quote posted: {}", receipt.text);
    println!("Post id: {}", receipt.id);
    Ok(())
}

async fn run_scheduled(coordinator: &mut Coordinator, interval_hours: u64) -> Result<()> {
    let shutdown = Arc::new(AtomicBool::new(false));
    setup_signal_handlers(shutdown.clone())?;

    println!(
        "Posting every {} hour(s). Press Ctrl+C to stop.",
        interval_hours
    );

    loop {
        match coordinator.run_once().await {
            Ok(receipt) => {
                println!("Quote posted: {}", receipt.text);
                println!("Post id: {}", receipt.id);
            }
            Err(e) if e.is_fatal() => return Err(e),
            // A failed invocation does not stop the schedule
            Err(e) => error!("invocation failed: {}", e),
        }

        let next = chrono::Local::now() + chrono::Duration::hours(interval_hours as i64);
        println!("Next post at {}", next.format("%Y-%m-%d %H:%M:%S"));

        // Sleep in one-second slices so an interrupt is noticed promptly
        for _ in 0..interval_hours.saturating_mul(3600) {
            if shutdown.load(Ordering::Relaxed) {
                println!("Stopped.");
                return Ok(());
            }
            sleep(Duration::from_secs(1)).await;
        }
    }
}

fn setup_signal_handlers(shutdown: Arc<AtomicBool>) -> Result<()> {
    use signal_hook::consts::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT, SIGTERM])
        .map_err(|e| QuotecastError::InvalidInput(format!("Signal setup failed: {}", e)))?;

    let shutdown_clone = shutdown.clone();
    std::thread::spawn(move || {
        for sig in signals.forever() {
            match sig {
                SIGTERM | SIGINT => {
                    info!("Received shutdown signal, stopping after the current interval");
                    shutdown_clone.store(true, Ordering::Relaxed);
                    break;
                }
                _ => {}
            }
        }
    });

    Ok(())
}
