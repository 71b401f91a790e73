//! Scenario runner for the fault-injection harness
//!
//! Loads a scenario TOML, runs the harness against a built-in counting
//! echo handler, and prints the final result. Useful for eyeballing the
//! harness against a real clock and file system.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::info;

use faas_harness::{Harness, SimulationConfig};

#[derive(Parser)]
#[command(name = "faas-harness")]
#[command(about = "Run a fault-injection scenario against a demo handler", long_about = None)]
struct Cli {
    /// Scenario TOML file describing the active simulations
    #[arg(short, long)]
    scenario: PathBuf,

    /// Seed for reproducible randomness
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    let raw = std::fs::read_to_string(&cli.scenario)
        .with_context(|| format!("reading scenario {}", cli.scenario.display()))?;
    let config = SimulationConfig::from_toml_str(&raw)?;

    let harness = match cli.seed {
        Some(seed) => Harness::with_seed(seed),
        None => Harness::new(),
    };

    let invocations = Arc::new(AtomicU64::new(0));
    let counter = invocations.clone();
    let handler = move |event: String| -> futures::future::BoxFuture<
        'static,
        std::result::Result<String, faas_harness::HandlerError>,
    > {
        let invocation = counter.fetch_add(1, Ordering::SeqCst) + 1;
        Box::pin(async move { Ok(format!("{event} (invocation {invocation})")) })
    };

    let result = harness
        .run(&config, handler, "demo-event".to_string())
        .await?;

    info!(
        invocations = invocations.load(Ordering::SeqCst),
        retained_blocks = harness.memory_pool().block_count(),
        retained_bytes = harness.memory_pool().allocated_bytes(),
        "scenario complete"
    );
    println!("{result}");

    Ok(())
}
