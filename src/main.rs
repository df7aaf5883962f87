//! CLI entry point for StatusVault.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, info, warn};

use statusvault_lib::clock::{Clock, FixedClock, SystemClock};
use statusvault_lib::config::{self, VaultConfig};
use statusvault_lib::models::document::{start_of_day, Document};
use statusvault_lib::models::snapshot::StatusSnapshot;
use statusvault_lib::pipeline::PlainTextFileSource;
use statusvault_lib::timeline::TimelineEvent;
use statusvault_lib::vault::StatusVault;

mod cli;

use cli::Args;

#[derive(Serialize)]
struct Report<'a> {
    snapshot: StatusSnapshot,
    documents: &'a [Document],
    timeline: Vec<TimelineEvent>,
}

fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();
    config::init_tracing(args.log_level());

    debug!(?args, "CLI arguments parsed");
    info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let mut vault_config = VaultConfig::from_env();
    if let Some(days) = args.warning_days {
        vault_config = vault_config.with_warning_days(days);
    }

    match args.now {
        Some(day) => run(&args, vault_config, FixedClock(start_of_day(day))),
        None => run(&args, vault_config, SystemClock),
    }
}

fn run<C: Clock>(args: &Args, vault_config: VaultConfig, clock: C) -> Result<()> {
    let mut vault = StatusVault::with_clock(vault_config, clock);
    let source = PlainTextFileSource::new();

    let mut skipped = 0usize;
    for path in &args.files {
        let key = path.to_string_lossy();
        match vault.ingest_from(&source, &key) {
            Ok(id) => debug!(document_id = %id, path = %key, "Ingested document"),
            Err(e) => {
                warn!(path = %key, error = %e, "Skipped document");
                skipped += 1;
            }
        }
    }

    info!(
        documents = vault.documents().len(),
        skipped,
        warning_days = vault_config.warning_days,
        "Vault loaded"
    );

    if args.json {
        let report = Report {
            snapshot: vault.snapshot(),
            documents: vault.documents(),
            timeline: vault.timeline(),
        };
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{json}");
    } else {
        println!("{}", vault.context().trim_end());
        let timeline = vault.timeline();
        if !timeline.is_empty() {
            println!("\nTimeline:");
            for event in &timeline {
                println!(
                    "- {} {}: {}",
                    event.date.format("%Y-%m-%d"),
                    event.title(),
                    event.description
                );
            }
        }
    }

    Ok(())
}
