//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

use statusvault_lib::config;

/// Track U.S. immigration documents and the status they grant.
///
/// Reads the recognized text of each document, classifies and extracts it,
/// then reports the current status, expiry warnings and the document
/// timeline.
#[derive(Parser, Debug)]
#[command(name = "statusvault")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Evaluate as of this day (YYYY-MM-DD) instead of the current time
    #[arg(long)]
    pub now: Option<NaiveDate>,

    /// Days before expiry at which a document counts as expiring soon
    #[arg(short = 'w', long, value_parser = clap::value_parser!(i64).range(1..=config::MAX_WARNING_DAYS))]
    pub warning_days: Option<i64>,

    /// Print snapshot, documents and timeline as JSON
    #[arg(long)]
    pub json: bool,

    /// Plain-text files holding each document's recognized text
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

impl Args {
    /// Fallback log filter when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => config::default_log_filter(),
                1 => "debug",
                _ => "trace",
            }
        }
    }
}
