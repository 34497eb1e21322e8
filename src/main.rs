//! Fluxcalc CLI
//!
//! Command-line interface for recording transfers and computing settlements.
//!
//! # Usage
//!
//! ```bash
//! fluxcalc account add "Compte A"
//! fluxcalc transfer add --from "Compte A" --to "Compte B" --amount 300
//! fluxcalc settle > settlement.csv
//! fluxcalc report validate --date 2026-10-19
//! fluxcalc process --view grouped --strategy sync transfers.csv > grouped.csv
//! ```
//!
//! Ledger commands read and write the state file given by `--state` (or
//! `FLUXCALC_STATE`). `process` works on a CSV file alone.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (invalid input, file not found, unreadable state, etc.)

use fluxcalc::cli;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = cli::parse_args();

    // RUST_LOG wins over --log-level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut output = std::io::stdout();
    if let Err(e) = cli::run(&args, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
