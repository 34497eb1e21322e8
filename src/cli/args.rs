use crate::strategy::{BatchConfig, NettingView};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Record transfers between accounts and compute the settlement plan
#[derive(Parser, Debug)]
#[command(name = "fluxcalc")]
#[command(about = "Record transfers between accounts and compute the settlement plan", long_about = None)]
pub struct CliArgs {
    /// Ledger state file
    #[arg(
        long = "state",
        value_name = "PATH",
        env = "FLUXCALC_STATE",
        default_value = "fluxcalc-state.json",
        global = true
    )]
    pub state: PathBuf,

    /// Log filter used when RUST_LOG is not set
    #[arg(
        long = "log-level",
        value_name = "FILTER",
        default_value = "warn",
        global = true
    )]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute a view straight from a CSV file, without touching the ledger
    Process(ProcessArgs),

    #[command(flatten)]
    Ledger(LedgerCommand),
}

/// Commands that load, and possibly update, the persisted ledger
#[derive(Subcommand, Debug, PartialEq)]
pub enum LedgerCommand {
    /// Manage accounts
    #[command(subcommand)]
    Account(AccountCommand),

    /// Manage recorded transfers
    #[command(subcommand)]
    Transfer(TransferCommand),

    /// Print per-pair totals of the recorded transfers
    Grouped,

    /// Print the settlement plan of the recorded transfers
    Settle,

    /// Manage archived settlement reports
    #[command(subcommand)]
    Report(ReportCommand),

    /// Remove all accounts and transfers (reports are kept)
    Reset,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum AccountCommand {
    /// Register a new account
    Add {
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// List registered accounts
    List,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum TransferCommand {
    /// Record a transfer between two registered accounts
    Add {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        amount: String,
        #[arg(long, default_value = "")]
        label: String,
    },
    /// Remove a recorded transfer
    Remove {
        #[arg(value_name = "ID")]
        id: String,
    },
    /// List recorded transfers
    List,
    /// Append transfers from a CSV file, registering unknown accounts
    Import {
        #[arg(value_name = "CSV")]
        input_file: PathBuf,
    },
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum ReportCommand {
    /// Archive the current settlement plan
    Validate {
        /// Settlement date (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        date: Option<NaiveDate>,
    },
    /// List archived reports, newest first
    List,
    /// Remove an archived report
    Remove {
        #[arg(value_name = "ID")]
        id: String,
    },
}

#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Input CSV file path containing transfer rows
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,

    /// View to compute
    #[arg(long = "view", value_name = "VIEW", default_value = "settlement")]
    pub view: NettingView,

    /// Parsing strategy to use for reading the file
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Parsing strategy: 'sync' for synchronous or 'async' for asynchronous"
    )]
    pub strategy: StrategyType,

    /// Number of transfers per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of transfers per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Number of runtime worker threads (async mode only)
    #[arg(
        long = "workers",
        value_name = "COUNT",
        help = "Number of runtime worker threads (default: CPU cores)"
    )]
    pub worker_threads: Option<usize>,
}

/// Available parsing strategies for CSV processing
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl ProcessArgs {
    /// Create a BatchConfig from CLI arguments, falling back to defaults
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_none() && self.worker_threads.is_none() {
            return BatchConfig::default();
        }

        let default = BatchConfig::default();
        BatchConfig::new(
            self.batch_size.unwrap_or(default.batch_size),
            self.worker_threads.unwrap_or(default.worker_threads),
        )
    }
}
