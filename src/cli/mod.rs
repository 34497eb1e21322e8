// CLI module
// Command-line interface, argument parsing and command dispatch

mod args;
mod commands;

pub use args::{
    AccountCommand, CliArgs, Command, LedgerCommand, ProcessArgs, ReportCommand, StrategyType,
    TransferCommand,
};
pub use commands::{execute, run, run_ledger_command};

use clap::Parser;

/// Parse command-line arguments using clap
///
/// If parsing fails (invalid arguments, missing subcommand, or `--help`),
/// clap displays an error message or help text and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
