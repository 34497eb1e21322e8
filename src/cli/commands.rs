//! Command dispatch
//!
//! Ledger commands follow load → execute → save. State is only written back
//! when a command changed it, so read-only commands never touch the file.

use crate::cli::args::{
    AccountCommand, CliArgs, Command, LedgerCommand, ProcessArgs, ReportCommand, StrategyType,
    TransferCommand,
};
use crate::core::{Ledger, StateStore, TransferDraft};
use crate::io::csv_format::{
    write_accounts_csv, write_ledger_csv, write_reports_csv, write_transfers_csv,
};
use crate::io::{JsonFileStore, SyncReader};
use crate::strategy::create_strategy;
use crate::types::LedgerError;
use chrono::{DateTime, Utc};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, warn};

/// Run the parsed command line, writing command output to `output`
pub fn run(args: &CliArgs, output: &mut dyn Write) -> Result<(), String> {
    match &args.command {
        Command::Process(process) => run_process(process, output),
        Command::Ledger(command) => {
            let store = JsonFileStore::new(&args.state);
            debug!(state = %store.path().display(), "using ledger state file");
            run_ledger_command(command, &store, Utc::now(), output).map_err(|e| e.to_string())
        }
    }
}

fn run_process(args: &ProcessArgs, output: &mut dyn Write) -> Result<(), String> {
    let config = match args.strategy {
        StrategyType::Async => Some(args.to_batch_config()),
        StrategyType::Sync => None,
    };
    let strategy = create_strategy(args.strategy, args.view, config);
    strategy.process(&args.input_file, output)
}

/// Load the ledger from `store`, execute `command`, and save if it changed
pub fn run_ledger_command(
    command: &LedgerCommand,
    store: &dyn StateStore,
    now: DateTime<Utc>,
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    let mut ledger = Ledger::from_state(store.load()?);

    if execute(command, &mut ledger, now, output)? {
        store.save(&ledger.to_state())?;
    }
    Ok(())
}

/// Apply one ledger command; returns whether the ledger was modified
pub fn execute(
    command: &LedgerCommand,
    ledger: &mut Ledger,
    now: DateTime<Utc>,
    output: &mut dyn Write,
) -> Result<bool, LedgerError> {
    match command {
        LedgerCommand::Account(AccountCommand::Add { name }) => {
            let account = ledger.add_account(name)?;
            writeln!(output, "{}", account)?;
            Ok(true)
        }
        LedgerCommand::Account(AccountCommand::List) => {
            write_accounts_csv(ledger.accounts(), output).map_err(output_error)?;
            Ok(false)
        }
        LedgerCommand::Transfer(TransferCommand::Add {
            from,
            to,
            amount,
            label,
        }) => {
            let draft = TransferDraft::new(from.as_str(), to.as_str(), amount.as_str(), label.as_str());
            let transfer = ledger.add_transfer(&draft)?;
            writeln!(output, "{}", transfer.id)?;
            Ok(true)
        }
        LedgerCommand::Transfer(TransferCommand::Remove { id }) => {
            ledger.remove_transfer(id)?;
            Ok(true)
        }
        LedgerCommand::Transfer(TransferCommand::List) => {
            write_ledger_csv(ledger.transfers(), output).map_err(output_error)?;
            Ok(false)
        }
        LedgerCommand::Transfer(TransferCommand::Import { input_file }) => {
            let imported = import_transfers(ledger, input_file)?;
            writeln!(output, "imported {} transfers", imported)?;
            Ok(imported > 0)
        }
        LedgerCommand::Grouped => {
            write_transfers_csv(&ledger.grouped_transfers(), output).map_err(output_error)?;
            Ok(false)
        }
        LedgerCommand::Settle => {
            write_transfers_csv(&ledger.settlement(), output).map_err(output_error)?;
            Ok(false)
        }
        LedgerCommand::Report(ReportCommand::Validate { date }) => {
            let report = ledger.validate_summary(*date, now)?;
            write_reports_csv(std::slice::from_ref(report), output).map_err(output_error)?;
            Ok(true)
        }
        LedgerCommand::Report(ReportCommand::List) => {
            write_reports_csv(ledger.reports(), output).map_err(output_error)?;
            Ok(false)
        }
        LedgerCommand::Report(ReportCommand::Remove { id }) => {
            ledger.remove_report(id)?;
            Ok(true)
        }
        LedgerCommand::Reset => {
            ledger.reset();
            Ok(true)
        }
    }
}

/// Append every valid row of a CSV file to the ledger
///
/// Rows that fail to parse, or that the ledger rejects, are logged and
/// skipped. Returns the number of transfers recorded.
fn import_transfers(ledger: &mut Ledger, input_file: &Path) -> Result<usize, LedgerError> {
    let reader = SyncReader::new(input_file).map_err(|message| {
        if input_file.exists() {
            LedgerError::IoError { message }
        } else {
            LedgerError::FileNotFound {
                path: input_file.display().to_string(),
            }
        }
    })?;

    let mut imported = 0;
    for result in reader {
        let outcome = result.and_then(|transfer| {
            ledger
                .import_transfer(transfer)
                .map(|_| ())
                .map_err(|e| e.to_string())
        });
        match outcome {
            Ok(()) => imported += 1,
            Err(e) => warn!(error = %e, "skipping imported row"),
        }
    }

    info!(path = %input_file.display(), imported, "import finished");
    Ok(imported)
}

fn output_error(message: String) -> LedgerError {
    LedgerError::IoError { message }
}
