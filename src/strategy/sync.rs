//! Synchronous processing strategy
//!
//! Single-threaded pipeline: `SyncReader` streams rows, the valid ones are
//! collected into the snapshot, and the configured view is written with
//! `csv_format::write_transfers_csv`.

use crate::io::csv_format::write_transfers_csv;
use crate::io::sync_reader::SyncReader;
use crate::strategy::{NettingView, ProcessingStrategy};
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use fluxcalc::strategy::{NettingView, ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy::new(NettingView::Settlement);
/// let mut output = io::stdout();
///
/// strategy.process(Path::new("transfers.csv"), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncProcessingStrategy {
    view: NettingView,
}

impl SyncProcessingStrategy {
    pub fn new(view: NettingView) -> Self {
        Self { view }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let reader = SyncReader::new(input_path)?;

        let mut transfers = Vec::new();
        for result in reader {
            match result {
                Ok(transfer) => transfers.push(transfer),
                Err(e) => warn!(error = %e, "skipping transfer row"),
            }
        }

        debug!(transfers = transfers.len(), view = ?self.view, "computing view");
        let derived = self.view.apply(&transfers);
        write_transfers_csv(&derived, output)
    }
}
