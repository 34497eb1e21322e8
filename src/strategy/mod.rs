//! Processing strategy module for CSV netting pipelines
//!
//! This module defines the Strategy pattern for complete netting pipelines,
//! encompassing both CSV parsing and the netting engine. Different reading
//! implementations (synchronous, asynchronous batch) can be selected at
//! runtime; they always produce identical output for the same input.

use crate::cli::StrategyType;
use crate::core::{aggregate_pairs, net_balances};
use crate::types::{SettlementTransfer, Transfer};
use clap::ValueEnum;
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Derived view written by a processing pipeline
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum NettingView {
    /// Minimal settlement plan from net balances
    #[default]
    Settlement,
    /// Per-pair totals, reverse flows kept separate
    Grouped,
}

impl NettingView {
    pub fn apply(self, transfers: &[Transfer]) -> Vec<SettlementTransfer> {
        match self {
            NettingView::Settlement => net_balances(transfers),
            NettingView::Grouped => aggregate_pairs(transfers),
        }
    }
}

/// Processing strategy trait for complete netting pipelines
///
/// Each strategy reads transfers from a CSV file, computes its configured
/// view over the full snapshot and writes the result as `from,to,amount` CSV.
pub trait ProcessingStrategy: Send + Sync {
    /// Process transfers from input file and write the derived view to output
    ///
    /// # Arguments
    ///
    /// * `input_path` - Path to the input CSV file containing transfer rows
    /// * `output` - Mutable reference to a writer for the derived transfers
    ///
    /// # Errors
    ///
    /// Returns an error if the input file cannot be opened, or if a fatal I/O
    /// error occurs while reading or writing. Individual rows that fail to
    /// parse or validate are logged and skipped.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String>;
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `view` - Which derived view the pipeline writes
/// * `config` - Optional configuration for async batch processing (ignored for sync)
pub fn create_strategy(
    strategy_type: StrategyType,
    view: NettingView,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(view)),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(view, config))
        }
    }
}
