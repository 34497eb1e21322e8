//! Asynchronous batch processing strategy
//!
//! Reads the input in batches through `AsyncReader` on a tokio multi-threaded
//! runtime, then hands the complete snapshot to a blocking worker for the
//! netting pass.
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, worker_threads)
//!     ├── AsyncReader (batch CSV reading)
//!     └── spawn_blocking (netting view over the full snapshot)
//! ```
//!
//! Batches are appended in file order, so the snapshot, and therefore the
//! output, is identical to the synchronous strategy.

use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::write_transfers_csv;
use crate::strategy::{NettingView, ProcessingStrategy};
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

/// Configuration for batch processing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Number of transfers per batch
    pub batch_size: usize,
    /// Number of runtime worker threads
    pub worker_threads: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            worker_threads: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig; zero values fall back to the defaults
    pub fn new(batch_size: usize, worker_threads: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                fallback = default.batch_size,
                "invalid batch_size (0), using default"
            );
            default.batch_size
        } else {
            batch_size
        };

        let worker_threads = if worker_threads == 0 {
            warn!(
                fallback = default.worker_threads,
                "invalid worker_threads (0), using default"
            );
            default.worker_threads
        } else {
            worker_threads
        };

        Self {
            batch_size,
            worker_threads,
        }
    }
}

/// Asynchronous batch processing strategy
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    view: NettingView,
    config: BatchConfig,
}

impl AsyncProcessingStrategy {
    pub fn new(view: NettingView, config: BatchConfig) -> Self {
        Self { view, config }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Process transfers from input file and write the derived view to output
    ///
    /// 1. Creates a tokio multi-threaded runtime sized by `worker_threads`
    /// 2. Reads transfers in batches of `batch_size` using AsyncReader
    /// 3. Computes the view on a blocking worker once the input is exhausted
    /// 4. Writes the result using the csv_format module
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.worker_threads)
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        let derived = runtime.block_on(async {
            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| format!("Failed to open file '{}': {}", input_path.display(), e))?;

            // csv-async reads futures::io, tokio files need the compat layer
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);

            let mut transfers = Vec::new();
            let mut batches = 0usize;
            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }
                batches += 1;
                transfers.extend(batch);
            }

            debug!(
                transfers = transfers.len(),
                batches,
                view = ?self.view,
                "computing view"
            );

            let view = self.view;
            tokio::task::spawn_blocking(move || view.apply(&transfers))
                .await
                .map_err(|e| format!("Netting worker failed: {}", e))
        })?;

        write_transfers_csv(&derived, output)
    }
}
