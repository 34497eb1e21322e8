//! Asynchronous CSV reader with batch interface
//!
//! Reads validated transfers from any `futures` async reader in batches,
//! using csv-async for streaming parsing.
//!
//! ```text
//! CSV Reader → AsyncReader → Batches of Transfers
//!                  ↓
//!           csv_format module
//!           (CsvTransfer, convert_csv_record)
//! ```

use crate::io::csv_format::{convert_csv_record, CsvTransfer};
use crate::types::Transfer;
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;
use tracing::warn;

/// Asynchronous CSV reader
///
/// Provides batch reading over transfer rows with constant memory per batch.
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
    line_num: usize,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self {
            csv_reader,
            line_num: 0,
        }
    }

    /// Read up to `batch_size` validated transfers
    ///
    /// Rows that fail to parse or validate are logged and skipped. Returns an
    /// empty vector once the input is exhausted.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<Transfer> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<CsvTransfer>();

        while batch.len() < batch_size {
            let Some(result) = records.next().await else {
                break;
            };
            self.line_num += 1;
            let line = self.line_num + 1;

            match result {
                Ok(record) => match convert_csv_record(record) {
                    Ok(transfer) => batch.push(transfer),
                    Err(e) => warn!(line, error = %e, "skipping invalid transfer row"),
                },
                Err(e) => warn!(line, error = %e, "skipping malformed CSV row"),
            }
        }

        batch
    }
}
