//! I/O module
//!
//! Handles CSV parsing and output, and persistence of ledger state.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (record conversion, output serialization)
//! - `sync_reader` - Synchronous CSV reader with iterator interface
//! - `async_reader` - Asynchronous CSV reader with batch reading interface
//! - `state_store` - JSON file and in-memory ledger state stores

pub mod async_reader;
pub mod csv_format;
pub mod state_store;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use csv_format::{
    convert_csv_record, write_accounts_csv, write_ledger_csv, write_reports_csv,
    write_transfers_csv, CsvTransfer,
};
pub use state_store::{JsonFileStore, MemoryStore};
pub use sync_reader::SyncReader;
