//! Ledger state persistence
//!
//! Keeps accounts, transfers and archived reports across sessions. Derived
//! views are never written; they are recomputed from the transfers on load.
//!
//! # Components
//!
//! - `JsonFileStore` - Pretty-printed JSON file, replaced atomically on save
//! - `MemoryStore` - In-process store for tests and embedding

use crate::core::ledger::{LedgerState, STATE_VERSION};
use crate::core::traits::StateStore;
use crate::types::LedgerError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// Ledger state stored as a JSON document on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl StateStore for JsonFileStore {
    /// Load the state file, or an empty state if it does not exist yet
    ///
    /// # Errors
    ///
    /// - `IoError` if the file exists but cannot be read
    /// - `StateError` if the file is not valid ledger JSON
    /// - `StateVersion` if the file was written with another layout version
    fn load(&self) -> Result<LedgerState, LedgerError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no saved ledger state, starting empty");
                return Ok(LedgerState::default());
            }
            Err(e) => return Err(e.into()),
        };

        let state: LedgerState = serde_json::from_str(&contents)?;
        check_version(&state)?;

        debug!(
            path = %self.path.display(),
            accounts = state.accounts.len(),
            transfers = state.transfers.len(),
            reports = state.reports.len(),
            "loaded ledger state"
        );
        Ok(state)
    }

    /// Write the state to a sibling temp file, then move it over the state file
    fn save(&self, state: &LedgerState) -> Result<(), LedgerError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(state)?;
        let temp = self.temp_path();
        fs::write(&temp, json)?;
        if let Err(e) = fs::rename(&temp, &self.path) {
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }

        debug!(path = %self.path.display(), "saved ledger state");
        Ok(())
    }
}

/// Ledger state held in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<Option<LedgerState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<LedgerState, LedgerError> {
        let guard = self.state.lock().map_err(|e| LedgerError::StateError {
            message: e.to_string(),
        })?;
        Ok(guard.clone().unwrap_or_default())
    }

    fn save(&self, state: &LedgerState) -> Result<(), LedgerError> {
        let mut guard = self.state.lock().map_err(|e| LedgerError::StateError {
            message: e.to_string(),
        })?;
        *guard = Some(state.clone());
        Ok(())
    }
}

fn check_version(state: &LedgerState) -> Result<(), LedgerError> {
    if state.version != STATE_VERSION {
        return Err(LedgerError::StateVersion {
            found: state.version,
            expected: STATE_VERSION,
        });
    }
    Ok(())
}
