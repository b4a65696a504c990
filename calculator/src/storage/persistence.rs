//! Save a calculation remotely, falling back to the local history.
//!
//! There are two states and no retries: the remote save is attempted once;
//! any failure (including a missing remote) moves to the local save, whose
//! result is final.

use chrono::{DateTime, Utc};
use tracing::{error, info, instrument, warn};

use crate::models::breakdown::EmissionBreakdown;
use crate::models::input::EmissionInput;
use crate::models::suggestion::Suggestion;
use crate::storage::history::{HistoryEntry, HistoryError, HistoryStore};
use crate::storage::remote::{RemoteError, RemoteReport, RemoteStore};

#[derive(Debug)]
pub enum PersistError {
    LocalSaveFailed { remote: RemoteError, local: HistoryError },
}

impl std::fmt::Display for PersistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistError::LocalSaveFailed { remote, local } => write!(
                f,
                "Could not save calculation (remote: {}; local: {})",
                remote, local
            ),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistError::LocalSaveFailed { local, .. } => Some(local),
        }
    }
}

#[derive(Debug)]
pub enum SaveOutcome {
    Remote,
    Local {
        remote_error: RemoteError,
        entry: HistoryEntry,
        history_len: usize,
    },
}

impl SaveOutcome {
    pub fn is_remote(&self) -> bool {
        matches!(self, SaveOutcome::Remote)
    }

    /// Message telling the user which path stored the calculation.
    pub fn message(&self) -> String {
        match self {
            SaveOutcome::Remote => "Carbon footprint saved to your account.".to_string(),
            SaveOutcome::Local { remote_error, .. } => format!(
                "Server unavailable ({}); carbon footprint saved locally instead.",
                remote_error
            ),
        }
    }
}

/// Everything needed to persist one calculation.
pub struct Calculation<'a> {
    pub input: &'a EmissionInput,
    pub breakdown: &'a EmissionBreakdown,
    pub suggestions: &'a [Suggestion],
    pub at: DateTime<Utc>,
}

#[instrument(skip_all, fields(capacity = history_capacity))]
pub fn save_with_fallback(
    calculation: &Calculation<'_>,
    remote: Option<&dyn RemoteStore>,
    local: &dyn HistoryStore,
    history_capacity: usize,
) -> Result<SaveOutcome, PersistError> {
    let remote_error = match remote {
        Some(store) => {
            let report = RemoteReport::new(calculation.input, calculation.breakdown, calculation.suggestions);
            match store.save_report(&report) {
                Ok(()) => {
                    info!("Calculation saved remotely");
                    return Ok(SaveOutcome::Remote);
                }
                Err(e) => {
                    warn!(error = %e, "Remote save failed, falling back to local history");
                    e
                }
            }
        }
        None => RemoteError::NotConfigured,
    };

    let entry = HistoryEntry::from_breakdown(
        calculation.breakdown,
        calculation.input.household_size,
        calculation.at,
    );

    match local.append(entry.clone(), history_capacity) {
        Ok(history) => {
            info!(entries = history.len(), "Calculation saved to local history");
            Ok(SaveOutcome::Local {
                remote_error,
                entry,
                history_len: history.len(),
            })
        }
        Err(local_error) => {
            error!(error = %local_error, "Local history save failed");
            Err(PersistError::LocalSaveFailed {
                remote: remote_error,
                local: local_error,
            })
        }
    }
}
