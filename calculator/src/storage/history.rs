//! Capped local history of footprint calculations.
//!
//! The history is an ordered log, newest entry first, holding at most
//! `capacity` entries. Adding past the capacity drops the oldest entries.
//! Stores persist the whole log at once; appending is a single
//! load-insert-store step with no concurrent writers assumed.

use chrono::{DateTime, SecondsFormat, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::constants::DEFAULT_HISTORY_CAPACITY;
use crate::models::breakdown::{CategoryEmissions, EmissionBreakdown, EmissionLevel};

#[derive(Debug)]
pub enum HistoryError {
    IoError(std::io::Error),
    SerdeError(serde_json::Error),
    InvalidEntry(String),
}

impl From<std::io::Error> for HistoryError {
    fn from(err: std::io::Error) -> Self {
        HistoryError::IoError(err)
    }
}

impl From<serde_json::Error> for HistoryError {
    fn from(err: serde_json::Error) -> Self {
        HistoryError::SerdeError(err)
    }
}

impl std::fmt::Display for HistoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryError::IoError(e) => write!(f, "History storage error: {}", e),
            HistoryError::SerdeError(e) => write!(f, "History format error: {}", e),
            HistoryError::InvalidEntry(s) => write!(f, "Invalid history entry: {}", s),
        }
    }
}

impl std::error::Error for HistoryError {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: i64,                // Milliseconds since the epoch
    pub date: String,           // ISO-8601
    pub total: f64,
    pub per_capita: f64,
    pub level: String,          // Level label, e.g. "Very High"
    pub breakdown: CategoryEmissions,
    pub household_size: u32,
}

impl HistoryEntry {
    pub fn from_breakdown(breakdown: &EmissionBreakdown, household_size: u32, at: DateTime<Utc>) -> Self {
        Self {
            id: at.timestamp_millis(),
            date: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            total: breakdown.total,
            per_capita: breakdown.per_capita,
            level: breakdown.level.label().to_string(),
            breakdown: breakdown.categories(),
            household_size,
        }
    }

    pub fn emission_level(&self) -> Result<EmissionLevel, HistoryError> {
        self.level.parse().map_err(HistoryError::InvalidEntry)
    }

    /// Rebuilds the breakdown this entry was recorded from.
    pub fn to_breakdown(&self) -> Result<EmissionBreakdown, HistoryError> {
        Ok(EmissionBreakdown {
            transport: self.breakdown.transport,
            electricity: self.breakdown.electricity,
            diet: self.breakdown.diet,
            waste: self.breakdown.waste,
            total: self.total,
            per_capita: self.per_capita,
            level: self.emission_level()?,
        })
    }

    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.date)
            .ok()
            .map(|d| d.with_timezone(&Utc))
    }
}

/// Ordered, capped log of history entries. Index 0 is the newest.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalHistory {
    entries: Vec<HistoryEntry>,
    capacity: usize,
}

impl Default for LocalHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl LocalHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Wraps previously stored entries, trimming anything beyond the capacity.
    pub fn from_entries(mut entries: Vec<HistoryEntry>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        entries.truncate(capacity);
        Self { entries, capacity }
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
        if self.entries.len() > self.capacity {
            let evicted = self.entries.len() - self.capacity;
            self.entries.truncate(self.capacity);
            debug!(evicted, "Evicted oldest history entries");
        }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<HistoryEntry> {
        self.entries
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

}

/// Storage backend for the local history log.
pub trait HistoryStore {
    fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError>;
    fn store(&self, entries: &[HistoryEntry]) -> Result<(), HistoryError>;

    fn load_history(&self, capacity: usize) -> Result<LocalHistory, HistoryError> {
        Ok(LocalHistory::from_entries(self.load()?, capacity))
    }

    /// Adds an entry in one read-modify-write step and returns the new log.
    fn append(&self, entry: HistoryEntry, capacity: usize) -> Result<LocalHistory, HistoryError> {
        let mut history = self.load_history(capacity)?;
        history.push(entry);
        self.store(history.entries())?;
        Ok(history)
    }
}

/// History kept as a JSON array in a single file.
pub struct FileHistoryStore {
    path: PathBuf,
}

impl FileHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStore for FileHistoryStore {
    fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No history file yet");
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let entries: Vec<HistoryEntry> = serde_json::from_reader(BufReader::new(file))?;
        Ok(entries)
    }

    fn store(&self, entries: &[HistoryEntry]) -> Result<(), HistoryError> {
        let data = serde_json::to_vec_pretty(entries)?;
        atomic_write(&self.path, &data)?;
        info!(path = %self.path.display(), entries = entries.len(), "Saved local history");
        Ok(())
    }
}

/// History held in memory only, for sessions without a writable disk.
#[derive(Default)]
pub struct MemoryHistoryStore {
    entries: Mutex<Vec<HistoryEntry>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        Ok(self.entries.lock().clone())
    }

    fn store(&self, entries: &[HistoryEntry]) -> Result<(), HistoryError> {
        *self.entries.lock() = entries.to_vec();
        Ok(())
    }
}

// Write to `{path}.tmp`, flush, then rename over the target
fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut tmp_path = path.as_os_str().to_owned();
    tmp_path.push(".tmp");
    let tmp_path = PathBuf::from(tmp_path);

    let result = File::create(&tmp_path).and_then(|mut file| {
        file.write_all(data)?;
        file.sync_all()?;
        fs::rename(&tmp_path, path)
    });

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}
