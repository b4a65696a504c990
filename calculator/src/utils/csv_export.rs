use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::storage::history::HistoryEntry;

#[derive(Debug)]
pub enum ExportError {
    IoError(std::io::Error),
    CsvError(csv::Error),
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::IoError(err)
    }
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::CsvError(err)
    }
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::IoError(e) => write!(f, "IO error: {}", e),
            ExportError::CsvError(e) => write!(f, "CSV error: {}", e),
        }
    }
}

impl std::error::Error for ExportError {}

/// One flattened history entry per CSV row
#[derive(Debug, Serialize)]
struct HistoryRow<'a> {
    id: i64,
    date: &'a str,
    household_size: u32,
    transport: f64,
    electricity: f64,
    diet: f64,
    waste: f64,
    total: f64,
    per_capita: f64,
    level: &'a str,
}

impl<'a> From<&'a HistoryEntry> for HistoryRow<'a> {
    fn from(entry: &'a HistoryEntry) -> Self {
        Self {
            id: entry.id,
            date: &entry.date,
            household_size: entry.household_size,
            transport: entry.breakdown.transport,
            electricity: entry.breakdown.electricity,
            diet: entry.breakdown.diet,
            waste: entry.breakdown.waste,
            total: entry.total,
            per_capita: entry.per_capita,
            level: &entry.level,
        }
    }
}

/// Writes the local history as CSV
pub struct CsvExporter {
    output_path: PathBuf,
}

impl CsvExporter {
    pub fn new(output_path: impl AsRef<Path>) -> Self {
        Self {
            output_path: output_path.as_ref().to_path_buf(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn export_history(&self, entries: &[HistoryEntry]) -> Result<usize, ExportError> {
        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = fs::File::create(&self.output_path)?;
        let rows = write_history(file, entries)?;

        info!(path = %self.output_path.display(), rows, "Exported history to CSV");
        Ok(rows)
    }
}

pub fn write_history<W: Write>(writer: W, entries: &[HistoryEntry]) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    // Header row even when there is nothing to export
    if entries.is_empty() {
        csv_writer.write_record([
            "id", "date", "household_size", "transport", "electricity",
            "diet", "waste", "total", "per_capita", "level",
        ])?;
    }

    for entry in entries {
        csv_writer.serialize(HistoryRow::from(entry))?;
    }
    csv_writer.flush()?;

    Ok(entries.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::breakdown::CategoryEmissions;

    fn entry() -> HistoryEntry {
        HistoryEntry {
            id: 1_767_225_600_000,
            date: "2026-01-01T00:00:00.000Z".to_string(),
            total: 2984.8,
            per_capita: 1492.4,
            level: "Low".to_string(),
            breakdown: CategoryEmissions { transport: 124.8, electricity: 600.0, diet: 2000.0, waste: 260.0 },
            household_size: 2,
        }
    }

    #[test]
    fn writes_header_and_rows() {
        let mut buffer = Vec::new();
        let rows = write_history(&mut buffer, &[entry()]).unwrap();
        assert_eq!(rows, 1);

        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "id,date,household_size,transport,electricity,diet,waste,total,per_capita,level"
        );
        assert_eq!(
            lines.next().unwrap(),
            "1767225600000,2026-01-01T00:00:00.000Z,2,124.8,600.0,2000.0,260.0,2984.8,1492.4,Low"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn empty_history_still_has_header() {
        let mut buffer = Vec::new();
        assert_eq!(write_history(&mut buffer, &[]).unwrap(), 0);
        assert!(String::from_utf8(buffer).unwrap().starts_with("id,date,"));
    }

    #[test]
    fn exporter_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = CsvExporter::new(dir.path().join("out").join("history.csv"));
        assert_eq!(exporter.export_history(&[entry(), entry()]).unwrap(), 2);
        let text = fs::read_to_string(exporter.output_path()).unwrap();
        assert_eq!(text.lines().count(), 3);
    }
}
