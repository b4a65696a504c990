use serde::Serialize;

use crate::storage::history::{HistoryEntry, HistoryError, LocalHistory};
use crate::models::breakdown::EmissionLevel;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryStatistics {
    pub latest: HistoryEntry,
    pub average_total: f64,
    pub average_per_capita: f64,
    pub total_calculations: usize,
    pub emission_level: EmissionLevel,
}

/// Summary of the stored calculations, `None` when nothing has been saved yet.
pub fn summarize(history: &LocalHistory) -> Result<Option<HistoryStatistics>, HistoryError> {
    let Some(latest) = history.latest() else {
        return Ok(None);
    };

    let count = history.len() as f64;
    let average_total = history.entries().iter().map(|e| e.total).sum::<f64>() / count;
    let average_per_capita = history.entries().iter().map(|e| e.per_capita).sum::<f64>() / count;

    Ok(Some(HistoryStatistics {
        latest: latest.clone(),
        average_total,
        average_per_capita,
        total_calculations: history.len(),
        emission_level: latest.emission_level()?,
    }))
}
