//! CSV export of the performance log.
//!
//! Charting front-ends read the per-day history; this writes it out as a
//! plain `date,cards_studied,success_rate` file they can consume without
//! touching the JSON store.

use crate::{DailyPerformance, Result};
use std::fs::File;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    date: String,
    cards_studied: u32,
    success_rate: f64,
}

impl From<&DailyPerformance> for CsvRow {
    fn from(entry: &DailyPerformance) -> Self {
        CsvRow {
            date: entry.date.to_string(),
            cards_studied: entry.cards_studied,
            success_rate: entry.success_rate,
        }
    }
}

/// Write the performance log to a CSV file, replacing any previous export
///
/// Returns the number of rows written. The file is fsynced before the
/// function returns.
pub fn export_performance_csv(path: &Path, entries: &[DailyPerformance]) -> Result<usize> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let mut writer = csv::WriterBuilder::new().has_headers(true).from_writer(file);

    for entry in entries {
        writer.serialize(CsvRow::from(entry))?;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    file.sync_all()?;

    tracing::info!("Exported {} performance rows to {:?}", entries.len(), path);
    Ok(entries.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(day: u32, cards: u32, rate: f64) -> DailyPerformance {
        DailyPerformance {
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            cards_studied: cards,
            success_rate: rate,
        }
    }

    #[test]
    fn test_export_and_read_back() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("performance.csv");

        let entries = vec![entry(1, 15, 73.0), entry(2, 22, 81.5)];
        let count = export_performance_csv(&csv_path, &entries).unwrap();
        assert_eq!(count, 2);

        let mut reader = csv::Reader::from_path(&csv_path).unwrap();
        let rows: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.unwrap().iter().map(String::from).collect())
            .collect();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["2024-03-01", "15", "73.0"]);
        assert_eq!(rows[1], vec!["2024-03-02", "22", "81.5"]);
    }

    #[test]
    fn test_export_replaces_previous_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("performance.csv");

        export_performance_csv(&csv_path, &[entry(1, 5, 60.0), entry(2, 5, 80.0)]).unwrap();
        export_performance_csv(&csv_path, &[entry(3, 9, 100.0)]).unwrap();

        let reader = csv::Reader::from_path(&csv_path).unwrap();
        assert_eq!(reader.into_records().count(), 1);
    }

    #[test]
    fn test_export_empty_log() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("performance.csv");

        let count = export_performance_csv(&csv_path, &[]).unwrap();
        assert_eq!(count, 0);
        assert!(csv_path.exists());
    }
}
