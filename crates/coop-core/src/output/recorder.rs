//! Round Recorder
//!
//! Append-only CSV round table, one file per run.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use coop_events::{RoundRecord, ROUND_TABLE_HEADER};

/// Writes one CSV row per round
pub struct RoundRecorder {
    writer: Option<BufWriter<File>>,
    rows_written: u64,
}

impl RoundRecorder {
    /// Create a recorder writing to `path`, truncating any previous table
    pub fn create(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        let mut writer = BufWriter::new(file);
        writeln!(writer, "{}", ROUND_TABLE_HEADER)?;

        Ok(Self {
            writer: Some(writer),
            rows_written: 0,
        })
    }

    /// Create a recorder that discards rows (for testing)
    pub fn null() -> Self {
        Self {
            writer: None,
            rows_written: 0,
        }
    }

    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    pub fn record(&mut self, record: &RoundRecord) -> std::io::Result<()> {
        self.rows_written += 1;
        if let Some(ref mut writer) = self.writer {
            writeln!(writer, "{}", record.to_csv_row())?;
        }
        Ok(())
    }

    /// Flush the buffer to disk
    pub fn flush(&mut self) -> std::io::Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for RoundRecorder {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!("Failed to flush round table: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn record(round: u64) -> RoundRecord {
        RoundRecord {
            round,
            yellow_to_yellow: 50.0,
            yellow_to_green: 25.0,
            green_to_yellow: 75.0,
            green_to_green: 100.0,
        }
    }

    #[test]
    fn test_round_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run_000.csv");

        let mut recorder = RoundRecorder::create(&path).unwrap();
        recorder.record(&record(0)).unwrap();
        recorder.record(&record(1)).unwrap();
        recorder.flush().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], ROUND_TABLE_HEADER);
        assert_eq!(lines[1], "0,50,25,75,100");
        assert_eq!(lines[2], "1,50,25,75,100");
        assert_eq!(recorder.rows_written(), 2);
    }

    #[test]
    fn test_create_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run_000.csv");

        {
            let mut recorder = RoundRecorder::create(&path).unwrap();
            for round in 0..5 {
                recorder.record(&record(round)).unwrap();
            }
        }
        {
            let mut recorder = RoundRecorder::create(&path).unwrap();
            recorder.record(&record(0)).unwrap();
        }

        // Drop flushes
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_null_recorder() {
        let mut recorder = RoundRecorder::null();
        recorder.record(&record(0)).unwrap();
        assert_eq!(recorder.rows_written(), 1);
    }
}
