//! CSV rollup functionality for archiving the workout track log.
//!
//! This module implements atomic log-to-CSV conversion with proper error handling
//! to prevent data loss.

use crate::{Error, Result, WorkoutTrack};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::path::Path;
use uuid::Uuid;

/// A row in the CSV archive
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CsvRow {
    id: String,
    owner_id: String,
    plan_id: String,
    date: String,
    exercise_id: String,
    day: u8,
    order: u32,
    completed: bool,
    actual_sets: Option<u32>,
    actual_reps: Option<String>,
    note: Option<String>,
}

impl From<&WorkoutTrack> for CsvRow {
    fn from(track: &WorkoutTrack) -> Self {
        CsvRow {
            id: track.id.to_string(),
            owner_id: track.owner_id.clone(),
            plan_id: track.plan_id.to_string(),
            date: track.date.to_rfc3339(),
            exercise_id: track.exercise_id.clone(),
            day: track.day,
            order: track.order,
            completed: track.completed,
            actual_sets: track.actual_sets,
            actual_reps: track.actual_reps.clone(),
            note: track.note.clone(),
        }
    }
}

impl TryFrom<CsvRow> for WorkoutTrack {
    type Error = Error;

    fn try_from(row: CsvRow) -> Result<Self> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| Error::Other(format!("Invalid UUID: {}", e)))?;
        let plan_id = Uuid::parse_str(&row.plan_id)
            .map_err(|e| Error::Other(format!("Invalid plan UUID: {}", e)))?;
        let date = DateTime::parse_from_rfc3339(&row.date)
            .map_err(|e| Error::Other(format!("Invalid date: {}", e)))?
            .with_timezone(&Utc);

        Ok(WorkoutTrack {
            id,
            owner_id: row.owner_id,
            plan_id,
            date,
            exercise_id: row.exercise_id,
            day: row.day,
            order: row.order,
            completed: row.completed,
            actual_sets: row.actual_sets,
            actual_reps: row.actual_reps,
            note: row.note,
        })
    }
}

/// Roll up logged tracks into CSV and archive the log atomically
///
/// This function:
/// 1. Reads all tracks from the log
/// 2. Appends them to the CSV file (creates with headers if needed)
/// 3. Syncs the CSV to disk
/// 4. Renames the log to .processed
/// 5. Returns the number of tracks processed
///
/// The log is renamed rather than deleted so it can be recovered by hand.
pub fn wal_to_csv_and_archive(wal_path: &Path, csv_path: &Path) -> Result<usize> {
    let tracks = crate::wal::read_tracks(wal_path)?;

    if tracks.is_empty() {
        tracing::info!("No tracks in log to roll up");
        return Ok(0);
    }

    if let Some(parent) = csv_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(csv_path)?;

    let needs_headers = file.metadata()?.len() == 0;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(needs_headers)
        .from_writer(file);

    for track in &tracks {
        writer.serialize(CsvRow::from(track))?;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    file.sync_all()?;

    tracing::info!("Wrote {} tracks to CSV", tracks.len());

    let processed_path = wal_path.with_extension("wal.processed");
    std::fs::rename(wal_path, &processed_path)?;

    tracing::info!("Archived log to {:?}", processed_path);

    Ok(tracks.len())
}

/// Clean up old processed logs
///
/// This removes all .wal.processed files in the given directory.
pub fn cleanup_processed_wals(dir: &Path) -> Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }

    let mut count = 0;
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();

        if path.extension().is_some_and(|ext| ext == "processed") {
            std::fs::remove_file(&path)?;
            tracing::debug!("Removed processed log: {:?}", path);
            count += 1;
        }
    }

    if count > 0 {
        tracing::info!("Cleaned up {} processed logs", count);
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wal::{JsonlTrackSink, TrackSink};
    use std::fs::File;

    fn create_test_track(exercise_id: &str) -> WorkoutTrack {
        WorkoutTrack {
            id: Uuid::new_v4(),
            owner_id: "alice".into(),
            plan_id: Uuid::new_v4(),
            date: Utc::now(),
            exercise_id: exercise_id.into(),
            day: 3,
            order: 1,
            completed: true,
            actual_sets: None,
            actual_reps: Some("8, with a pause".into()),
            note: None,
        }
    }

    #[test]
    fn test_wal_to_csv_creates_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let wal_path = temp_dir.path().join("tracks.wal");
        let csv_path = temp_dir.path().join("tracks.csv");

        let mut sink = JsonlTrackSink::new(&wal_path);
        for i in 0..3 {
            sink.append(&create_test_track(&format!("ex_{}", i))).unwrap();
        }

        let count = wal_to_csv_and_archive(&wal_path, &csv_path).unwrap();
        assert_eq!(count, 3);

        assert!(csv_path.exists());
        assert!(!wal_path.exists());
        assert!(wal_path.with_extension("wal.processed").exists());
    }

    #[test]
    fn test_wal_to_csv_appends() {
        let temp_dir = tempfile::tempdir().unwrap();
        let wal_path = temp_dir.path().join("tracks.wal");
        let csv_path = temp_dir.path().join("tracks.csv");

        JsonlTrackSink::new(&wal_path)
            .append(&create_test_track("ex_1"))
            .unwrap();
        assert_eq!(wal_to_csv_and_archive(&wal_path, &csv_path).unwrap(), 1);

        JsonlTrackSink::new(&wal_path)
            .append(&create_test_track("ex_2"))
            .unwrap();
        assert_eq!(wal_to_csv_and_archive(&wal_path, &csv_path).unwrap(), 1);

        let reader = csv::Reader::from_path(&csv_path).unwrap();
        assert_eq!(reader.into_records().count(), 2);
    }

    #[test]
    fn test_csv_rows_read_back() {
        let temp_dir = tempfile::tempdir().unwrap();
        let wal_path = temp_dir.path().join("tracks.wal");
        let csv_path = temp_dir.path().join("tracks.csv");

        let track = create_test_track("ex_1");
        JsonlTrackSink::new(&wal_path).append(&track).unwrap();
        wal_to_csv_and_archive(&wal_path, &csv_path).unwrap();

        let mut reader = csv::Reader::from_path(&csv_path).unwrap();
        let rows: Vec<CsvRow> = reader.deserialize().map(|r| r.unwrap()).collect();
        let back = WorkoutTrack::try_from(rows.into_iter().next().unwrap()).unwrap();

        assert_eq!(back.id, track.id);
        assert_eq!(back.actual_reps, track.actual_reps);
        assert_eq!(back.note, None);
    }

    #[test]
    fn test_empty_wal() {
        let temp_dir = tempfile::tempdir().unwrap();
        let wal_path = temp_dir.path().join("empty.wal");
        let csv_path = temp_dir.path().join("tracks.csv");

        File::create(&wal_path).unwrap();

        let count = wal_to_csv_and_archive(&wal_path, &csv_path).unwrap();
        assert_eq!(count, 0);
        assert!(!csv_path.exists());
    }

    #[test]
    fn test_cleanup_processed_wals() {
        let temp_dir = tempfile::tempdir().unwrap();

        File::create(temp_dir.path().join("t1.wal.processed")).unwrap();
        File::create(temp_dir.path().join("t2.wal.processed")).unwrap();
        File::create(temp_dir.path().join("keep.wal")).unwrap();

        let count = cleanup_processed_wals(temp_dir.path()).unwrap();
        assert_eq!(count, 2);

        assert!(!temp_dir.path().join("t1.wal.processed").exists());
        assert!(temp_dir.path().join("keep.wal").exists());
    }
}
