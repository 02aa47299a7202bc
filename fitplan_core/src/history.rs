//! Workout track history over a day window.
//!
//! Tracks live in the log until rolled up, then in the CSV archive. This
//! module reads both and merges them.

use crate::csv_rollup::CsvRow;
use crate::{Result, WorkoutTrack};
use chrono::{Duration, Utc};
use csv::ReaderBuilder;
use std::collections::HashSet;
use std::path::Path;

/// Load an owner's tracks from the last N days from both log and CSV
///
/// Returns tracks sorted by date (newest first).
/// Tracks that appear in both the log and the CSV are returned once.
pub fn load_recent_tracks(
    wal_path: &Path,
    csv_path: &Path,
    owner_id: &str,
    days: i64,
) -> Result<Vec<WorkoutTrack>> {
    let cutoff = Utc::now() - Duration::days(days);
    let mut tracks = Vec::new();
    let mut seen_ids = HashSet::new();

    let in_window = |track: &WorkoutTrack| track.owner_id == owner_id && track.date >= cutoff;

    if wal_path.exists() {
        for track in crate::wal::read_tracks(wal_path)? {
            if in_window(&track) && seen_ids.insert(track.id) {
                tracks.push(track);
            }
        }
        tracing::debug!("Loaded {} tracks from log", tracks.len());
    }

    if csv_path.exists() {
        let mut csv_count = 0;
        for track in load_tracks_from_csv(csv_path)? {
            if in_window(&track) && seen_ids.insert(track.id) {
                tracks.push(track);
                csv_count += 1;
            }
        }
        tracing::debug!("Loaded {} tracks from CSV", csv_count);
    }

    tracks.sort_by(|a, b| b.date.cmp(&a.date));

    tracing::info!(
        "Loaded {} tracks for {} from last {} days",
        tracks.len(),
        owner_id,
        days
    );

    Ok(tracks)
}

fn load_tracks_from_csv(path: &Path) -> Result<Vec<WorkoutTrack>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;

    let mut tracks = Vec::new();
    for result in reader.deserialize::<CsvRow>() {
        match result {
            Ok(row) => match WorkoutTrack::try_from(row) {
                Ok(track) => tracks.push(track),
                Err(e) => tracing::warn!("Failed to parse CSV row: {}", e),
            },
            Err(e) => tracing::warn!("Failed to deserialize CSV row: {}", e),
        }
    }

    Ok(tracks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wal::{JsonlTrackSink, TrackSink};
    use uuid::Uuid;

    fn create_test_track(owner: &str, exercise_id: &str, days_ago: i64) -> WorkoutTrack {
        WorkoutTrack {
            id: Uuid::new_v4(),
            owner_id: owner.into(),
            plan_id: Uuid::nil(),
            date: Utc::now() - Duration::days(days_ago),
            exercise_id: exercise_id.into(),
            day: 1,
            order: 0,
            completed: true,
            actual_sets: Some(3),
            actual_reps: None,
            note: None,
        }
    }

    #[test]
    fn test_load_recent_tracks_from_wal() {
        let temp_dir = tempfile::tempdir().unwrap();
        let wal_path = temp_dir.path().join("tracks.wal");
        let csv_path = temp_dir.path().join("tracks.csv");

        let mut sink = JsonlTrackSink::new(&wal_path);
        sink.append(&create_test_track("alice", "squat", 1)).unwrap();
        sink.append(&create_test_track("alice", "row", 3)).unwrap();
        sink.append(&create_test_track("alice", "press", 10)).unwrap(); // Too old
        sink.append(&create_test_track("bob", "curl", 1)).unwrap(); // Other owner

        let tracks = load_recent_tracks(&wal_path, &csv_path, "alice", 7).unwrap();
        assert_eq!(tracks.len(), 2);
    }

    #[test]
    fn test_deduplication_across_wal_and_csv() {
        let temp_dir = tempfile::tempdir().unwrap();
        let wal_path = temp_dir.path().join("tracks.wal");
        let csv_path = temp_dir.path().join("tracks.csv");

        let track = create_test_track("alice", "squat", 1);
        JsonlTrackSink::new(&wal_path).append(&track).unwrap();
        crate::csv_rollup::wal_to_csv_and_archive(&wal_path, &csv_path).unwrap();

        // Same record in both places
        JsonlTrackSink::new(&wal_path).append(&track).unwrap();

        let tracks = load_recent_tracks(&wal_path, &csv_path, "alice", 7).unwrap();
        assert_eq!(tracks.iter().filter(|t| t.id == track.id).count(), 1);
    }

    #[test]
    fn test_tracks_sorted_newest_first() {
        let temp_dir = tempfile::tempdir().unwrap();
        let wal_path = temp_dir.path().join("tracks.wal");
        let csv_path = temp_dir.path().join("tracks.csv");

        let mut sink = JsonlTrackSink::new(&wal_path);
        sink.append(&create_test_track("alice", "old", 5)).unwrap();
        sink.append(&create_test_track("alice", "new", 1)).unwrap();

        let tracks = load_recent_tracks(&wal_path, &csv_path, "alice", 7).unwrap();
        assert_eq!(tracks[0].exercise_id, "new");
        assert_eq!(tracks[1].exercise_id, "old");
    }
}
