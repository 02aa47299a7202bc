//! Append-only workout track log.
//!
//! Tracks are appended to a JSONL (JSON Lines) file with file locking
//! to ensure safe concurrent access.

use crate::{Result, WorkoutTrack};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Track sink trait for persisting workout tracks
pub trait TrackSink {
    fn append(&mut self, track: &WorkoutTrack) -> Result<()>;
}

/// JSONL-based track sink with file locking
pub struct JsonlTrackSink {
    path: PathBuf,
}

impl JsonlTrackSink {
    /// Create a new JSONL sink for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl TrackSink for JsonlTrackSink {
    fn append(&mut self, track: &WorkoutTrack) -> Result<()> {
        self.ensure_parent_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.lock_exclusive()?;

        let mut writer = std::io::BufWriter::new(&file);
        let line = serde_json::to_string(track)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        drop(writer);

        file.unlock()?;

        tracing::debug!("Appended track {} to log", track.id);
        Ok(())
    }
}

/// In-memory sink, for callers that persist tracks themselves
impl TrackSink for Vec<WorkoutTrack> {
    fn append(&mut self, track: &WorkoutTrack) -> Result<()> {
        self.push(track.clone());
        Ok(())
    }
}

/// Read all tracks from a log file
pub fn read_tracks(path: &Path) -> Result<Vec<WorkoutTrack>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut tracks = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<WorkoutTrack>(&line) {
            Ok(track) => tracks.push(track),
            Err(e) => {
                tracing::warn!("Failed to parse track at line {}: {}", line_num + 1, e);
            }
        }
    }

    file.unlock()?;
    tracing::debug!("Read {} tracks from log", tracks.len());
    Ok(tracks)
}
