//! Plan book persistence with file locking.
//!
//! The book is a single JSON document rewritten atomically on every change.
//! Writers serialize on an exclusive lock held on a sidecar `.lock` file for
//! the whole load-modify-save cycle, so two processes regenerating plans for
//! the same user cannot both leave an active plan behind.

use crate::{Error, PlanBook, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

fn lock_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".lock");
    PathBuf::from(name)
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

impl PlanBook {
    /// Load the plan book from a file with shared locking
    ///
    /// Returns an empty book if the file doesn't exist. Unlike other local
    /// files, a corrupted book is an error: it holds plan history that a
    /// following save would otherwise overwrite.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No plan book found at {:?}, starting empty", path);
            return Ok(Self::default());
        }

        let file = File::open(path)?;
        file.lock_shared()?;

        let mut contents = String::new();
        let read = std::io::BufReader::new(&file).read_to_string(&mut contents);
        file.unlock()?;
        read?;

        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let book: PlanBook = serde_json::from_str(&contents).map_err(|e| {
            Error::State(format!("Failed to parse plan book {:?}: {}", path, e))
        })?;

        tracing::debug!("Loaded {} plans from {:?}", book.len(), path);
        Ok(book)
    }

    /// Save the plan book to a file
    ///
    /// Atomically writes the book by:
    /// 1. Writing to a temp file
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    pub fn save(&self, path: &Path) -> Result<()> {
        ensure_parent_dir(path)?;

        let temp = NamedTempFile::new_in(path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "plan book path missing parent")
        })?)?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string_pretty(self)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved {} plans to {:?}", self.len(), path);
        Ok(())
    }

    /// Load the book, modify it, and save it back under an exclusive lock
    ///
    /// The closure's result is returned. When it fails nothing is written.
    pub fn update<F, T>(path: &Path, f: F) -> Result<T>
    where
        F: FnOnce(&mut PlanBook) -> Result<T>,
    {
        ensure_parent_dir(path)?;

        let lock = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .open(lock_path(path))?;
        lock.lock_exclusive()?;

        let result = Self::load(path).and_then(|mut book| {
            let value = f(&mut book)?;
            book.save(path)?;
            Ok(value)
        });

        lock.unlock()?;
        result
    }
}
