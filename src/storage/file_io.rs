//! File I/O helpers
//!
//! Writes go to a sibling temp file that is synced and then renamed over the
//! target, so a crash leaves either the old file or the new one.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::BookkeeperError;

fn open_reader(path: &Path) -> Result<BufReader<File>, BookkeeperError> {
    let file = File::open(path).map_err(|e| {
        BookkeeperError::Storage(format!("Failed to open {}: {}", path.display(), e))
    })?;
    Ok(BufReader::new(file))
}

/// Read JSON from a file, returning the default value if the file is missing
pub fn read_json<T, P>(path: P) -> Result<T, BookkeeperError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Ok(T::default());
    }
    read_json_required(path)
}

/// Read JSON from a file that must exist (data dumps, journal files, schemas)
pub fn read_json_required<T, P>(path: P) -> Result<T, BookkeeperError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Err(BookkeeperError::Storage(format!(
            "File not found: {}",
            path.display()
        )));
    }

    serde_json::from_reader(open_reader(path)?).map_err(|e| {
        BookkeeperError::Storage(format!("Failed to parse {}: {}", path.display(), e))
    })
}

/// Write JSON to a file atomically
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), BookkeeperError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            BookkeeperError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| BookkeeperError::Storage(format!("Failed to create temp file: {}", e)))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| BookkeeperError::Storage(format!("Failed to serialize data: {}", e)))?;
    writer
        .flush()
        .map_err(|e| BookkeeperError::Storage(format!("Failed to flush data: {}", e)))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| BookkeeperError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        BookkeeperError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}
