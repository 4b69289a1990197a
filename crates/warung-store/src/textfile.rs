//! # Text File Access Layer
//!
//! Mutually-exclusive read/write/append operations on header-prefixed
//! line-oriented text files.
//!
//! ## Lock Registry
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Per-Path Lock Registry                              │
//! │                                                                         │
//! │  static LOCKS ── std::sync::Mutex<HashMap<PathBuf, Arc<tokio Mutex>>>   │
//! │                        │                                                │
//! │       held only across the map lookup (double-checked lazy init)        │
//! │                        │                                                │
//! │                        ▼                                                │
//! │   stok.txt ──────► Arc<Mutex<()>>   ◄── held across the awaited I/O     │
//! │   laporan.txt ───► Arc<Mutex<()>>                                       │
//! │                                                                         │
//! │  Two operations on the SAME path never interleave.                      │
//! │  Operations on different paths proceed in parallel.                     │
//! │  There is NO cross-file atomicity — callers sequence multi-file work.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The public functions each take the path lock for the duration of one file
//! operation. The stores instead take the lock once around a whole
//! read-modify-write cycle (via [`lock_path`] + the `_unlocked` variants), so
//! a concurrent stock decrement always reads the latest value. The lock is
//! not reentrant: never call a locked function while holding the guard.
//!
//! The registry never evicts: the process only ever touches a fixed, small
//! set of data files, so the table stays bounded.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex as StdMutex, OnceLock};

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use warung_core::codec::LineRecord;

// =============================================================================
// Lock Registry
// =============================================================================

static LOCKS: OnceLock<StdMutex<HashMap<PathBuf, Arc<Mutex<()>>>>> = OnceLock::new();

/// Returns the exclusive lock for a file path, creating it lazily.
///
/// The registry mutex is synchronous and held only long enough to clone the
/// `Arc`; the returned per-path mutex is async and may be held across await
/// points.
fn lock_for(path: &Path) -> Arc<Mutex<()>> {
    let registry = LOCKS.get_or_init(|| StdMutex::new(HashMap::new()));
    let mut table = registry.lock().unwrap_or_else(|poisoned| {
        // The registry only ever inserts; a poisoned map is still usable.
        poisoned.into_inner()
    });
    Arc::clone(
        table
            .entry(path.to_path_buf())
            .or_insert_with(|| Arc::new(Mutex::new(()))),
    )
}

/// Acquires the exclusive lock for a path.
///
/// Used by the stores to span one whole read-modify-write cycle. Pair only
/// with the `_unlocked` functions below while the guard is held.
pub(crate) async fn lock_path(path: &Path) -> OwnedMutexGuard<()> {
    lock_for(path).lock_owned().await
}

// =============================================================================
// Locked File Operations (the public contract)
// =============================================================================

/// Reads all data lines from a file.
///
/// The first line (the header) and blank lines are excluded. A missing file
/// reads as an empty sequence.
pub async fn read_lines(path: &Path) -> StoreResult<Vec<String>> {
    let _guard = lock_path(path).await;
    read_lines_unlocked(path).await
}

/// Replaces the file contents with the header followed by all given lines.
///
/// Parent directories are created as needed; a missing file is created.
pub async fn write_all(path: &Path, header: &str, lines: &[String]) -> StoreResult<()> {
    let _guard = lock_path(path).await;
    write_all_unlocked(path, header, lines).await
}

/// Appends a single line without reading the rest of the file.
pub async fn append_line(path: &Path, line: &str) -> StoreResult<()> {
    let _guard = lock_path(path).await;
    append_line_unlocked(path, line).await
}

// =============================================================================
// Unlocked Internals
// =============================================================================

pub(crate) async fn read_lines_unlocked(path: &Path) -> StoreResult<Vec<String>> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(StoreError::io(path, err)),
    };

    Ok(content
        .lines()
        .skip(1)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

pub(crate) async fn write_all_unlocked(
    path: &Path,
    header: &str,
    lines: &[String],
) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|err| StoreError::io(path, err))?;
    }

    let mut content = String::with_capacity(
        header.len() + lines.iter().map(String::len).sum::<usize>() + lines.len() + 1,
    );
    content.push_str(header);
    content.push('\n');
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }

    fs::write(path, content)
        .await
        .map_err(|err| StoreError::io(path, err))?;

    debug!(path = %path.display(), lines = lines.len(), "rewrote file");
    Ok(())
}

pub(crate) async fn append_line_unlocked(path: &Path, line: &str) -> StoreResult<()> {
    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .await
        .map_err(|err| StoreError::io(path, err))?;

    file.write_all(format!("{line}\n").as_bytes())
        .await
        .map_err(|err| StoreError::io(path, err))?;
    file.flush()
        .await
        .map_err(|err| StoreError::io(path, err))?;

    debug!(path = %path.display(), "appended line");
    Ok(())
}

// =============================================================================
// Record Helpers
// =============================================================================

/// Creates the file with its header row if it does not exist yet.
pub(crate) async fn ensure_exists(path: &Path, header: &str) -> StoreResult<()> {
    let _guard = lock_path(path).await;
    match fs::metadata(path).await {
        Ok(_) => Ok(()),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            write_all_unlocked(path, header, &[]).await
        }
        Err(err) => Err(StoreError::io(path, err)),
    }
}

/// Reads and decodes every valid record, in file order.
///
/// Lines that fail to decode are skipped with a warning — partial corruption
/// must not block the rest of the dataset.
pub(crate) async fn read_records_unlocked<R: LineRecord>(path: &Path) -> StoreResult<Vec<R>> {
    let lines = read_lines_unlocked(path).await?;
    let mut records = Vec::with_capacity(lines.len());

    for line in lines {
        match R::from_line(&line) {
            Ok(record) => records.push(record),
            Err(err) => {
                warn!(kind = R::KIND, %err, line = %line, "skipping invalid line");
            }
        }
    }

    Ok(records)
}

/// Locked variant of [`read_records_unlocked`], for pure reads.
pub(crate) async fn read_records<R: LineRecord>(path: &Path) -> StoreResult<Vec<R>> {
    let _guard = lock_path(path).await;
    read_records_unlocked(path).await
}

/// Rewrites the whole file from a record slice, while the caller holds the
/// path lock.
pub(crate) async fn write_records_unlocked<R: LineRecord>(
    path: &Path,
    records: &[R],
) -> StoreResult<()> {
    let lines: Vec<String> = records.iter().map(LineRecord::to_line).collect();
    write_all_unlocked(path, R::HEADER, &lines).await
}

/// Next id under the max+1 allocation scheme (1 when the slice is empty).
pub(crate) fn next_id<R: LineRecord>(records: &[R]) -> i64 {
    records.iter().map(LineRecord::id).max().unwrap_or(0) + 1
}

// =============================================================================
// Unit Tests
// =============================================================================
