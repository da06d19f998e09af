//! Upload archive: a flat directory of previously uploaded files.
//!
//! The directory itself is the index: `list()` enumerates it and `load()`
//! reads from it, so the two always agree. Each entry is named
//! `<YYYYMMDD-HHMMSS>_<sanitized original name>`.
//!
//! # Layout
//!
//! ```text
//! uploads/
//! ├── 20240101-000000_t.csv
//! ├── 20240101-000000~0001_t.csv   (same second, same name)
//! ├── 20240312-141502_gapminder.csv
//! └── .upload-XXXXXX               (in-flight write, hidden from list())
//! ```
//!
//! Writes go to a hidden temp file first and are published with a
//! no-clobber rename, so a failed save never exposes a partial file.

mod clock;

pub use clock::{Clock, FixedClock, SystemClock};

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::data::csv_codec::parse_csv;
use crate::error::{DashError, Result};
use crate::types::{ArchivedFile, Dataset};

/// Timestamp prefix format of generated names
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Prefix of hidden entries (ignored by `list()`)
pub const HIDDEN_PREFIX: char = '.';

/// Fallback when an original name sanitizes to nothing
const FALLBACK_NAME: &str = "upload";

/// Upper bound on same-second collisions before giving up
const MAX_COLLISIONS: u32 = 10_000;

/// Directory-backed store of uploaded files
pub struct FileArchive {
    root: PathBuf,
    clock: Box<dyn Clock>,
}

impl FileArchive {
    /// Open (and create if needed) an archive rooted at `root`.
    pub fn open(root: impl Into<PathBuf>, clock: Box<dyn Clock>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|e| {
            DashError::StorageIo(format!(
                "cannot create archive directory {}: {}",
                root.display(),
                e
            ))
        })?;
        tracing::debug!("Opened upload archive at {:?}", root);
        Ok(Self { root, clock })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Store `bytes` under a new generated name and return its record.
    pub fn save(&self, bytes: &[u8], original_name: &str) -> Result<ArchivedFile> {
        let sanitized = sanitize_name(original_name);
        let now = self.clock.now();
        let stamp = now.format(TIMESTAMP_FORMAT).to_string();

        let mut temp = tempfile::Builder::new()
            .prefix(".upload-")
            .tempfile_in(&self.root)
            .map_err(|e| storage_error("create temp file", &self.root, e))?;
        temp.write_all(bytes)
            .and_then(|_| temp.as_file().sync_all())
            .map_err(|e| storage_error("write temp file", temp.path(), e))?;

        // Dropping `temp` on any early return removes it.
        for attempt in 0..MAX_COLLISIONS {
            let generated_name = if attempt == 0 {
                format!("{}_{}", stamp, sanitized)
            } else {
                format!("{}~{:04}_{}", stamp, attempt, sanitized)
            };
            let target = self.root.join(&generated_name);
            match temp.persist_noclobber(&target) {
                Ok(_) => {
                    tracing::info!(
                        "Archived {} as {} ({} bytes)",
                        original_name,
                        generated_name,
                        bytes.len()
                    );
                    return Ok(ArchivedFile {
                        generated_name,
                        original_name: sanitized,
                        path: target,
                        created_at: Some(now),
                    });
                }
                Err(err) if err.error.kind() == ErrorKind::AlreadyExists => {
                    temp = err.file;
                }
                Err(err) => {
                    return Err(storage_error("publish archived file", &target, err.error));
                }
            }
        }

        Err(DashError::StorageIo(format!(
            "too many uploads named {} at {}",
            sanitized, stamp
        )))
    }

    /// Generated names currently present, sorted, hidden entries excluded.
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = std::fs::read_dir(&self.root)
            .map_err(|e| storage_error("list archive", &self.root, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| storage_error("list archive", &self.root, e))?;
            let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
            if !is_file {
                continue;
            }
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if name.starts_with(HIDDEN_PREFIX) {
                continue;
            }
            names.push(name);
        }
        names.sort();
        Ok(names)
    }

    /// Metadata for every listed entry, in `list()` order.
    pub fn records(&self) -> Result<Vec<ArchivedFile>> {
        Ok(self
            .list()?
            .into_iter()
            .map(|name| self.record_for(&name))
            .collect())
    }

    /// Metadata for one generated name (the file is not touched).
    pub fn record_for(&self, generated_name: &str) -> ArchivedFile {
        let (created_at, original_name) = split_generated_name(generated_name);
        ArchivedFile {
            generated_name: generated_name.to_string(),
            original_name,
            path: self.root.join(generated_name),
            created_at,
        }
    }

    /// Raw bytes of an archived file.
    pub fn read_bytes(&self, generated_name: &str) -> Result<Vec<u8>> {
        let path = self.entry_path(generated_name)?;
        std::fs::read(&path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                DashError::NotFound(format!("archived file {} no longer exists", generated_name))
            } else {
                storage_error("read archived file", &path, e)
            }
        })
    }

    /// Read and parse an archived file.
    pub fn load(&self, generated_name: &str) -> Result<Dataset> {
        let bytes = self.read_bytes(generated_name)?;
        parse_csv(&bytes).map_err(|e| e.with_context(format!("archived file {}", generated_name)))
    }

    fn entry_path(&self, generated_name: &str) -> Result<PathBuf> {
        let valid = !generated_name.is_empty()
            && !generated_name.starts_with(HIDDEN_PREFIX)
            && !generated_name.contains(['/', '\\'])
            && generated_name != "..";
        if !valid {
            return Err(DashError::NotFound(format!(
                "'{}' is not an archive entry",
                generated_name
            )));
        }
        Ok(self.root.join(generated_name))
    }
}

fn storage_error(action: &str, path: &Path, err: std::io::Error) -> DashError {
    DashError::StorageIo(format!("{} {}: {}", action, path.display(), err))
}

/// Make an original file name safe to store.
///
/// Any directory part is dropped, then ASCII alphanumerics, `.`, `-` and
/// `_` are kept and everything else becomes `_`.
pub fn sanitize_name(original_name: &str) -> String {
    let base = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original_name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        cleaned
    }
}

/// Recover (timestamp, original name) from a generated name.
fn split_generated_name(generated_name: &str) -> (Option<NaiveDateTime>, String) {
    let Some((prefix, original)) = generated_name.split_once('_') else {
        return (None, generated_name.to_string());
    };
    // Strip a collision counter: YYYYMMDD-HHMMSS~NNNN
    let stamp = match prefix.split_once('~') {
        Some((stamp, counter))
            if counter.len() == 4 && counter.chars().all(|c| c.is_ascii_digit()) =>
        {
            stamp
        }
        Some(_) => return (None, generated_name.to_string()),
        None => prefix,
    };
    match NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT) {
        Ok(ts) => (Some(ts), original.to_string()),
        Err(_) => (None, generated_name.to_string()),
    }
}
