//! Event store operations on disk.
//!
//! This module selects event files in the store directory, reads their
//! records, appends new records and rewrites files when records are deleted.
//!
//! Nothing here is locked. Two invocations touching the same file at the same
//! time race, and the last writer wins. A delete reads the whole file and
//! writes it back in place, so a crash in between can leave it truncated.

use crate::config::Config;
use crate::errors::{AppError, AppResult, StoreError};
use crate::journal_core::{decode, encode_prefix, encode_record, parse_records};
use crate::journal_core::{DateWindow, Event, PartialDate};
use std::fs::{self, OpenOptions};
#[cfg(unix)]
use std::fs::Permissions;
use std::io::{self, Write};
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[cfg(test)]
mod tests;

/// How the store is searched for event files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileQuery {
    /// Every file whose name starts with this encoded date prefix.
    ExactPrefix(String),
    /// Every file whose decoded name falls inside the window.
    RangeWindow(DateWindow),
}

impl FileQuery {
    /// Builds the query for `date` under the configured range.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a range is requested for a date without
    /// both month and day.
    ///
    /// # Examples
    ///
    /// ```
    /// use moo::journal_core::PartialDate;
    /// use moo::journal_io::FileQuery;
    /// use moo::Config;
    ///
    /// let query = FileQuery::for_date(&PartialDate::month(2023, 6), &Config::default()).unwrap();
    /// assert_eq!(query, FileQuery::ExactPrefix("2023-06-".to_string()));
    /// ```
    pub fn for_date(date: &PartialDate, config: &Config) -> AppResult<Self> {
        if config.range == 0 {
            return Ok(FileQuery::ExactPrefix(encode_prefix(date, config.file_delim)));
        }

        let search = date.to_full().ok_or_else(|| {
            AppError::Config("a range needs a full year, month and day".to_string())
        })?;
        Ok(FileQuery::RangeWindow(DateWindow::around(search, config.range)))
    }

    /// Whether a file called `file_name` belongs to the query.
    ///
    /// Range queries decode every name; names that are not dates decode to
    /// zeroed fields and are judged on those.
    pub fn matches(&self, file_name: &str, file_delim: char) -> bool {
        match self {
            FileQuery::ExactPrefix(prefix) => file_name.as_bytes().starts_with(prefix.as_bytes()),
            FileQuery::RangeWindow(window) => window.contains(&decode(file_name, file_delim)),
        }
    }
}

/// Which line of an event file to delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTarget {
    /// 1-based line number.
    Line(usize),
    All,
}

/// What a delete did to the event file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The file was written back; `line_removed` is false when the line did
    /// not exist and the contents are unchanged.
    Rewritten { line_removed: bool },
    /// Nothing was left, so the file was removed.
    Removed,
}

/// A listed event file and the records read from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFile {
    pub name: String,
    pub events: Vec<Event>,
}

/// Ensures the store directory exists, creating it if necessary.
///
/// New store directories get 0o700 permissions on unix.
///
/// # Errors
///
/// Returns:
/// - `AppError::Config` if the provided path is not absolute
/// - `AppError::Store` if the directory cannot be created
pub fn ensure_store_directory_exists(store_dir: &Path) -> AppResult<()> {
    if !store_dir.is_absolute() {
        return Err(AppError::Config(format!(
            "Store directory path must be absolute: {}",
            store_dir.display()
        )));
    }

    if !store_dir.exists() {
        let create_error = |source: io::Error| StoreError::CreateStore {
            path: store_dir.to_path_buf(),
            source,
        };

        fs::create_dir_all(store_dir).map_err(create_error)?;

        #[cfg(unix)]
        {
            let permissions = Permissions::from_mode(crate::constants::DEFAULT_DIR_PERMISSIONS);
            fs::set_permissions(store_dir, permissions).map_err(create_error)?;
        }
        debug!("Created store directory");
    }
    Ok(())
}

/// Lists the regular files in `store_dir` that match `query`.
///
/// Subdirectories, symlinks and names that are not valid UTF-8 are skipped.
/// With `sort` the result is ordered by file name, otherwise it is in
/// directory order.
///
/// # Errors
///
/// Returns `AppError::Store` if the directory cannot be read.
pub fn select_files(
    store_dir: &Path,
    query: &FileQuery,
    file_delim: char,
    sort: bool,
) -> AppResult<Vec<PathBuf>> {
    let read_error = |source: io::Error| StoreError::ReadStore {
        path: store_dir.to_path_buf(),
        source,
    };

    let mut selected = Vec::new();
    for entry in fs::read_dir(store_dir).map_err(read_error)? {
        let entry = entry.map_err(read_error)?;
        if !entry.file_type().map_err(read_error)?.is_file() {
            continue;
        }

        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                debug!("Skipping non UTF-8 file name {:?}", raw);
                continue;
            }
        };

        if query.matches(&name, file_delim) {
            selected.push(entry.path());
        }
    }

    if sort {
        selected.sort();
    }
    debug!("Selected {} event file(s) with {:?}", selected.len(), query);

    Ok(selected)
}

/// Reads every event file matching `date`.
///
/// Empty files are left out. A file that cannot be read is logged and
/// skipped; the listing carries on with the rest.
///
/// # Errors
///
/// Returns an error if the query is invalid or the store cannot be read.
pub fn list_matches(config: &Config, date: &PartialDate) -> AppResult<Vec<EventFile>> {
    let query = FileQuery::for_date(date, config)?;
    let paths = select_files(&config.store_dir, &query, config.file_delim, config.sort)?;
    Ok(read_event_files(paths))
}

/// Reads the records of each selected file, in order.
///
/// Files that are empty or cannot be read, for instance because they were
/// removed after being selected, are left out.
fn read_event_files(paths: Vec<PathBuf>) -> Vec<EventFile> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let content = match fs::read(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to open {}: {}", path.display(), e);
                continue;
            }
        };
        if content.is_empty() {
            continue;
        }

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        files.push(EventFile {
            name,
            events: parse_records(&content),
        });
    }
    files
}

/// Path of the event file for `date`.
pub fn event_file_path(config: &Config, date: &PartialDate) -> PathBuf {
    config.store_dir.join(encode_prefix(date, config.file_delim))
}

/// Appends `event` to the event file for `date`, creating store and file as
/// needed.
///
/// # Errors
///
/// Returns:
/// - `AppError::Config` if the event has an empty title
/// - `AppError::Store` if the store cannot be created or the file cannot be
///   opened or written
pub fn add_event(config: &Config, date: &PartialDate, event: &Event) -> AppResult<PathBuf> {
    if event.has_empty_title() {
        return Err(AppError::Config("title cannot be empty".to_string()));
    }

    ensure_store_directory_exists(&config.store_dir)?;
    let path = event_file_path(config, date);

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|source| StoreError::OpenFile {
            path: path.clone(),
            source,
        })?;

    file.write_all(encode_record(event, config.event_delim).as_bytes())
        .map_err(|source| StoreError::WriteFile {
            path: path.clone(),
            source,
        })?;

    info!("Added event to {}", path.display());
    Ok(path)
}

/// Copies `content` without the bytes of the targeted line.
///
/// Lines are counted from 1 and end with (and include) their newline.
///
/// # Examples
///
/// ```
/// use moo::journal_io::{remove_line, LineTarget};
///
/// assert_eq!(remove_line(b"a\nb\nc\n", LineTarget::Line(2)), b"a\nc\n");
/// assert!(remove_line(b"a\nb\n", LineTarget::All).is_empty());
/// ```
pub fn remove_line(content: &[u8], target: LineTarget) -> Vec<u8> {
    let line = match target {
        LineTarget::Line(line) => line,
        LineTarget::All => return Vec::new(),
    };

    let mut kept = Vec::with_capacity(content.len());
    let mut current = 1;
    for &byte in content {
        if current != line {
            kept.push(byte);
        }
        if byte == b'\n' {
            current += 1;
        }
    }
    kept
}

/// Deletes a line, or every line, from the event file for `date`.
///
/// The file is read in full and written back without the deleted line. If
/// nothing is left the file is removed. Deleting a line past the end writes
/// the file back unchanged.
///
/// # Errors
///
/// Returns `AppError::Store` if the file cannot be read, written or removed.
/// A file that vanished before it could be removed is not an error.
pub fn delete_line(config: &Config, date: &PartialDate, target: LineTarget) -> AppResult<DeleteOutcome> {
    let path = event_file_path(config, date);

    let content = fs::read(&path).map_err(|source| StoreError::OpenFile {
        path: path.clone(),
        source,
    })?;
    let kept = remove_line(&content, target);

    if kept.is_empty() {
        match fs::remove_file(&path) {
            Ok(()) => info!("Removed {}", path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("{} was already gone", path.display());
            }
            Err(source) => {
                return Err(StoreError::RemoveFile { path, source }.into());
            }
        }
        return Ok(DeleteOutcome::Removed);
    }

    fs::write(&path, &kept).map_err(|source| StoreError::WriteFile {
        path: path.clone(),
        source,
    })?;

    let line_removed = kept.len() != content.len();
    info!(line_removed, "Rewrote {}", path.display());
    Ok(DeleteOutcome::Rewritten { line_removed })
}
