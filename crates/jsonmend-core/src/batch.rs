use std::fs;
use std::io;
use std::path::Path;

use tracing::{info, warn};
use walkdir::WalkDir;

use crate::pipeline::repair_to_text;

/// Fixed filename always skipped by the tree walk, whatever it contains.
pub const SENTINEL_FILE_NAME: &str = "_file.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Repaired text differed from the original and was written back.
    Altered,
    /// File was already valid, left byte-identical.
    Unchanged,
    /// Unreadable or unrepairable; deleted when the flag asks for it, but
    /// counted as deleted for reporting either way.
    Deleted,
}

/// Aggregate counts for one tree walk. `valid` covers both altered and
/// unchanged files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub altered: usize,
    pub deleted: usize,
    pub valid: usize,
}

fn repair_in_place(path: &Path) -> io::Result<FileOutcome> {
    let content = fs::read_to_string(path)?;
    let repaired = repair_to_text(&content).map_err(io::Error::other)?;
    if repaired != content {
        fs::write(path, &repaired)?;
        Ok(FileOutcome::Altered)
    } else {
        Ok(FileOutcome::Unchanged)
    }
}

/// Repair a single file in place. Never fails: any read, repair, or write
/// error turns into `Deleted`, removing the file only when
/// `delete_on_failure` is set.
pub fn sanitize_file(path: &Path, delete_on_failure: bool) -> FileOutcome {
    match repair_in_place(path) {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "malformed file could not be repaired");
            if delete_on_failure {
                match fs::remove_file(path) {
                    Ok(()) => info!(path = %path.display(), "deleted unrepairable file"),
                    Err(de) => {
                        // Still counted Deleted for reporting.
                        warn!(path = %path.display(), error = %de, "failed to delete unrepairable file");
                    }
                }
            }
            FileOutcome::Deleted
        }
    }
}

/// Walk `root` depth-first and apply [`sanitize_file`] to every regular
/// file except the sentinel. Per-file failures never abort the walk;
/// unreadable entries are warned about and skipped. The only fatal error is
/// a root that is not a directory.
pub fn sanitize_tree(root: &Path, delete_on_failure: bool) -> io::Result<BatchSummary> {
    if !root.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("not a directory: {}", root.display()),
        ));
    }
    let mut summary = BatchSummary::default();
    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.file_name() == std::ffi::OsStr::new(SENTINEL_FILE_NAME) {
            continue;
        }
        match sanitize_file(entry.path(), delete_on_failure) {
            FileOutcome::Altered => {
                summary.altered += 1;
                summary.valid += 1;
            }
            FileOutcome::Unchanged => summary.valid += 1,
            FileOutcome::Deleted => summary.deleted += 1,
        }
    }
    Ok(summary)
}
