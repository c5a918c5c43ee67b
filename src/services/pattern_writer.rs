//! Writing rendered documents to disk.
//!
//! Every file is written to a hidden temporary sibling first and renamed into
//! place, so an interrupted run leaves either the old file or the complete new
//! one, never a truncated document. A batch stages all of its temporary files
//! before the first rename, so a failed write leaves no new document behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// A finished document waiting to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub file_name: String,
    pub contents: String,
}

impl RenderedFile {
    pub fn new(file_name: impl Into<String>, contents: String) -> Self {
        Self {
            file_name: file_name.into(),
            contents,
        }
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.tmp"))
}

/// Replace `path` with `contents` via a temporary sibling and a rename.
pub fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp = temp_path(path);
    if let Err(e) = fs::write(&tmp, contents).and_then(|_| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    Ok(())
}

fn discard(paths: &[PathBuf]) {
    for path in paths {
        let _ = fs::remove_file(path);
    }
}

/// Write all documents into `dir`, creating it if needed.
///
/// Existing files are overwritten. Returns the written paths in input order.
pub fn write_all(dir: &Path, files: &[RenderedFile]) -> Result<Vec<PathBuf>, AppError> {
    fs::create_dir_all(dir)?;

    let targets: Vec<PathBuf> = files.iter().map(|f| dir.join(&f.file_name)).collect();

    let mut staged = Vec::with_capacity(files.len());
    for (file, target) in files.iter().zip(&targets) {
        let tmp = temp_path(target);
        if let Err(e) = fs::write(&tmp, &file.contents) {
            staged.push(tmp);
            discard(&staged);
            return Err(e.into());
        }
        staged.push(tmp);
    }

    for (idx, (tmp, target)) in staged.iter().zip(&targets).enumerate() {
        if let Err(e) = fs::rename(tmp, target) {
            discard(&staged[idx..]);
            return Err(e.into());
        }
        tracing::info!(
            path = %target.display(),
            bytes = files[idx].contents.len(),
            "Wrote document"
        );
    }
    Ok(targets)
}
