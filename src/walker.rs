//! Input file discovery
//!
//! Lists a directory for `.fit` files (case-insensitive extension match) in
//! lexicographic name order. In recursive mode, immediate subdirectories are
//! descended exactly one level, also in sorted order, so a batch always visits
//! files in the same deterministic sequence.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConvertError;

/// Discover FIT files under `root`.
///
/// `recursive` enables the one-level descent into immediate subdirectories;
/// deeper nesting is never visited.
pub fn discover(root: &Path, recursive: bool) -> Result<Vec<PathBuf>, ConvertError> {
    let mut files = Vec::new();

    for path in sorted_entries(root)? {
        if path.is_file() {
            if has_fit_extension(&path) {
                files.push(path);
            }
        } else if recursive && path.is_dir() {
            for sub in sorted_entries(&path)? {
                if sub.is_file() && has_fit_extension(&sub) {
                    files.push(sub);
                }
            }
        }
    }

    Ok(files)
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, ConvertError> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()?;
    entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(entries)
}

fn has_fit_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("fit"))
        .unwrap_or(false)
}
