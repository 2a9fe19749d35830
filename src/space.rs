//! Disk usage report for the sync folder.
//! Sums regular-file sizes per directory, smallest first, plus a grand total.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

const MB: f64 = 1024.0 * 1024.0;
const GB: f64 = MB * 1024.0;

/// Bytes held by files directly inside one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirUsage {
    pub path: PathBuf,
    pub bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceReport {
    /// Sorted ascending by size, then by path
    pub entries: Vec<DirUsage>,
    pub total: u64,
}

/// Walk `root` (following symlinks) and total file sizes per directory.
/// Unreadable entries are skipped.
pub fn directory_usage(root: &Path) -> io::Result<SpaceReport> {
    if !root.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("space root is not a directory: {}", root.display()),
        ));
    }

    let mut per_dir: BTreeMap<PathBuf, u64> = BTreeMap::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                debug!(error = %e, "Skipping unreadable entry");
                continue;
            }
        };
        if entry.file_type().is_dir() {
            per_dir.entry(entry.into_path()).or_insert(0);
            continue;
        }
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(parent) = entry.path().parent() else {
            continue;
        };
        match entry.metadata() {
            Ok(meta) => *per_dir.entry(parent.to_path_buf()).or_insert(0) += meta.len(),
            Err(e) => debug!(path = %entry.path().display(), error = %e, "Skipping file without metadata"),
        }
    }

    let total = per_dir.values().sum();
    let mut entries: Vec<DirUsage> = per_dir
        .into_iter()
        .map(|(path, bytes)| DirUsage { path, bytes })
        .collect();
    entries.sort_by(|a, b| a.bytes.cmp(&b.bytes).then_with(|| a.path.cmp(&b.path)));

    Ok(SpaceReport { entries, total })
}

impl SpaceReport {
    /// Printable lines: one per directory, then the total.
    pub fn render(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .entries
            .iter()
            .map(|e| format!("'{}' consumes {:.3} MB", e.path.display(), e.bytes as f64 / MB))
            .collect();
        lines.push(format!("Total {:.3} GB", self.total as f64 / GB));
        lines
    }
}
