//! Single-file placement.
//! - Already under the root: no copy, just the URL.
//! - Elsewhere: copy into root/<target>/<name>, optionally delete the source, then the URL.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::errors::PublinkError;
use crate::platform::free_space_bytes;

use super::copy::copy_replace;
use super::helpers::describe_io_error;
use super::{Placer, TargetDir};

/// Result of a successful placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Path as given by the caller
    pub source: PathBuf,
    /// Resolved path under the public root
    pub dest: PathBuf,
    /// Public URL of `dest`
    pub url: String,
    /// False when the source was already published
    pub copied: bool,
    /// True when the source was deleted after copying
    pub moved: bool,
}

impl Placer {
    /// Make sure `source` is published under the root and return its URL.
    ///
    /// With `move_source`, the original is deleted only after a completed copy;
    /// files already inside the root are never deleted or duplicated.
    pub fn place(
        &self,
        source: &Path,
        target: &TargetDir,
        move_source: bool,
    ) -> Result<Placement, PublinkError> {
        let meta = fs::metadata(source).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => PublinkError::SourceNotFound(source.to_path_buf()),
            _ => PublinkError::CopyFailed {
                path: source.to_path_buf(),
                context: describe_io_error("stat source", source, &e),
            },
        })?;
        if !meta.is_file() {
            return Err(PublinkError::NotAFile(source.to_path_buf()));
        }

        let resolved = dunce::canonicalize(source).map_err(|e| PublinkError::CopyFailed {
            path: source.to_path_buf(),
            context: describe_io_error("resolve source", source, &e),
        })?;

        if self.is_inside_root(&resolved) {
            debug!(path = %resolved.display(), "Already inside public root; not copying");
            let url = self.to_public_url(&resolved);
            return Ok(Placement {
                source: source.to_path_buf(),
                dest: resolved,
                url,
                copied: false,
                moved: false,
            });
        }

        let file_name = resolved
            .file_name()
            .ok_or_else(|| PublinkError::NotAFile(source.to_path_buf()))?;

        let dest = self.destination_in(target, file_name)?;
        self.ensure_space(&dest, meta.len())?;

        let bytes = copy_replace(&resolved, &dest).map_err(|e| PublinkError::CopyFailed {
            path: resolved.clone(),
            context: format!("{e:#}"),
        })?;
        debug!(src = %resolved.display(), dest = %dest.display(), bytes, "Copied into public root");

        let moved = if move_source {
            fs::remove_file(&resolved).map_err(|e| PublinkError::RemoveFailed {
                path: resolved.clone(),
                context: describe_io_error("remove original file", &resolved, &e),
            })?;
            true
        } else {
            false
        };

        let url = self.to_public_url(&dest);
        info!(src = %resolved.display(), dest = %dest.display(), moved, %url, "Placed file");
        Ok(Placement {
            source: source.to_path_buf(),
            dest,
            url,
            copied: true,
            moved,
        })
    }

    /// Create root/<target> and return the resolved destination for `file_name`.
    /// A target that resolves outside the root (through a symlink) is refused.
    fn destination_in(
        &self,
        target: &TargetDir,
        file_name: &std::ffi::OsStr,
    ) -> Result<PathBuf, PublinkError> {
        let dir = self.root().join(target.as_path());
        let copy_failed = |op: &str, e: io::Error| PublinkError::CopyFailed {
            path: dir.clone(),
            context: describe_io_error(op, &dir, &e),
        };
        fs::create_dir_all(&dir).map_err(|e| copy_failed("create destination directory", e))?;
        let real_dir =
            dunce::canonicalize(&dir).map_err(|e| copy_failed("resolve destination directory", e))?;

        let dest = real_dir.join(file_name);
        if !self.is_inside_root(&dest) {
            return Err(PublinkError::OutsideRoot(real_dir));
        }
        Ok(dest)
    }

    /// Refuse a copy that cannot fit; skipped when free space is unknown.
    fn ensure_space(&self, dest: &Path, required: u64) -> Result<(), PublinkError> {
        let Some(dir) = dest.parent() else {
            return Ok(());
        };
        match free_space_bytes(dir) {
            Ok(available) if available < required => Err(PublinkError::InsufficientSpace {
                required,
                available,
                dest: dest.to_path_buf(),
            }),
            Ok(_) => Ok(()),
            Err(e) => {
                debug!(dir = %dir.display(), error = %e, "Free space unknown; skipping check");
                Ok(())
            }
        }
    }
}
