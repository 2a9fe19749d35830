//! Copy-and-replace helper:
//! - Streams src into a unique temp file in the destination directory
//! - Flushes and fsyncs the temp file
//! - Renames temp -> dest, replacing any existing file (last write wins)
//! - Fsyncs the destination directory (Unix)
//!
//! The destination is never observed half-written, and the source is only read.

use anyhow::{anyhow, Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use super::helpers::io_error_with_help;

/// Hidden temp name inside `dest_dir`: `.publink.<pid>.<nanos>.tmp`.
pub(crate) fn unique_temp_path(dest_dir: &Path) -> PathBuf {
    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    dest_dir.join(format!(".publink.{}.{}.tmp", pid, nanos))
}

/// Copy an open source into `dst`, which must not exist yet. Returns bytes written.
/// std::io::copy uses the kernel fast path (copy_file_range/sendfile) when it can.
fn copy_streaming(mut src_f: File, dst: &Path) -> io::Result<u64> {
    let mut dst_f = OpenOptions::new().write(true).create_new(true).open(dst)?;
    let bytes = io::copy(&mut src_f, &mut dst_f)?;
    dst_f.flush()?;
    dst_f.sync_all()?;
    Ok(bytes)
}

/// Rename `tmp` over `dest`. Windows rename does not overwrite, so clear the way first.
fn replace_with(tmp: &Path, dest: &Path) -> Result<()> {
    #[cfg(windows)]
    {
        if dest.exists() {
            if let Err(e) = fs::remove_file(dest) {
                if e.kind() != io::ErrorKind::NotFound {
                    return Err(e).with_context(|| {
                        format!("remove existing destination before rename: {}", dest.display())
                    });
                }
            }
        }
    }

    fs::rename(tmp, dest)
        .with_context(|| format!("rename '{}' -> '{}'", tmp.display(), dest.display()))?;

    #[cfg(unix)]
    if let Some(parent) = dest.parent() {
        // Ignore fsync errors to avoid turning a successful rename into a failure.
        let _ = File::open(parent).and_then(|d| d.sync_all());
    }

    Ok(())
}

/// Copy `src` to `dest`, replacing `dest` if it exists. Creates the destination directory.
pub fn copy_replace(src: &Path, dest: &Path) -> Result<u64> {
    let dest_dir = dest
        .parent()
        .ok_or_else(|| anyhow!("destination has no parent: {}", dest.display()))?;

    fs::create_dir_all(dest_dir)
        .map_err(io_error_with_help("create destination directory", dest_dir))?;

    let src_f = File::open(src).map_err(io_error_with_help("open source", src))?;
    let tmp_path = unique_temp_path(dest_dir);

    let bytes = match copy_streaming(src_f, &tmp_path) {
        Ok(n) => n,
        Err(e) => {
            let _ = fs::remove_file(&tmp_path);
            return Err(io_error_with_help("copy to temporary file", &tmp_path)(e));
        }
    };

    if let Err(e) = replace_with(&tmp_path, dest) {
        // Best-effort cleanup of the temp file on failure.
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn leftover_temps(dir: &Path) -> Vec<String> {
        fs::read_dir(dir)
            .unwrap()
            .flatten()
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|n| n.starts_with(".publink.") && n.ends_with(".tmp"))
            .collect()
    }

    #[test]
    fn copies_bytes_and_keeps_source() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src.bin");
        let dst = dir.path().join("out").join("nested").join("dst.bin");
        let data: Vec<u8> = (0..300_000u32).map(|i| (i % 251) as u8).collect();
        fs::write(&src, &data).unwrap();

        let n = copy_replace(&src, &dst).unwrap();
        assert_eq!(n, data.len() as u64);
        assert_eq!(fs::read(&dst).unwrap(), data);
        assert_eq!(fs::read(&src).unwrap(), data, "source must be untouched");
        assert!(leftover_temps(dst.parent().unwrap()).is_empty());
    }

    #[test]
    fn zero_length_file() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("empty");
        let dst = dir.path().join("copy");
        File::create(&src).unwrap();
        assert_eq!(copy_replace(&src, &dst).unwrap(), 0);
        assert_eq!(fs::metadata(&dst).unwrap().len(), 0);
    }

    #[test]
    fn existing_destination_is_replaced() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("new.txt");
        let dst = dir.path().join("dst.txt");
        fs::write(&src, b"second").unwrap();
        fs::write(&dst, b"first version, longer").unwrap();

        copy_replace(&src, &dst).unwrap();
        assert_eq!(fs::read(&dst).unwrap(), b"second");
    }

    #[test]
    fn missing_source_fails_without_temp_leftovers() {
        let dir = tempdir().unwrap();
        let dst = dir.path().join("dst.txt");
        let err = copy_replace(&dir.path().join("missing"), &dst).unwrap_err();
        assert!(err.to_string().contains("open source"), "{err}");
        assert!(!dst.exists());
        assert!(leftover_temps(dir.path()).is_empty());
    }

    #[test]
    fn directory_in_the_way_fails_and_cleans_up() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src.txt");
        fs::write(&src, b"data").unwrap();
        let dst = dir.path().join("occupied");
        fs::create_dir(&dst).unwrap();
        fs::write(dst.join("keep"), b"k").unwrap();

        assert!(copy_replace(&src, &dst).is_err());
        assert!(dst.join("keep").exists());
        assert!(leftover_temps(dir.path()).is_empty());
    }
}
