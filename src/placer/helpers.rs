//! I/O helper utilities.
//!
//! Enriches io::Error with the operation, the path, and a platform-aware hint:
//!   fs::create_dir_all(dir).map_err(io_error_with_help("create dir", dir))?;

use anyhow::anyhow;
use std::io;
use std::path::Path;

/// Format a human-friendly message with op/path plus platform-aware hints.
pub(crate) fn describe_io_error(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);

    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            match code {
                libc::EACCES | libc::EPERM => {
                    msg.push_str(" (permission denied; check ownership and write permissions)");
                }
                libc::ENOENT => msg.push_str(" (path not found; verify it exists)"),
                libc::ENOSPC => msg.push_str(" (insufficient space on device)"),
                libc::EDQUOT => msg.push_str(" (disk quota exceeded)"),
                libc::EROFS => msg.push_str(" (read-only filesystem; cannot write here)"),
                libc::EISDIR => msg.push_str(" (a directory is in the way)"),
                libc::ENOTDIR => msg.push_str(" (a file is in the way of a directory)"),
                libc::ELOOP => msg.push_str(" (too many symbolic link levels; possible symlink cycle)"),
                libc::ENAMETOOLONG => msg.push_str(" (filename or path too long)"),
                _ => {}
            }
        }
        #[cfg(windows)]
        {
            match code {
                5 => msg.push_str(" (access denied; check permissions)"),
                32 => msg.push_str(" (sharing violation; file is in use)"),
                2 | 3 => msg.push_str(" (path not found; verify it exists)"),
                112 => msg.push_str(" (insufficient disk space)"),
                19 => msg.push_str(" (write protected / read-only media)"),
                206 => msg.push_str(" (filename or path too long)"),
                _ => {}
            }
        }
        msg.push_str(&format!(" [os code: {}]", code));
    } else {
        match e.kind() {
            io::ErrorKind::PermissionDenied => {
                msg.push_str(" (permission denied; check ownership and write permissions)");
            }
            io::ErrorKind::NotFound => msg.push_str(" (path not found; verify it exists)"),
            _ => {}
        }
    }

    msg
}

/// Adapter for anyhow::Result code.
/// Returns a closure suitable for `.map_err(...)` that converts io::Error -> anyhow::Error.
pub(crate) fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!(describe_io_error(op, path, &e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_operation_and_path() {
        let e = io::Error::new(io::ErrorKind::NotFound, "gone");
        let msg = describe_io_error("open source", Path::new("/tmp/a.txt"), &e);
        assert!(msg.starts_with("open source '/tmp/a.txt': gone"), "{msg}");
        assert!(msg.contains("path not found"), "{msg}");
    }

    #[cfg(unix)]
    #[test]
    fn raw_os_code_gets_hint_and_code() {
        let e = io::Error::from_raw_os_error(libc::ENOSPC);
        let msg = describe_io_error("write", Path::new("/x"), &e);
        assert!(msg.contains("insufficient space"), "{msg}");
        assert!(msg.contains(&format!("[os code: {}]", libc::ENOSPC)), "{msg}");
    }
}
