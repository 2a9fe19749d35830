//! Typed error definitions for publink.
//! Provides a small set of well-known failure modes for better logs and tests.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PublinkError {
    #[error("Error, invalid file {0}: not found")]
    SourceNotFound(PathBuf),

    #[error("Error, invalid file {0}: not a regular file")]
    NotAFile(PathBuf),

    #[error("Resolved path {0} is outside the public root")]
    OutsideRoot(PathBuf),

    #[error("Copy failed for {path}: {context}")]
    CopyFailed { path: PathBuf, context: String },

    #[error("Could not remove source {path} after copy: {context}")]
    RemoveFailed { path: PathBuf, context: String },

    #[error("Insufficient disk space for destination {dest}: need {required} bytes, have {available} bytes")]
    InsufficientSpace {
        required: u64,
        available: u64,
        dest: PathBuf,
    },

    #[error("Invalid target directory '{0}': must be a relative path without '..'")]
    InvalidTargetDir(String),

    #[error("{0}")]
    Usage(String),

    #[error("Skipped: operation interrupted by user")]
    Interrupted,
}

impl PublinkError {
    /// Short stable identifier used as a structured log field.
    pub fn code(&self) -> &'static str {
        match self {
            PublinkError::SourceNotFound(_) => "source_not_found",
            PublinkError::NotAFile(_) => "not_a_file",
            PublinkError::OutsideRoot(_) => "outside_root",
            PublinkError::CopyFailed { .. } => "copy_failed",
            PublinkError::RemoveFailed { .. } => "remove_failed",
            PublinkError::InsufficientSpace { .. } => "insufficient_space",
            PublinkError::InvalidTargetDir(_) => "invalid_target_dir",
            PublinkError::Usage(_) => "usage",
            PublinkError::Interrupted => "interrupted",
        }
    }

    /// True for failures caused by the input argument itself rather than by I/O.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            PublinkError::SourceNotFound(_) | PublinkError::NotAFile(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_path() {
        let e = PublinkError::SourceNotFound(PathBuf::from("/tmp/missing.txt"));
        assert_eq!(e.to_string(), "Error, invalid file /tmp/missing.txt: not found");
        assert_eq!(e.code(), "source_not_found");
        assert!(e.is_invalid_input());
    }

    #[test]
    fn io_failures_are_not_invalid_input() {
        let e = PublinkError::CopyFailed {
            path: PathBuf::from("/x"),
            context: "disk full".into(),
        };
        assert!(!e.is_invalid_input());
        assert_eq!(e.code(), "copy_failed");
    }
}
