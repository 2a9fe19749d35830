//! Validated subdirectory of the public root.

use std::fmt;
use std::path::{Component, Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

use crate::errors::PublinkError;

/// Relative directory under the public root where new files are placed.
///
/// The name is normalized to NFC so that "e\u{301}" and "é" name the same
/// directory. Absolute paths and `..` are rejected; `.` segments are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetDir(PathBuf);

impl TargetDir {
    pub fn parse(raw: &str) -> Result<Self, PublinkError> {
        let normalized: String = raw.trim().nfc().collect();
        let mut rel = PathBuf::new();
        for comp in Path::new(&normalized).components() {
            match comp {
                Component::Normal(seg) => rel.push(seg),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(PublinkError::InvalidTargetDir(raw.to_string()));
                }
            }
        }
        Ok(Self(rel))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// True when files go straight into the public root.
    pub fn is_root(&self) -> bool {
        self.0.as_os_str().is_empty()
    }
}

impl fmt::Display for TargetDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}
