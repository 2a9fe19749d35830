//! File placement: put files under the public root and derive their URLs.

mod batch;
mod copy;
mod helpers;
mod place;
mod target;
mod url;

pub use batch::{place_all, place_all_with, urls, Outcome};
pub use copy::copy_replace;
pub use place::Placement;
pub use target::TargetDir;
pub use url::encode_segment;

use std::path::{Component, Path, PathBuf};

use crate::config::Config;

/// Places files under a fixed public root and maps them to URLs under a fixed base.
///
/// `root` is expected to be canonical (see `config::validate_and_normalize`);
/// both values are fixed for the lifetime of the placer.
#[derive(Debug, Clone)]
pub struct Placer {
    root: PathBuf,
    url_base: String,
    case_insensitive: bool,
}

impl Placer {
    /// New placer with the case-insensitive root check enabled.
    /// `url_base` gets exactly one trailing slash.
    pub fn new(root: impl Into<PathBuf>, url_base: impl AsRef<str>) -> Self {
        Self {
            root: root.into(),
            url_base: format!("{}/", url_base.as_ref().trim_end_matches('/')),
            case_insensitive: true,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(&cfg.public_root, &cfg.url_base).case_insensitive(cfg.case_insensitive_root)
    }

    /// Toggle the ASCII-case-insensitive root comparison.
    pub fn case_insensitive(mut self, enabled: bool) -> Self {
        self.case_insensitive = enabled;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn url_base(&self) -> &str {
        &self.url_base
    }

    /// True if `path` (absolute, symlink-resolved) lies strictly below the root.
    ///
    /// Components are compared ignoring ASCII case when enabled. This only
    /// papers over filesystems whose resolved paths come back with a
    /// different case than the configured root; it is not Unicode case folding.
    pub fn is_inside_root(&self, path: &Path) -> bool {
        if !path.is_absolute() {
            return false;
        }
        let mut root = self.root.components();
        let mut candidate = path.components();
        loop {
            match (root.next(), candidate.next()) {
                (None, Some(_)) => return true,
                (None, None) | (Some(_), None) => return false,
                (Some(r), Some(c)) => {
                    if !self.same_component(r, c) {
                        return false;
                    }
                }
            }
        }
    }

    fn same_component(&self, a: Component<'_>, b: Component<'_>) -> bool {
        if self.case_insensitive {
            a.as_os_str()
                .as_encoded_bytes()
                .eq_ignore_ascii_case(b.as_os_str().as_encoded_bytes())
        } else {
            a == b
        }
    }
}
