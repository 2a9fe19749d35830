//! Default path helpers and symlink checks.
//! Determines OS-appropriate config/log paths, expands `~/`, and detects symlinked ancestors.

use anyhow::{anyhow, Result};
use dirs::{config_dir, home_dir};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::CONFIG_ENV;

const APP_DIR: &str = "publink";
const CONFIG_FILE: &str = "config.xml";
const LOG_FILE: &str = "publink.log";

/// Config file location.
///
/// Precedence:
/// 1) `$PUBLINK_CONFIG`: a file path, or a directory that gets `config.xml` appended;
///    relative values are resolved against the current directory
/// 2) `<config_dir>/publink/config.xml`
/// 3) `$HOME/.config/publink/config.xml`
pub fn default_config_path() -> Result<PathBuf> {
    if let Some(raw) = env::var_os(CONFIG_ENV) {
        let mut p = PathBuf::from(raw);
        if p.is_relative() {
            p = env::current_dir()?.join(p);
        }
        if p.is_dir() {
            p.push(CONFIG_FILE);
        }
        return Ok(p);
    }
    if let Some(mut base) = config_dir() {
        base.push(APP_DIR);
        base.push(CONFIG_FILE);
        return Ok(base);
    }
    env::var("HOME")
        .map(|h| PathBuf::from(h).join(".config").join(APP_DIR).join(CONFIG_FILE))
        .map_err(|_| anyhow!("cannot determine a config directory (no config dir and no HOME)"))
}

/// Default log file path, colocated with the config file.
pub fn default_log_path() -> Result<PathBuf> {
    let cfg = default_config_path()?;
    let dir = cfg
        .parent()
        .ok_or_else(|| anyhow!("config path has no parent: {}", cfg.display()))?;
    Ok(dir.join(LOG_FILE))
}

/// Expand a leading `~` / `~/` against the user's home directory.
/// Other paths are returned unchanged.
pub fn expand_home(raw: impl AsRef<Path>) -> PathBuf {
    let raw = raw.as_ref();
    match raw.strip_prefix("~") {
        Ok(rest) => match home_dir() {
            Some(home) if rest.as_os_str().is_empty() => home,
            Some(home) => home.join(rest),
            None => raw.to_path_buf(),
        },
        Err(_) => raw.to_path_buf(),
    }
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_home_leaves_absolute_paths_alone() {
        assert_eq!(expand_home("/srv/public"), PathBuf::from("/srv/public"));
        assert_eq!(expand_home("relative/x"), PathBuf::from("relative/x"));
    }

    #[test]
    fn expand_home_replaces_tilde_prefix() {
        let Some(home) = home_dir() else {
            eprintln!("skipping: no home directory");
            return;
        };
        assert_eq!(expand_home("~/Dropbox/Public"), home.join("Dropbox").join("Public"));
        assert_eq!(expand_home("~"), home);
    }

    #[test]
    fn tilde_inside_a_name_is_not_expanded() {
        assert_eq!(expand_home("~backup/x"), PathBuf::from("~backup/x"));
    }

    #[test]
    fn symlink_ancestor_false_for_plain_tempdir() {
        let td = tempfile::tempdir().unwrap();
        let base = dunce::canonicalize(td.path()).unwrap();
        let p = base.join("a").join("b.txt");
        assert!(!path_has_symlink_ancestor(&p).unwrap());
    }
}
