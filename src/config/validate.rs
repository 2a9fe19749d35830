//! Config validation logic.
//! Verifies the public root, normalizes the URL base, and checks the default directory.

use anyhow::{bail, Context, Result};
use std::fs;
use tracing::{debug, error, info};

use crate::placer::TargetDir;

use super::paths::expand_home;
use super::types::Config;

impl Config {
    /// Validate the settings without touching them.
    pub fn validate(&self) -> Result<()> {
        let root = &self.public_root;
        if !root.is_absolute() {
            error!("public_root is not absolute: {}", root.display());
            bail!("public_root must be an absolute path: {}", root.display());
        }
        let meta = fs::metadata(root).with_context(|| {
            format!("public_root '{}' does not exist or is unreadable", root.display())
        })?;
        if !meta.is_dir() {
            error!("public_root is not a directory: {}", root.display());
            bail!("public_root is not a directory: {}", root.display());
        }

        let base = self.url_base.trim();
        if base.is_empty() {
            bail!("url_base is empty; set it in the config file or pass --url-base");
        }
        if !base.contains("://") {
            bail!("url_base '{}' is not an absolute URL (missing scheme)", base);
        }
        if !base.is_ascii() {
            bail!("url_base '{}' must be plain ASCII (percent-encode it first)", base);
        }

        TargetDir::parse(&self.default_dir)
            .with_context(|| format!("default_dir '{}' is invalid", self.default_dir))?;

        debug!(root = %root.display(), url_base = base, "Config values valid");
        Ok(())
    }
}

/// Expand `~/`, validate, then canonicalize the public root and give the URL base
/// exactly one trailing slash. Call once at startup; both values stay fixed afterwards.
pub fn validate_and_normalize(cfg: &mut Config) -> Result<()> {
    cfg.public_root = expand_home(&cfg.public_root);
    cfg.space_root = expand_home(&cfg.space_root);
    cfg.validate()?;

    cfg.public_root = dunce::canonicalize(&cfg.public_root)
        .with_context(|| format!("canonicalize public_root '{}'", cfg.public_root.display()))?;
    cfg.url_base = format!("{}/", cfg.url_base.trim().trim_end_matches('/'));

    info!(
        "Config validated: public_root='{}' url_base='{}' log_file='{}'",
        cfg.public_root.display(),
        cfg.url_base,
        cfg.log_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<none>".into())
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn normalizes_trailing_slashes_and_canonicalizes_root() {
        let td = tempdir().unwrap();
        let mut cfg = Config::new(td.path(), "http://example.com/pub//");
        validate_and_normalize(&mut cfg).unwrap();
        assert_eq!(cfg.url_base, "http://example.com/pub/");
        assert_eq!(cfg.public_root, dunce::canonicalize(td.path()).unwrap());

        let mut cfg = Config::new(td.path(), "http://example.com/pub");
        validate_and_normalize(&mut cfg).unwrap();
        assert_eq!(cfg.url_base, "http://example.com/pub/");
    }

    #[test]
    fn missing_root_is_rejected() {
        let td = tempdir().unwrap();
        let mut cfg = Config::new(td.path().join("nope"), "http://example.com/");
        assert!(validate_and_normalize(&mut cfg).is_err());
    }

    #[test]
    fn file_as_root_is_rejected() {
        let td = tempdir().unwrap();
        let f = td.path().join("file");
        fs::write(&f, b"x").unwrap();
        let cfg = Config::new(&f, "http://example.com/");
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn url_without_scheme_is_rejected() {
        let td = tempdir().unwrap();
        let cfg = Config::new(td.path(), "example.com/pub/");
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("missing scheme"), "{err}");
    }

    #[test]
    fn escaping_default_dir_is_rejected() {
        let td = tempdir().unwrap();
        let mut cfg = Config::new(td.path(), "http://example.com/");
        cfg.default_dir = "../outside".into();
        assert!(cfg.validate().is_err());
    }
}
