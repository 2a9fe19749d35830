//! XML configuration support.
//! - Loads settings from config.xml (quick_xml).
//! - Creates a secure template if missing (unless PUBLINK_CONFIG is set).
//!
//! Notes:
//! - This module only reads/writes the config file; path validation happens elsewhere.
//! - Unknown XML fields are a hard error to surface misconfigurations early.

use anyhow::{bail, Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::paths::{default_config_path, default_log_path, expand_home, path_has_symlink_ancestor};
use super::{CONFIG_ENV, DEFAULT_DIR, PUBLIC_ROOT_DEFAULT, SPACE_ROOT_DEFAULT, URL_BASE_DEFAULT};

use crate::config::types::{Config, LogLevel};
use crate::platform::{set_dir_mode_0700, set_file_mode_0600, write_config_secure_new_0600};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    public_root: Option<String>,
    url_base: Option<String>,
    default_dir: Option<String>,
    space_root: Option<String>,
    #[serde(default, deserialize_with = "de_bool_trimmed_opt")]
    case_insensitive_root: Option<bool>,
    #[serde(default, deserialize_with = "de_bool_trimmed_opt")]
    clipboard: Option<bool>,
    log_level: Option<String>,
    log_file: Option<String>,
}

/// Outcome of looking for a config file at startup.
#[derive(Debug)]
pub enum LoadResult {
    /// A config file was found and parsed.
    Loaded(Config),
    /// No config file; built-in defaults apply.
    Defaults,
    /// No config file existed, so a template was written at this path.
    CreatedTemplate(PathBuf),
}

// Trims surrounding whitespace before parsing an optional bool
fn de_bool_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(Some(true)),
            "false" | "no" | "0" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!("invalid boolean: '{other}'"))),
        },
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

// Map XmlConfig -> Config, keeping defaults for absent fields
fn xml_to_config(parsed: XmlConfig) -> Config {
    let mut cfg = Config::default();

    if let Some(s) = non_empty(parsed.public_root.as_deref()) {
        cfg.public_root = expand_home(s);
    }
    if let Some(s) = non_empty(parsed.url_base.as_deref()) {
        cfg.url_base = s.to_string();
    }
    if let Some(s) = non_empty(parsed.default_dir.as_deref()) {
        cfg.default_dir = s.to_string();
    }
    if let Some(s) = non_empty(parsed.space_root.as_deref()) {
        cfg.space_root = expand_home(s);
    }
    if let Some(b) = parsed.case_insensitive_root {
        cfg.case_insensitive_root = b;
    }
    if let Some(b) = parsed.clipboard {
        cfg.clipboard = b;
    }
    if let Some(level) = non_empty(parsed.log_level.as_deref()).and_then(LogLevel::parse) {
        cfg.log_level = level;
    }
    if let Some(s) = non_empty(parsed.log_file.as_deref()) {
        cfg.log_file = Some(expand_home(s));
    }

    cfg
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    debug!(path = %path.display(), "Loaded config xml");
    Ok(xml_to_config(parsed))
}

/// Locate and load the config file.
///
/// - `$PUBLINK_CONFIG` set but missing: error.
/// - Default location missing: write a template when `create_template` is true,
///   otherwise fall back to defaults.
pub fn load_or_init(create_template: bool) -> Result<LoadResult> {
    let env_set = env::var_os(CONFIG_ENV).is_some();
    let cfg_path = default_config_path()?;

    if cfg_path.exists() {
        return load_config_from_xml_path(&cfg_path).map(LoadResult::Loaded);
    }
    if env_set {
        bail!(
            "{} points to '{}', which does not exist",
            CONFIG_ENV,
            cfg_path.display()
        );
    }
    if !create_template {
        return Ok(LoadResult::Defaults);
    }
    create_template_config(&cfg_path)?;
    Ok(LoadResult::CreatedTemplate(cfg_path))
}

/// Create default template config file and parent directory (best-effort permissions).
/// Uses secure creation to avoid following attacker-controlled symlinks on Unix.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        bail!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
        let _ = set_dir_mode_0700(parent);
    }

    let suggested_log = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "/path/to/publink.log".into());

    let content = format!(
        "<!--\n  publink configuration (XML)\n\n  Fields:\n    public_root            -> synced folder whose files are reachable by URL (~/ allowed)\n    url_base               -> public URL matching public_root (edit this!)\n    default_dir            -> subdirectory of public_root for new files (-d overrides)\n    space_root             -> folder measured by --space (~/ allowed)\n    case_insensitive_root  -> true/false; ignore ASCII case when checking if a file is already published\n    clipboard              -> true/false; copy produced URLs to the clipboard\n    log_level              -> quiet | normal | info | debug\n    log_file               -> path to log file (optional; leave empty to disable)\n\n  Notes:\n    - CLI flags override XML values.\n    - Example log file location: {}\n-->\n<config>\n  <public_root>{}</public_root>\n  <url_base>{}</url_base>\n  <default_dir>{}</default_dir>\n  <space_root>{}</space_root>\n  <case_insensitive_root>true</case_insensitive_root>\n  <clipboard>true</clipboard>\n  <log_level>normal</log_level>\n  <log_file></log_file>\n</config>\n",
        suggested_log, PUBLIC_ROOT_DEFAULT, URL_BASE_DEFAULT, DEFAULT_DIR, SPACE_ROOT_DEFAULT
    );

    // Atomic, secure write, then tighten perms.
    write_config_secure_new_0600(path, content.as_bytes())?;
    let _ = set_file_mode_0600(path);

    info!("Created template config at {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn template_parses_back_into_defaults() {
        let td = tempdir().unwrap();
        let base = dunce::canonicalize(td.path()).unwrap();
        let path = base.join("publink").join("config.xml");
        create_template_config(&path).unwrap();

        let cfg = load_config_from_xml_path(&path).unwrap();
        let defaults = Config::default();
        assert_eq!(cfg.public_root, defaults.public_root);
        assert_eq!(cfg.url_base, URL_BASE_DEFAULT);
        assert_eq!(cfg.default_dir, DEFAULT_DIR);
        assert!(cfg.case_insensitive_root);
        assert!(cfg.clipboard);
        assert_eq!(cfg.log_file, None, "empty log_file means no file logging");
    }

    #[test]
    fn booleans_accept_whitespace_and_words() {
        let td = tempdir().unwrap();
        let path = td.path().join("config.xml");
        fs::write(
            &path,
            "<config>\n  <case_insensitive_root> no </case_insensitive_root>\n  <clipboard>FALSE</clipboard>\n</config>",
        )
        .unwrap();
        let cfg = load_config_from_xml_path(&path).unwrap();
        assert!(!cfg.case_insensitive_root);
        assert!(!cfg.clipboard);
    }

    #[test]
    fn garbage_boolean_is_rejected() {
        let td = tempdir().unwrap();
        let path = td.path().join("config.xml");
        fs::write(&path, "<config><clipboard>maybe</clipboard></config>").unwrap();
        assert!(load_config_from_xml_path(&path).is_err());
    }
}
