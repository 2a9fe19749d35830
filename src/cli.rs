//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - `-d` is the target directory; debug logging is the long-only `--debug`.
//! - `--space` replaces placement entirely and takes no file arguments.

use clap::{CommandFactory, Parser, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};
use crate::errors::PublinkError;
use crate::placer::TargetDir;

/// Message printed when neither files nor `--space` were given.
pub const NO_FILES_MESSAGE: &str = "Specify some files, please.";

/// Copy files into the public sync folder and print their URLs.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Copy files into a synced public folder and print their public URLs"
)]
pub struct Args {
    /// Files to publish.
    #[arg(value_name = "FILES", value_hint = ValueHint::FilePath)]
    pub files: Vec<PathBuf>,

    /// Delete each source after it was copied (no effect for files already published).
    #[arg(short = 'm', long = "move", help = "Delete the source file after a successful copy")]
    pub move_files: bool,

    /// Subdirectory of the public root for new files (defaults to config `default_dir`).
    #[arg(
        short = 'd',
        long = "dir",
        value_name = "SUBDIR",
        help = "Subdirectory of the public root to copy into"
    )]
    pub dir: Option<String>,

    /// Report disk usage of the space root instead of placing files.
    #[arg(
        short = 's',
        long,
        conflicts_with = "files",
        help = "Print per-directory disk usage of the sync folder and exit"
    )]
    pub space: bool,

    /// Override the public root (normally configured via XML).
    #[arg(long, value_hint = ValueHint::DirPath, help = "Override the public root directory")]
    pub public_root: Option<PathBuf>,

    /// Override the public URL base (normally configured via XML).
    #[arg(long, value_name = "URL", help = "Override the public URL base")]
    pub url_base: Option<String>,

    /// Override the directory measured by --space.
    #[arg(long, value_hint = ValueHint::DirPath, help = "Override the directory measured by --space")]
    pub space_root: Option<PathBuf>,

    /// Do not touch the system clipboard.
    #[arg(long, help = "Do not copy the URLs to the clipboard")]
    pub no_clipboard: bool,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(long, help = "Enable debug logging (shorthand for --log-level debug)")]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Print where publink will look for the config file (or PUBLINK_CONFIG if set), then exit.
    #[arg(long, help = "Print the config file location used by publink and exit")]
    pub print_config: bool,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Both values needed to work without a config file were given on the command line.
    pub fn has_required_overrides(&self) -> bool {
        self.public_root.is_some() && self.url_base.is_some()
    }

    /// No files and no `--space`: nothing to do.
    pub fn is_missing_work(&self) -> bool {
        self.files.is_empty() && !self.space
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(root) = &self.public_root {
            cfg.public_root = root.clone();
        }
        if let Some(base) = &self.url_base {
            cfg.url_base = base.clone();
        }
        if let Some(root) = &self.space_root {
            cfg.space_root = root.clone();
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if self.no_clipboard {
            cfg.clipboard = false;
        }
    }

    /// Target subdirectory: `--dir` if given, else the configured default.
    pub fn target_dir(&self, cfg: &Config) -> Result<TargetDir, PublinkError> {
        TargetDir::parse(self.dir.as_deref().unwrap_or(&cfg.default_dir))
    }
}

/// Render the long help text (used for the usage error).
pub fn help_text() -> String {
    Args::command().render_help().to_string()
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn short_flags_map_to_move_dir_space() {
        let a = args(&["publink", "-m", "-d", "pics", "a.png", "b.png"]);
        assert!(a.move_files);
        assert_eq!(a.dir.as_deref(), Some("pics"));
        assert_eq!(a.files, vec![PathBuf::from("a.png"), PathBuf::from("b.png")]);

        let a = args(&["publink", "-s"]);
        assert!(a.space);
        assert!(!a.is_missing_work());
    }

    #[test]
    fn space_with_files_is_rejected() {
        assert!(Args::try_parse_from(["publink", "-s", "a.txt"]).is_err());
    }

    #[test]
    fn no_files_means_missing_work() {
        assert!(args(&["publink"]).is_missing_work());
    }

    #[test]
    fn debug_wins_over_log_level() {
        let a = args(&["publink", "--debug", "--log-level", "quiet", "x"]);
        assert_eq!(a.effective_log_level(), Some(LogLevel::Debug));
        let a = args(&["publink", "--log-level", "info", "x"]);
        assert_eq!(a.effective_log_level(), Some(LogLevel::Info));
    }

    #[test]
    fn overrides_replace_config_values() {
        let mut cfg = Config::new("/srv/pub", "http://a.example/");
        let a = args(&[
            "publink",
            "--public-root",
            "/other",
            "--url-base",
            "http://b.example/",
            "--no-clipboard",
            "x",
        ]);
        a.apply_overrides(&mut cfg);
        assert_eq!(cfg.public_root, PathBuf::from("/other"));
        assert_eq!(cfg.url_base, "http://b.example/");
        assert!(!cfg.clipboard);
        assert!(a.has_required_overrides());
    }

    #[test]
    fn dir_flag_overrides_default_dir() {
        let cfg = Config::new("/srv/pub", "http://a.example/");
        let a = args(&["publink", "x"]);
        assert_eq!(a.target_dir(&cfg).unwrap().as_path(), std::path::Path::new("t"));
        let a = args(&["publink", "-d", "../up", "x"]);
        assert!(matches!(a.target_dir(&cfg), Err(PublinkError::InvalidTargetDir(_))));
    }
}
