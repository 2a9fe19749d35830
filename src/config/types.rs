//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::paths;
use super::{DEFAULT_DIR, PUBLIC_ROOT_DEFAULT, SPACE_ROOT_DEFAULT, URL_BASE_DEFAULT};

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration used by the placer and the space report.
#[derive(Debug, Clone)]
pub struct Config {
    /// Synced folder whose contents are reachable by URL
    pub public_root: PathBuf,
    /// URL prefix matching `public_root`
    pub url_base: String,
    /// Subdirectory of `public_root` for newly placed files
    pub default_dir: String,
    /// Directory walked by the space report
    pub space_root: PathBuf,
    /// Compare the root prefix ignoring ASCII case
    pub case_insensitive_root: bool,
    /// Put produced URLs on the system clipboard
    pub clipboard: bool,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            public_root: paths::expand_home(PUBLIC_ROOT_DEFAULT),
            url_base: URL_BASE_DEFAULT.to_string(),
            default_dir: DEFAULT_DIR.to_string(),
            space_root: paths::expand_home(SPACE_ROOT_DEFAULT),
            case_insensitive_root: true,
            clipboard: true,
            log_level: LogLevel::Normal,
            log_file: None,
        }
    }
}

impl Config {
    /// Construct a Config with an explicit root and URL base; other fields use defaults.
    pub fn new(public_root: impl Into<PathBuf>, url_base: impl Into<String>) -> Self {
        Self {
            public_root: public_root.into(),
            url_base: url_base.into(),
            ..Default::default()
        }
    }
}
