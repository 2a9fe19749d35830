//! Config module.
//! Provides configuration types, default paths, XML loading, and validation.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{default_config_path, default_log_path, expand_home, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use validate::validate_and_normalize;
pub use xml::{create_template_config, load_config_from_xml_path, load_or_init, LoadResult};

/// Defaults shared across submodules. `~/` is expanded against the home directory.
pub const PUBLIC_ROOT_DEFAULT: &str = "~/Dropbox/Public";
pub const SPACE_ROOT_DEFAULT: &str = "~/Dropbox";
pub const URL_BASE_DEFAULT: &str = "https://example.com/public/";
pub const DEFAULT_DIR: &str = "t";

/// Environment variable naming an explicit config file (or a directory holding `config.xml`).
pub const CONFIG_ENV: &str = "PUBLINK_CONFIG";
