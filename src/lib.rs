//! Core library for `publink`.
//!
//! Copies files into a synced public folder and derives their public URLs.
//! The [`Placer`] holds the root check, URL derivation, copy and move logic;
//! the remaining modules carry configuration, the disk-usage report, clipboard
//! access and small platform helpers used by the binary.

pub mod cli;
pub mod clipboard;
pub mod config;
pub mod errors;
pub mod output;
pub mod placer;
pub mod platform;
pub mod shutdown;
pub mod space;

pub use clipboard::{ClipboardError, ClipboardSink, SystemClipboard};
pub use config::{
    default_config_path, default_log_path, load_config_from_xml_path, path_has_symlink_ancestor,
    validate_and_normalize, Config, LogLevel,
};
pub use errors::PublinkError;
pub use placer::{place_all, place_all_with, urls, Outcome, Placement, Placer, TargetDir};
pub use space::{directory_usage, SpaceReport};
