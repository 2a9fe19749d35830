//! Clipboard support.
//! Pipes text into whatever OS clipboard utility is installed.
//!
//! - macOS: `pbcopy`
//! - Linux: `wl-copy` (Wayland sessions), `xclip`, `xsel`
//! - Windows: `clip`
//!
//! Tools are tried in order; a tool that is not installed is skipped.

use std::io::{self, Write};
use std::process::{Command, Stdio};
use tracing::debug;

/// Errors that can occur while setting the clipboard.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("No clipboard tool available. On Linux, install xclip, xsel, or wl-copy.")]
    NoToolAvailable,

    #[error("Clipboard tool {tool} failed: {message}")]
    Failed { tool: &'static str, message: String },
}

/// Capability: replace the system clipboard contents with `text`.
pub trait ClipboardSink {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// An external program that reads clipboard text on stdin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipboardTool {
    pub program: &'static str,
    pub args: &'static [&'static str],
}

const PBCOPY: ClipboardTool = ClipboardTool { program: "pbcopy", args: &[] };
const WL_COPY: ClipboardTool = ClipboardTool { program: "wl-copy", args: &[] };
const XCLIP: ClipboardTool = ClipboardTool { program: "xclip", args: &["-selection", "clipboard"] };
const XSEL: ClipboardTool = ClipboardTool { program: "xsel", args: &["--clipboard", "--input"] };
const CLIP: ClipboardTool = ClipboardTool { program: "clip", args: &[] };

/// Tools worth trying on this platform, in priority order.
pub fn platform_tools() -> Vec<ClipboardTool> {
    if cfg!(target_os = "macos") {
        vec![PBCOPY]
    } else if cfg!(windows) {
        vec![CLIP]
    } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
        vec![WL_COPY, XCLIP, XSEL]
    } else {
        vec![XCLIP, XSEL, WL_COPY]
    }
}

/// Clipboard backed by OS command-line utilities.
pub struct SystemClipboard {
    tools: Vec<ClipboardTool>,
}

impl SystemClipboard {
    /// Create with platform-appropriate tools.
    pub fn new() -> Self {
        Self {
            tools: platform_tools(),
        }
    }

    /// Create with specific tools (for testing).
    pub fn with_tools(tools: Vec<ClipboardTool>) -> Self {
        Self { tools }
    }

    fn run(tool: &ClipboardTool, text: &str) -> io::Result<bool> {
        let mut child = Command::new(tool.program)
            .args(tool.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes())?;
        }

        Ok(child.wait()?.success())
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut last_error: Option<ClipboardError> = None;
        for tool in &self.tools {
            match Self::run(tool, text) {
                Ok(true) => {
                    debug!(tool = tool.program, bytes = text.len(), "Clipboard updated");
                    return Ok(());
                }
                Ok(false) => {
                    last_error = Some(ClipboardError::Failed {
                        tool: tool.program,
                        message: "exited with error".into(),
                    });
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    debug!(tool = tool.program, "Clipboard tool not installed");
                }
                Err(e) => {
                    last_error = Some(ClipboardError::Failed {
                        tool: tool.program,
                        message: e.to_string(),
                    });
                }
            }
        }
        Err(last_error.unwrap_or(ClipboardError::NoToolAvailable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tools_report_no_tool_available() {
        let cb = SystemClipboard::with_tools(vec![ClipboardTool {
            program: "publink-definitely-not-a-real-clipboard-tool",
            args: &[],
        }]);
        let err = cb.set_text("hello").unwrap_err();
        assert!(matches!(err, ClipboardError::NoToolAvailable), "{err}");
    }

    #[cfg(unix)]
    #[test]
    fn failing_tool_is_reported_by_name() {
        let cb = SystemClipboard::with_tools(vec![ClipboardTool {
            program: "false",
            args: &[],
        }]);
        match cb.set_text("hello") {
            Err(ClipboardError::Failed { tool, .. }) => assert_eq!(tool, "false"),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn first_working_tool_wins() {
        let cb = SystemClipboard::with_tools(vec![
            ClipboardTool { program: "publink-missing-tool", args: &[] },
            ClipboardTool { program: "cat", args: &[] },
        ]);
        cb.set_text("http://example.com/a\nhttp://example.com/b").unwrap();
    }

    #[test]
    fn platform_list_is_never_empty() {
        assert!(!platform_tools().is_empty());
    }
}
