//! Clipboard access for copying account addresses.
//!
//! On Linux, external tools (`wl-copy`, `xclip`, `xsel`) are tried first so
//! the copied address outlives the process; everything else goes through
//! `arboard`.

use thiserror::Error;

/// Error type for clipboard operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClipboardError {
    /// No clipboard backend is reachable.
    #[error("Clipboard not available")]
    NotAvailable,
    /// The backend rejected the text.
    #[error("Failed to copy: {0}")]
    CopyFailed(String),
}

/// Copies `text` to the system clipboard.
///
/// # Errors
///
/// Returns an error if no backend is available or the copy fails.
pub fn copy_text(text: &str) -> Result<(), ClipboardError> {
    #[cfg(target_os = "linux")]
    if copy_with_external_tool(text) {
        return Ok(());
    }

    let mut clipboard = arboard::Clipboard::new().map_err(|_| ClipboardError::NotAvailable)?;
    clipboard
        .set_text(text.to_string())
        .map_err(|e| ClipboardError::CopyFailed(e.to_string()))
}

#[cfg(target_os = "linux")]
fn copy_with_external_tool(text: &str) -> bool {
    const TOOLS: [(&str, &[&str]); 3] = [
        ("wl-copy", &[]),
        ("xclip", &["-selection", "clipboard"]),
        ("xsel", &["--clipboard", "--input"]),
    ];
    TOOLS
        .iter()
        .any(|(tool, args)| try_tool(tool, args, text))
}

#[cfg(target_os = "linux")]
fn try_tool(tool: &str, args: &[&str], text: &str) -> bool {
    use std::io::Write;
    use std::process::{Command, Stdio};

    let Ok(mut child) = Command::new(tool)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    else {
        return false;
    };

    let Some(mut stdin) = child.stdin.take() else {
        return false;
    };
    if stdin.write_all(text.as_bytes()).is_err() {
        return false;
    }
    drop(stdin);

    child.wait().map(|s| s.success()).unwrap_or(false)
}
