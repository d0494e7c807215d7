//! System clipboard writes through the platform's copy utility.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("no clipboard tool found (tried {0})")]
    NoTool(String),
    #[error("{tool}: {source}")]
    Io {
        tool: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{tool} exited with {status}")]
    Failed { tool: String, status: std::process::ExitStatus },
}

/// A copy utility and the arguments that make it read stdin into the clipboard.
struct Tool {
    name: &'static str,
    args: &'static [&'static str],
}

fn candidates() -> Vec<Tool> {
    if cfg!(target_os = "macos") {
        return vec![Tool { name: "pbcopy", args: &[] }];
    }
    if cfg!(windows) {
        return vec![Tool { name: "clip", args: &[] }];
    }
    let mut tools = Vec::new();
    if std::env::var_os("WAYLAND_DISPLAY").is_some() {
        tools.push(Tool { name: "wl-copy", args: &[] });
    }
    tools.push(Tool { name: "xclip", args: &["-selection", "clipboard"] });
    tools.push(Tool { name: "xsel", args: &["--clipboard", "--input"] });
    tools
}

fn find_tool() -> Result<(PathBuf, Tool), ClipboardError> {
    let tools = candidates();
    let tried = tools.iter().map(|t| t.name).collect::<Vec<_>>().join(", ");
    tools
        .into_iter()
        .find_map(|tool| which::which(tool.name).ok().map(|path| (path, tool)))
        .ok_or(ClipboardError::NoTool(tried))
}

/// Copy `text` to the system clipboard. Returns the tool that was used.
pub fn copy(text: &str) -> Result<&'static str, ClipboardError> {
    let (path, tool) = find_tool()?;
    log::debug!("copying {} byte(s) with {}", text.len(), path.display());

    let io_err = |source| ClipboardError::Io {
        tool: tool.name.to_string(),
        source,
    };

    let mut child = Command::new(&path)
        .args(tool.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(io_err)?;

    let status = feed(&mut child, text).map_err(io_err)?;
    if !status.success() {
        return Err(ClipboardError::Failed {
            tool: tool.name.to_string(),
            status,
        });
    }
    Ok(tool.name)
}

/// Write `text` to the child's stdin, close it, and wait for the child.
/// A failed write kills the child before returning so it is always reaped.
fn feed(child: &mut Child, text: &str) -> std::io::Result<ExitStatus> {
    if let Some(mut stdin) = child.stdin.take() {
        if let Err(e) = stdin.write_all(text.as_bytes()) {
            drop(stdin);
            let _ = child.kill();
            let _ = child.wait();
            return Err(e);
        }
        // Dropping stdin closes the pipe so the tool sees EOF.
    }
    child.wait()
}
