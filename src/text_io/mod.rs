use anyhow::{anyhow, Result};
use arboard::Clipboard;
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::{debug, info, warn};
use which::which;

/// How long the native clipboard keeps serving the selection on Linux when no
/// clipboard tool is installed. X11 and Wayland drop the selection once the
/// owning process exits.
#[cfg(target_os = "linux")]
const NATIVE_HOLD: std::time::Duration = std::time::Duration::from_secs(5);

/// Copy text to the system clipboard.
///
/// On Linux the wl-copy / xclip / xsel tools are tried first because they
/// keep serving the selection after this process exits. Elsewhere the native
/// clipboard is used directly.
pub fn copy_to_clipboard_sync(text: &str) -> Result<()> {
    if text.is_empty() {
        return Ok(());
    }

    info!("Copying {} chars to clipboard", text.len());

    if cfg!(target_os = "linux") && copy_with_system_backends(text) {
        return Ok(());
    }

    match Clipboard::new() {
        Ok(mut clipboard) => match set_native(&mut clipboard, text) {
            Ok(()) => return Ok(()),
            Err(err) => warn!("Native clipboard failed ({})", err),
        },
        Err(err) => warn!("System clipboard backend unavailable ({})", err),
    }

    if !cfg!(target_os = "linux") && copy_with_system_backends(text) {
        return Ok(());
    }

    Err(anyhow!(
        "No clipboard available (native clipboard failed and no wl-copy/xclip/xsel found)"
    ))
}

#[cfg(target_os = "linux")]
fn set_native(clipboard: &mut Clipboard, text: &str) -> Result<(), arboard::Error> {
    use arboard::SetExtLinux;

    debug!(
        "Serving clipboard for up to {}s so it outlives this process",
        NATIVE_HOLD.as_secs()
    );
    clipboard
        .set()
        .wait_until(std::time::Instant::now() + NATIVE_HOLD)
        .text(text)
}

#[cfg(not(target_os = "linux"))]
fn set_native(clipboard: &mut Clipboard, text: &str) -> Result<(), arboard::Error> {
    clipboard.set_text(text)
}

fn copy_with_system_backends(text: &str) -> bool {
    CLIPBOARD_BACKENDS
        .iter()
        .filter(|backend| which(backend.copy_cmd).is_ok())
        .any(|backend| pipe_to_backend(backend, text))
}

/// Feed `text` to a clipboard tool. The child is always reaped, even when
/// writing to it fails.
fn pipe_to_backend(backend: &ClipboardBackend, text: &str) -> bool {
    let spawned = Command::new(backend.copy_cmd)
        .args(backend.copy_args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();

    let mut child = match spawned {
        Ok(child) => child,
        Err(err) => {
            debug!("Failed to start {}: {}", backend.name, err);
            return false;
        }
    };

    // Dropping stdin closes the pipe so the tool sees EOF.
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(text.as_bytes()),
        None => Ok(()),
    };

    let status = child.wait();

    if let Err(err) = written {
        debug!("Failed to write to {}: {}", backend.name, err);
        return false;
    }

    match status {
        Ok(status) if status.success() => {
            debug!("Text copied to clipboard with {}", backend.name);
            true
        }
        Ok(status) => {
            debug!("{} exited with {}", backend.name, status);
            false
        }
        Err(err) => {
            debug!("Failed to wait for {}: {}", backend.name, err);
            false
        }
    }
}

struct ClipboardBackend {
    name: &'static str,
    copy_cmd: &'static str,
    copy_args: &'static [&'static str],
}

const CLIPBOARD_BACKENDS: &[ClipboardBackend] = &[
    ClipboardBackend {
        name: "wl-copy",
        copy_cmd: "wl-copy",
        copy_args: &[],
    },
    ClipboardBackend {
        name: "xclip",
        copy_cmd: "xclip",
        copy_args: &["-selection", "clipboard"],
    },
    ClipboardBackend {
        name: "xsel",
        copy_cmd: "xsel",
        copy_args: &["--clipboard", "--input"],
    },
];
