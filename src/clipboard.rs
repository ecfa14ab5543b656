//! Clipboard delivery: OSC 52 through the terminal, plus the system
//! clipboard when running locally.

use arboard::Clipboard;
use base64::{Engine as _, engine::general_purpose};
use crossterm::{execute, style::Print};
use std::{
    env,
    io::{self, Write},
};
use tracing::{debug, warn};

fn osc52_sequence(text: &str) -> String {
    let encoded = general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{}\x07", encoded)
}

fn in_tmux() -> bool {
    env::var_os("TMUX").is_some()
        || env::var_os("TERM").is_some_and(|t| t.to_string_lossy().starts_with("tmux"))
}

fn tmux_passthrough(seq: &str) -> String {
    let escaped = seq.replace('\x1b', "\x1b\x1b");
    format!("\x1bPtmux;{}\x1b\\", escaped)
}

fn is_ssh_session() -> bool {
    env::var_os("SSH_CONNECTION").is_some() || env::var_os("SSH_TTY").is_some()
}

fn emit_osc52<W: Write>(w: &mut W, text: &str) -> io::Result<()> {
    let seq = osc52_sequence(text);
    let out = if in_tmux() {
        tmux_passthrough(&seq)
    } else {
        seq
    };
    execute!(w, Print(out))?;
    w.flush()
}

fn try_set_system_clipboard(text: &str) -> Result<(), String> {
    let mut cb = Clipboard::new().map_err(|e| e.to_string())?;
    cb.set_text(text.to_string()).map_err(|e| e.to_string())
}

/// Best-effort copy. Returns whether any channel accepted the text;
/// failures are only logged.
pub fn copy_to_clipboard<W: Write>(w: &mut W, text: &str) -> bool {
    let osc52_ok = match emit_osc52(w, text) {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "OSC52 copy failed");
            false
        }
    };

    let system_ok = if is_ssh_session() {
        false
    } else {
        match try_set_system_clipboard(text) {
            Ok(()) => true,
            Err(e) => {
                debug!(error = %e, "system clipboard unavailable");
                false
            }
        }
    };

    osc52_ok || system_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osc52_sequence() {
        assert_eq!(osc52_sequence("git log"), "\x1b]52;c;Z2l0IGxvZw==\x07");
    }

    #[test]
    fn test_tmux_passthrough_doubles_escapes() {
        let wrapped = tmux_passthrough("\x1b]52;c;YQ==\x07");
        assert_eq!(wrapped, "\x1bPtmux;\x1b\x1b]52;c;YQ==\x07\x1b\\");
    }

    #[test]
    fn test_emit_writes_sequence() {
        let mut buf: Vec<u8> = Vec::new();
        emit_osc52(&mut buf, "a1b2c3d").unwrap();
        let written = String::from_utf8(buf).unwrap();
        assert!(written.contains(&general_purpose::STANDARD.encode("a1b2c3d")));
    }
}
