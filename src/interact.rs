//! Console interaction: line-oriented prompts and the guard that makes
//! sure there is a terminal to prompt on.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::Command;

use anyhow::{bail, Context, Result};

use crate::config;

/// Candidate terminal emulators for the relaunch, tried in order.
/// Each entry is (command, flag introducing the command line to run).
const TERMINALS: &[(&str, &str)] = &[
    ("x-terminal-emulator", "-e"),
    ("konsole", "-e"),
    ("gnome-terminal", "--"),
    ("xfce4-terminal", "-e"),
    ("lxterminal", "-e"),
    ("xterm", "-e"),
];

/// Whether standard output is attached to a terminal.
pub fn stdout_is_tty() -> bool {
    // SAFETY: isatty only inspects the descriptor.
    unsafe { libc::isatty(libc::STDOUT_FILENO) == 1 }
}

/// Whether a graphical display is reachable.
pub fn display_available() -> bool {
    let set = |key: &str| std::env::var_os(key).map_or(false, |value| !value.is_empty());
    set("DISPLAY") || set("WAYLAND_DISPLAY")
}

/// Outcome of the interactivity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interactivity {
    /// Output is a terminal; carry on.
    Proceed,
    /// Not a terminal, but a display is up: re-launch inside an emulator.
    Relaunch,
    /// No terminal and no way to get one.
    Unavailable,
}

/// Decide how to establish interactivity.
///
/// A spawned invocation never relaunches again, so a broken emulator
/// cannot loop.
pub fn interactivity(is_tty: bool, spawned: bool, has_display: bool) -> Interactivity {
    if is_tty {
        Interactivity::Proceed
    } else if spawned || !has_display {
        Interactivity::Unavailable
    } else {
        Interactivity::Relaunch
    }
}

/// Re-invoke `exe` inside the first terminal emulator found on PATH, with
/// the spawned marker appended.
pub fn relaunch_in_terminal(exe: &Path) -> Result<()> {
    let Some((term, flag)) = TERMINALS
        .iter()
        .copied()
        .find(|(cmd, _)| which::which(cmd).is_ok())
    else {
        bail!("no terminal emulator found on PATH");
    };
    Command::new(term)
        .arg(flag)
        .arg(exe)
        .arg(config::SPAWNED_FLAG)
        .spawn()
        .with_context(|| format!("launching {term}"))?;
    Ok(())
}

/// Ask a yes/no question on the console. Only `y` or `Y` proceeds.
pub fn confirm(question: &str) -> Result<bool> {
    print!("{question} (y/n) ");
    io::stdout().flush().context("flushing stdout")?;
    confirm_from(&mut io::stdin().lock())
}

/// Read the confirmation answer from any line source.
pub fn confirm_from(input: &mut impl BufRead) -> Result<bool> {
    let mut answer = String::new();
    input.read_line(&mut answer).context("reading the answer")?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

/// Prompt for a single line, falling back to `default` on empty input.
pub fn prompt_with_default(question: &str, default: &str) -> Result<String> {
    print!("{question} [{default}]: ");
    io::stdout().flush().context("flushing stdout")?;
    prompt_from(&mut io::stdin().lock(), default)
}

/// Read a defaulted answer from any line source.
pub fn prompt_from(input: &mut impl BufRead, default: &str) -> Result<String> {
    let mut line = String::new();
    input.read_line(&mut line).context("reading input")?;
    let line = line.trim();
    Ok(if line.is_empty() {
        default.to_string()
    } else {
        line.to_string()
    })
}

/// Hold a spawned terminal open until the user acknowledges, so final
/// diagnostics stay readable before the window closes.
pub fn wait_for_ack() {
    print!("Press ENTER to close this window.");
    let _ = io::stdout().flush();
    let mut line = String::new();
    let _ = io::stdin().read_line(&mut line);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn tty_always_proceeds() {
        assert_eq!(interactivity(true, false, false), Interactivity::Proceed);
        assert_eq!(interactivity(true, true, true), Interactivity::Proceed);
    }

    #[test]
    fn spawned_retry_never_relaunches() {
        assert_eq!(interactivity(false, true, true), Interactivity::Unavailable);
    }

    #[test]
    fn no_display_is_unavailable() {
        assert_eq!(
            interactivity(false, false, false),
            Interactivity::Unavailable
        );
    }

    #[test]
    fn display_triggers_relaunch() {
        assert_eq!(interactivity(false, false, true), Interactivity::Relaunch);
    }

    #[test]
    fn only_y_confirms() {
        assert!(confirm_from(&mut Cursor::new(&b"y\n"[..])).unwrap());
        assert!(confirm_from(&mut Cursor::new(&b"Y\n"[..])).unwrap());
        assert!(confirm_from(&mut Cursor::new(&b"  y  \n"[..])).unwrap());
        assert!(!confirm_from(&mut Cursor::new(&b"yes\n"[..])).unwrap());
        assert!(!confirm_from(&mut Cursor::new(&b"n\n"[..])).unwrap());
        assert!(!confirm_from(&mut Cursor::new(&b"\n"[..])).unwrap());
        assert!(!confirm_from(&mut Cursor::new(&b""[..])).unwrap());
    }

    #[test]
    fn empty_input_takes_the_default() {
        let answer = prompt_from(&mut Cursor::new(&b"\n"[..]), "/opt/pcbasic").unwrap();
        assert_eq!(answer, "/opt/pcbasic");
    }

    #[test]
    fn explicit_input_overrides_the_default() {
        let answer = prompt_from(&mut Cursor::new(&b"  /home/u/basic  \n"[..]), "/opt/pcbasic")
            .unwrap();
        assert_eq!(answer, "/home/u/basic");
    }
}
