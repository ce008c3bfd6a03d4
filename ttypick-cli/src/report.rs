//! Styled terminal reporting on the status channel (stderr)

use std::io::{self, Write};
use std::process;

pub const YELLOW: &str = "\u{001B}[0;33m";
pub const RED: &str = "\u{001B}[0;31m";
pub const BOLD: &str = "\u{001B}[1m";
pub const RESET: &str = "\u{001B}[0m";

/// Process exit codes
pub mod exit_codes {
    /// Generic fatal error (bad argument, broken output channel)
    pub const FATAL: i32 = 1;
    /// The device scan root is missing or unlistable
    pub const NO_DEVICE_DIR: i32 = 2;
    /// Interrupted by SIGINT (128 + signal number)
    pub const INTERRUPTED: i32 = 130;
}

/// Write a non-fatal warning line to the status channel.
pub fn warning<W: Write>(status: &mut W, styled: bool, message: &str) -> io::Result<()> {
    if styled {
        writeln!(status, "{YELLOW}{BOLD}WARNING{RESET} {message}")
    } else {
        writeln!(status, "WARNING {message}")
    }
}

/// Report a fatal error on stderr and terminate with the given exit code.
pub fn fatal(styled: bool, message: &str, code: i32) -> ! {
    let mut stderr = io::stderr();
    let result = if styled {
        writeln!(stderr, "{RED}{BOLD}ERROR{RESET} {message} -- exiting")
    } else {
        writeln!(stderr, "ERROR {message} -- exiting")
    };
    // Nothing left to tell the user if stderr itself is gone
    drop(result);
    process::exit(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_warning_line() {
        let mut sink = Vec::new();
        warning(&mut sink, false, "42 is out of range (1)").unwrap();
        assert_eq!(String::from_utf8(sink).unwrap(), "WARNING 42 is out of range (1)\n");
    }

    #[test]
    fn test_styled_warning_carries_ansi_marker() {
        let mut sink = Vec::new();
        warning(&mut sink, true, "42 is out of range (1)").unwrap();
        let line = String::from_utf8(sink).unwrap();
        assert!(line.starts_with(YELLOW));
        assert!(line.contains("WARNING"));
        assert!(line.ends_with("42 is out of range (1)\n"));
    }
}
