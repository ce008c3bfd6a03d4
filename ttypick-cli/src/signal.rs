//! SIGINT handling
//!
//! A Ctrl-C mid-scan must still leave a clean line on the terminal and a
//! conventional 128+SIGINT exit code. The handler is installed once at
//! startup and stays out of the way of the core logic.

#[cfg(unix)]
extern "C" fn on_sigint(_signum: nix::libc::c_int) {
    const NOTICE: &[u8] = b"\rttypick interrupted -- halting\n";

    // Only async-signal-safe calls are allowed here: raw write(2), then
    // an immediate exit without atexit handlers
    unsafe {
        nix::libc::write(
            nix::libc::STDERR_FILENO,
            NOTICE.as_ptr().cast(),
            NOTICE.len(),
        );
        nix::libc::_exit(crate::report::exit_codes::INTERRUPTED);
    }
}

/// Install the Ctrl-C trap. Failure to install is ignored: the default
/// disposition still terminates the process, just without the notice.
#[cfg(unix)]
pub fn install() {
    use nix::sys::signal::{self, SigHandler, Signal};

    // SAFETY: the handler calls only async-signal-safe functions
    unsafe {
        let _ = signal::signal(Signal::SIGINT, SigHandler::Handler(on_sigint));
    }
}

#[cfg(not(unix))]
pub fn install() {}
