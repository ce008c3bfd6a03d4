//! ttypick - find connected USB-to-serial adaptors
//!
//! With one adaptor attached, prints its device path on stdout for shell
//! piping. With several attached, lists them as an indexed table on
//! stderr; calling again with an index picks one.

mod report;
mod show;
mod signal;

use std::io::{self, IsTerminal};

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tty_scan::{platform_metadata, platform_scanner, IgnoreSet};

use report::exit_codes;
use show::{Options, Selection};

const EXAMPLES: &str = "\
Examples:
  One device connected:                 minicom -d $(ttypick) -b 9600
  Two devices connected, use number 1:  minicom -d $(ttypick 1) -b 9600";

/// List connected USB-to-serial adaptors
#[derive(Parser)]
#[command(name = "ttypick")]
#[command(version, about = "List connected USB-to-serial adaptors")]
#[command(after_help = EXAMPLES)]
struct Cli {
    /// Index of a device on the ttypick-generated list (1-based)
    #[arg(value_name = "INDEX", allow_hyphen_values = true)]
    index: Option<String>,

    /// Show product and vendor details for every device
    #[arg(short, long)]
    info: bool,
}

/// Validate the raw index argument into a selection.
///
/// Zero, negative and non-numeric references are caught here, before the
/// core ever sees them.
fn parse_selection(raw: Option<&str>) -> Result<Selection, String> {
    let Some(raw) = raw else {
        return Ok(Selection::None);
    };

    if raw.starts_with('-') {
        return Err(format!("Device reference {raw} is invalid (negative integer)"));
    }

    match raw.parse::<usize>() {
        Ok(0) => Err(format!("Device reference {raw} is invalid (zero)")),
        Ok(n) => Ok(Selection::Index(n)),
        Err(_) => Err(
            "Device reference is not an integer. List available devices to get this value"
                .to_string(),
        ),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    signal::install();

    let styled = io::stderr().is_terminal();
    let selection = match parse_selection(cli.index.as_deref()) {
        Ok(selection) => selection,
        Err(message) => report::fatal(styled, &message, exit_codes::FATAL),
    };
    let opts = Options {
        selection,
        verbose: cli.info,
        styled,
    };

    let raw = match platform_scanner().scan() {
        Ok(devices) => devices,
        Err(err) => report::fatal(styled, &err.to_string(), exit_codes::NO_DEVICE_DIR),
    };
    let devices = IgnoreSet::load_default().prune(raw);
    tracing::debug!("{} device(s) survived the prune", devices.len());

    let meta = platform_metadata();
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    if let Err(err) = show::show_devices(&devices, meta.as_ref(), &opts, &mut stdout, &mut stderr) {
        report::fatal(styled, &format!("Cannot write output: {err}"), exit_codes::FATAL);
    }
}
