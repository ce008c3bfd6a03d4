//! Device selection and presentation
//!
//! Given the filtered device list and the parsed options, either emit a
//! single device path on the primary channel (stdout, for piping) or a
//! 1-based indexed table on the status channel (stderr, for humans).
//! Never both, except the warning lines that precede a recovered
//! out-of-range selection.

use std::io::{self, Write};

use tty_scan::{device_path, MetadataLookup};

use crate::report;

/// The user's device choice, validated at the argument boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// No index given: list everything, or emit the only device
    None,
    /// 1-based index into the filtered list; always >= 1
    Index(usize),
}

/// Immutable options for one presentation pass
#[derive(Debug, Clone, Copy)]
pub struct Options {
    pub selection: Selection,
    /// Show product and vendor details even for a single device
    pub verbose: bool,
    /// ANSI-style the status channel
    pub styled: bool,
}

/// Present the filtered device list.
///
/// Decision order:
/// 1. empty list: "no connected devices" notice on the status channel;
/// 2. one device, not verbose: its path on the primary channel, with a
///    warning first if an index other than 1 was requested;
/// 3. otherwise: an out-of-range index degrades to "no selection" with a
///    warning; a valid index prints that path alone; no selection prints
///    the full indexed table; verbose plus a valid index prints a single
///    unnumbered detail line.
pub fn show_devices<O: Write, S: Write>(
    devices: &[String],
    meta: &dyn MetadataLookup,
    opts: &Options,
    out: &mut O,
    status: &mut S,
) -> io::Result<()> {
    if devices.is_empty() {
        return writeln!(status, "No connected devices");
    }

    if devices.len() == 1 && !opts.verbose {
        if let Selection::Index(n) = opts.selection {
            if n != 1 {
                report::warning(status, opts.styled, &format!("{n} is out of range (1)"))?;
            }
        }
        return writeln!(out, "{}", device_path(&devices[0]));
    }

    // An index is valid iff 1 <= n <= devices.len(); out of range is
    // recoverable and reverts to list-all
    let mut selection = opts.selection;
    if let Selection::Index(n) = selection {
        if n > devices.len() {
            report::warning(
                status,
                opts.styled,
                &format!("{n} is out of range (1-{})", devices.len()),
            )?;
            selection = Selection::None;
        }
    }

    if let Selection::Index(n) = selection {
        if !opts.verbose {
            return writeln!(out, "{}", device_path(&devices[n - 1]));
        }
    }

    for (i, name) in devices.iter().enumerate() {
        let index = i + 1;
        let info = meta.lookup(name);
        match selection {
            Selection::None => writeln!(
                status,
                "{index}. {}\t\t[{}, {}]",
                device_path(name),
                info.product_type,
                info.vendor_name
            )?,
            // The chosen device needs no index number
            Selection::Index(n) if n == index => writeln!(
                status,
                "{}\t\t[{}, {}]",
                device_path(name),
                info.product_type,
                info.vendor_name
            )?,
            Selection::Index(_) => {}
        }
    }

    Ok(())
}
