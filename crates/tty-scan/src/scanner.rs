//! Serial device node enumeration
//!
//! This module provides the platform-specific scan that produces the raw
//! candidate device list. Candidates are bare node names; no filtering is
//! applied here beyond the platform's prefix test.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ScanError;

/// Fixed prefix every presented device path carries
pub const DEVICE_ROOT: &str = "/dev/";

/// Build the full device path for a bare node name.
///
/// The result is the exact concatenation of [`DEVICE_ROOT`] and the name;
/// no normalisation or symlink resolution happens.
pub fn device_path(name: &str) -> String {
    format!("{DEVICE_ROOT}{name}")
}

/// A platform-specific way of enumerating candidate device nodes
pub trait DeviceScan {
    /// Raw candidate device names, in host enumeration order.
    ///
    /// Fails only when the scan root itself is missing or unlistable.
    fn scan(&self) -> Result<Vec<String>, ScanError>;
}

/// Variant A: the host exposes all serial nodes in one flat directory and
/// a single name prefix identifies class membership (macOS `/dev/cu.*`).
pub struct FlatPrefixScan {
    root: PathBuf,
}

impl FlatPrefixScan {
    /// Name prefix identifying callout serial devices
    pub const PREFIX: &'static str = "cu.";

    /// Scanner over the standard device directory
    pub fn new() -> Self {
        Self::with_root("/dev")
    }

    /// Scanner over a custom directory
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Default for FlatPrefixScan {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceScan for FlatPrefixScan {
    fn scan(&self) -> Result<Vec<String>, ScanError> {
        scan_dir(&self.root, |name| name.starts_with(Self::PREFIX))
    }
}

/// Variant B: driver-class entries appear in a liveness directory only
/// while a device is actually connected (Linux `/sys/class/tty`).
///
/// `/dev/ttyUSB*` nodes can outlive the hardware, so the scan reads the
/// sysfs class directory instead; names found there map directly onto
/// their `/dev` counterparts.
pub struct LivenessPathScan {
    root: PathBuf,
}

impl LivenessPathScan {
    /// Name prefixes of the USB serial driver classes
    pub const PREFIXES: [&'static str; 2] = ["ttyUSB", "ttyACM"];

    /// Scanner over the standard tty class directory
    pub fn new() -> Self {
        Self::with_root("/sys/class/tty")
    }

    /// Scanner over a custom directory
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Default for LivenessPathScan {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceScan for LivenessPathScan {
    fn scan(&self) -> Result<Vec<String>, ScanError> {
        scan_dir(&self.root, |name| {
            Self::PREFIXES.iter().any(|p| name.starts_with(p))
        })
    }
}

/// Select the enumeration variant for the build target.
#[cfg(target_os = "macos")]
pub fn platform_scanner() -> Box<dyn DeviceScan> {
    Box::new(FlatPrefixScan::new())
}

/// Select the enumeration variant for the build target.
#[cfg(not(target_os = "macos"))]
pub fn platform_scanner() -> Box<dyn DeviceScan> {
    Box::new(LivenessPathScan::new())
}

fn scan_dir(root: &Path, keep: impl Fn(&str) -> bool) -> Result<Vec<String>, ScanError> {
    let entries = fs::read_dir(root).map_err(|source| ScanError::RootNotFound {
        path: root.to_path_buf(),
        source,
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let Ok(entry) = entry else { continue };
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if keep(name) {
            names.push(name.to_string());
        }
    }

    debug!("Found {} candidate(s) under {}", names.len(), root.display());
    Ok(names)
}
