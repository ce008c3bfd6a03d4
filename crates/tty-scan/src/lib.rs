//! USB-to-Serial Adaptor Discovery Library
//!
//! This crate enumerates serial device nodes attached to the host,
//! filters out host-injected pseudo-devices, and looks up best-effort
//! descriptive metadata for each survivor.
//!
//! # Example
//!
//! ```rust,no_run
//! use tty_scan::{platform_scanner, IgnoreSet};
//!
//! let raw = platform_scanner().scan().unwrap();
//! let devices = IgnoreSet::load_default().prune(raw);
//!
//! for name in devices {
//!     println!("Found device: {}", tty_scan::device_path(&name));
//! }
//! ```

pub mod error;
pub mod ignore;
pub mod metadata;
pub mod scanner;

pub use error::ScanError;
pub use ignore::{default_ignore_path, IgnoreSet, DEFAULT_IGNORES};
pub use metadata::{
    platform_metadata, BulkMetadataQuery, DeviceInfo, MetadataLookup, SysfsMetadataQuery, UNKNOWN,
};
pub use scanner::{
    device_path, platform_scanner, DeviceScan, FlatPrefixScan, LivenessPathScan, DEVICE_ROOT,
};
