//! Best-effort descriptive metadata for discovered devices
//!
//! Metadata is display-only and never affects filtering or ordering.
//! Lookups never fail: any attribute the host cannot supply keeps the
//! [`UNKNOWN`] sentinel.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serialport::SerialPortType;
use tracing::debug;

use crate::scanner::device_path;

/// Sentinel standing in for unavailable metadata
pub const UNKNOWN: &str = "UNKNOWN";

/// Descriptive record attached to a device for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    /// USB serial number
    pub serial_number: String,
    /// Product string, e.g. "FT232R USB UART"
    pub product_type: String,
    /// Manufacturer name, or `0x`-prefixed vendor ID as a fallback
    pub vendor_name: String,
}

impl Default for DeviceInfo {
    fn default() -> Self {
        Self {
            serial_number: UNKNOWN.to_string(),
            product_type: UNKNOWN.to_string(),
            vendor_name: UNKNOWN.to_string(),
        }
    }
}

/// A way of fetching descriptive metadata for one device.
///
/// Implementations absorb every failure: a lookup yields a sentinel-filled
/// record rather than an error.
pub trait MetadataLookup {
    /// Metadata for the named device, sentinel-filled where unavailable
    fn lookup(&self, name: &str) -> DeviceInfo;
}

/// One-shot bulk query of the host's serial port registry, keyed by full
/// device path (macOS IOKit, via the `serialport` crate).
pub struct BulkMetadataQuery {
    devices: HashMap<String, DeviceInfo>,
}

impl BulkMetadataQuery {
    /// Snapshot the registry now.
    ///
    /// A failed or empty enumeration means "no extra data available" and
    /// yields an empty map.
    pub fn snapshot() -> Self {
        match serialport::available_ports() {
            Ok(ports) => Self::from_ports(ports),
            Err(err) => {
                debug!("Bulk metadata query failed: {err}");
                Self {
                    devices: HashMap::new(),
                }
            }
        }
    }

    /// Build the path-keyed map from an enumeration result
    pub fn from_ports(ports: Vec<serialport::SerialPortInfo>) -> Self {
        let mut devices = HashMap::new();
        for port in ports {
            let SerialPortType::UsbPort(usb) = port.port_type else {
                continue;
            };

            let mut info = DeviceInfo::default();
            if let Some(serial) = usb.serial_number {
                info.serial_number = serial.trim().to_string();
            }
            if let Some(product) = usb.product {
                info.product_type = product.trim().to_string();
            }
            if let Some(manufacturer) = usb.manufacturer {
                info.vendor_name = manufacturer.trim().to_string();
            } else {
                info.vendor_name = format!("0x{:04x}", usb.vid);
            }
            devices.insert(port.port_name, info);
        }
        Self { devices }
    }
}

impl MetadataLookup for BulkMetadataQuery {
    fn lookup(&self, name: &str) -> DeviceInfo {
        self.devices
            .get(&device_path(name))
            .cloned()
            .unwrap_or_default()
    }
}

/// Per-device on-demand query of sysfs USB attributes (Linux).
///
/// Resolves `<class_root>/<name>/device` and walks up to the USB device
/// ancestor, then reads its `serial`, `product` and `manufacturer`
/// attribute files.
pub struct SysfsMetadataQuery {
    class_root: PathBuf,
}

impl SysfsMetadataQuery {
    /// Query against the standard tty class directory
    pub fn new() -> Self {
        Self::with_root("/sys/class/tty")
    }

    /// Query against a custom class directory
    pub fn with_root(class_root: impl Into<PathBuf>) -> Self {
        Self {
            class_root: class_root.into(),
        }
    }
}

impl Default for SysfsMetadataQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataLookup for SysfsMetadataQuery {
    fn lookup(&self, name: &str) -> DeviceInfo {
        let mut info = DeviceInfo::default();

        let link = self.class_root.join(name).join("device");
        let Ok(device) = fs::canonicalize(&link) else {
            debug!("No sysfs node for {name}");
            return info;
        };
        let Some(usb) = find_usb_ancestor(&device) else {
            debug!("No USB ancestor for {name}");
            return info;
        };

        if let Some(serial) = read_attr(&usb, "serial") {
            info.serial_number = serial;
        }
        if let Some(product) = read_attr(&usb, "product") {
            info.product_type = product;
        }
        if let Some(manufacturer) = read_attr(&usb, "manufacturer") {
            info.vendor_name = manufacturer;
        } else if let Some(id) = read_attr(&usb, "idVendor") {
            info.vendor_name = format!("0x{id}");
        }

        info
    }
}

/// Select the lookup strategy for the build target.
#[cfg(target_os = "macos")]
pub fn platform_metadata() -> Box<dyn MetadataLookup> {
    Box::new(BulkMetadataQuery::snapshot())
}

/// Select the lookup strategy for the build target.
#[cfg(not(target_os = "macos"))]
pub fn platform_metadata() -> Box<dyn MetadataLookup> {
    Box::new(SysfsMetadataQuery::new())
}

/// Walk up from a sysfs device directory to the USB device node, which
/// is the nearest ancestor carrying an `idVendor` attribute.
fn find_usb_ancestor(start: &Path) -> Option<PathBuf> {
    let mut dir = Some(start);
    while let Some(d) = dir {
        if d.join("idVendor").is_file() {
            return Some(d.to_path_buf());
        }
        dir = d.parent();
    }
    None
}

fn read_attr(dir: &Path, attr: &str) -> Option<String> {
    let text = fs::read_to_string(dir.join(attr)).ok()?;
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Some(text.to_string())
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};
    use std::io::Write as _;
    use std::path::Path;

    use serialport::{SerialPortInfo, UsbPortInfo};

    use super::*;

    fn write_attr(dir: &Path, attr: &str, value: &str) {
        let mut file = File::create(dir.join(attr)).unwrap();
        writeln!(file, "{value}").unwrap();
    }

    fn usb_port(path: &str, usb: UsbPortInfo) -> SerialPortInfo {
        SerialPortInfo {
            port_name: path.to_string(),
            port_type: SerialPortType::UsbPort(usb),
        }
    }

    #[test]
    fn test_default_info_is_all_sentinels() {
        let info = DeviceInfo::default();
        assert_eq!(info.serial_number, UNKNOWN);
        assert_eq!(info.product_type, UNKNOWN);
        assert_eq!(info.vendor_name, UNKNOWN);
    }

    #[test]
    fn test_bulk_query_keys_by_device_path() {
        let query = BulkMetadataQuery::from_ports(vec![usb_port(
            "/dev/cu.usbserial-1410",
            UsbPortInfo {
                vid: 0x0403,
                pid: 0x6001,
                serial_number: Some("A1B2C3".to_string()),
                manufacturer: Some("FTDI".to_string()),
                product: Some(" FT232R USB UART ".to_string()),
            },
        )]);

        let info = query.lookup("cu.usbserial-1410");
        assert_eq!(info.serial_number, "A1B2C3");
        assert_eq!(info.product_type, "FT232R USB UART");
        assert_eq!(info.vendor_name, "FTDI");
    }

    #[test]
    fn test_bulk_query_tolerates_partial_data() {
        let query = BulkMetadataQuery::from_ports(vec![usb_port(
            "/dev/cu.usbmodem01",
            UsbPortInfo {
                vid: 0x2e8a,
                pid: 0x0005,
                serial_number: None,
                manufacturer: None,
                product: None,
            },
        )]);

        let info = query.lookup("cu.usbmodem01");
        assert_eq!(info.serial_number, UNKNOWN);
        assert_eq!(info.product_type, UNKNOWN);
        // Vendor falls back to the numeric ID
        assert_eq!(info.vendor_name, "0x2e8a");
    }

    #[test]
    fn test_bulk_query_unknown_device_yields_sentinels() {
        let query = BulkMetadataQuery::from_ports(vec![]);
        assert_eq!(query.lookup("cu.usbmodem99"), DeviceInfo::default());
    }

    #[test]
    fn test_sysfs_query_reads_usb_ancestor_attributes() {
        let dir = tempfile::tempdir().unwrap();
        let node = dir.path().join("ttyUSB0");
        fs::create_dir_all(node.join("device")).unwrap();
        write_attr(&node, "idVendor", "0403");
        write_attr(&node, "serial", "A1B2C3");
        write_attr(&node, "product", " FT232R USB UART ");
        write_attr(&node, "manufacturer", "FTDI");

        let info = SysfsMetadataQuery::with_root(dir.path()).lookup("ttyUSB0");
        assert_eq!(info.serial_number, "A1B2C3");
        assert_eq!(info.product_type, "FT232R USB UART");
        assert_eq!(info.vendor_name, "FTDI");
    }

    #[test]
    fn test_sysfs_query_vendor_falls_back_to_id() {
        let dir = tempfile::tempdir().unwrap();
        let node = dir.path().join("ttyACM0");
        fs::create_dir_all(node.join("device")).unwrap();
        write_attr(&node, "idVendor", "2e8a");

        let info = SysfsMetadataQuery::with_root(dir.path()).lookup("ttyACM0");
        assert_eq!(info.serial_number, UNKNOWN);
        assert_eq!(info.product_type, UNKNOWN);
        assert_eq!(info.vendor_name, "0x2e8a");
    }

    #[test]
    fn test_sysfs_query_missing_node_yields_sentinels() {
        let dir = tempfile::tempdir().unwrap();
        let info = SysfsMetadataQuery::with_root(dir.path()).lookup("ttyUSB7");
        assert_eq!(info, DeviceInfo::default());
    }
}
