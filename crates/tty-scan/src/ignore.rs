//! Ignore-list handling for host-injected pseudo-devices
//!
//! Hosts inject serial nodes that are never MCU boards (debug consoles,
//! Bluetooth pseudo-ports). A device is ignorable when any entry of the
//! ignore set occurs as a substring of its name. Users can extend the
//! built-in set with a per-user file, one entry per line.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::scanner::DEVICE_ROOT;

/// Known pseudo-devices that are definitely not MCUs
pub const DEFAULT_IGNORES: [&str; 2] = ["cu.debug-console", "cu.Bluetooth-Incoming-Port"];

/// Ordered set of device-name substrings to exclude from discovery
#[derive(Debug, Clone)]
pub struct IgnoreSet {
    entries: Vec<String>,
}

impl IgnoreSet {
    /// The built-in defaults only
    pub fn builtin() -> Self {
        Self::from_entries([])
    }

    /// User entries (in the given order) followed by the built-in defaults
    pub fn from_entries(user: impl IntoIterator<Item = String>) -> Self {
        let mut entries: Vec<String> = user.into_iter().collect();
        entries.extend(DEFAULT_IGNORES.iter().map(|s| s.to_string()));
        Self { entries }
    }

    /// Read user entries from a file and append the built-in defaults.
    ///
    /// Each non-empty line is one entry; a leading `/dev/` is stripped so
    /// the file may hold bare names or full paths. A missing or unreadable
    /// file is not an error: the set degrades to the built-in defaults.
    pub fn load(path: &Path) -> Self {
        let mut user = Vec::new();
        match fs::read_to_string(path) {
            Ok(text) => {
                for line in text.lines() {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let name = line.strip_prefix(DEVICE_ROOT).unwrap_or(line);
                    user.push(name.to_string());
                }
            }
            Err(err) => {
                debug!("No user ignore file at {}: {}", path.display(), err);
            }
        }
        Self::from_entries(user)
    }

    /// Load from the per-user ignore file at its fixed location.
    pub fn load_default() -> Self {
        match default_ignore_path() {
            Some(path) => Self::load(&path),
            None => Self::builtin(),
        }
    }

    /// True when any entry occurs within the given device name
    pub fn matches(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| name.contains(entry))
    }

    /// Drop every ignorable name, preserving input order.
    ///
    /// Exact duplicates in the input are passed through untouched; the
    /// prune never de-duplicates.
    pub fn prune(&self, devices: Vec<String>) -> Vec<String> {
        devices.into_iter().filter(|d| !self.matches(d)).collect()
    }

    /// The entries in match order
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

/// Fixed location of the per-user ignore file, or `None` when the host
/// has no resolvable config directory.
pub fn default_ignore_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ttypick").join("ignore"))
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use proptest::prelude::*;

    use super::*;

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_builtin_contains_known_pseudo_devices() {
        let set = IgnoreSet::builtin();
        assert_eq!(set.entries(), strings(&DEFAULT_IGNORES).as_slice());
    }

    #[test]
    fn test_prune_drops_default_pseudo_devices() {
        let set = IgnoreSet::builtin();
        let raw = strings(&[
            "cu.usbmodem1101",
            "cu.debug-console",
            "cu.Bluetooth-Incoming-Port",
        ]);
        assert_eq!(set.prune(raw), strings(&["cu.usbmodem1101"]));
    }

    #[test]
    fn test_match_is_substring_containment() {
        let set = IgnoreSet::from_entries(strings(&["usbserial"]));
        assert!(set.matches("cu.usbserial-1410"));
        assert!(!set.matches("cu.usbmodem1101"));
    }

    #[test]
    fn test_prune_preserves_enumeration_order() {
        let set = IgnoreSet::builtin();
        let raw = strings(&["cu.zz", "cu.debug-console", "cu.aa", "cu.mm"]);
        assert_eq!(set.prune(raw), strings(&["cu.zz", "cu.aa", "cu.mm"]));
    }

    #[test]
    fn test_prune_passes_exact_duplicates_through() {
        // Hosts are assumed not to produce duplicates; the prune does not
        // defend against them
        let set = IgnoreSet::builtin();
        let raw = strings(&["cu.usbmodem01", "cu.usbmodem01"]);
        assert_eq!(set.prune(raw), strings(&["cu.usbmodem01", "cu.usbmodem01"]));
    }

    #[test]
    fn test_load_reads_user_entries_before_builtins() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cu.MALS").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "/dev/cu.wlan-debug").unwrap();
        file.flush().unwrap();

        let set = IgnoreSet::load(file.path());
        let mut expected = strings(&["cu.MALS", "cu.wlan-debug"]);
        expected.extend(strings(&DEFAULT_IGNORES));
        assert_eq!(set.entries(), expected.as_slice());
    }

    #[test]
    fn test_load_missing_file_falls_back_to_builtins() {
        let dir = tempfile::tempdir().unwrap();
        let set = IgnoreSet::load(&dir.path().join("no-such-file"));
        assert_eq!(set.entries(), strings(&DEFAULT_IGNORES).as_slice());
    }

    proptest! {
        #[test]
        fn prune_output_is_a_subsequence_of_input(
            raw in proptest::collection::vec("[a-zA-Z.\\-]{0,16}", 0..24)
        ) {
            let set = IgnoreSet::builtin();
            let pruned = set.prune(raw.clone());

            let mut input = raw.iter();
            for kept in &pruned {
                prop_assert!(input.any(|name| name == kept));
            }
        }

        #[test]
        fn prune_is_idempotent(
            raw in proptest::collection::vec("[a-zA-Z.\\-]{0,16}", 0..24)
        ) {
            let set = IgnoreSet::builtin();
            let once = set.prune(raw);
            let twice = set.prune(once.clone());
            prop_assert_eq!(twice, once);
        }
    }
}
