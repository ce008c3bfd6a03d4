//! Error types for device discovery

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while scanning for devices
#[derive(Debug, Error)]
pub enum ScanError {
    /// The scan root does not exist or cannot be listed
    #[error("{} cannot be found", path.display())]
    RootNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
