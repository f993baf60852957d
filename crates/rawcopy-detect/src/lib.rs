//! # rawcopy detect
//!
//! Storage device enumeration behind a small capability interface.
//!
//! The copy engine never needs to know what disks exist; only the `list`
//! command does. Each supported platform provides [`list_devices`] with
//! whatever enumeration facility the OS offers, and platforms without one
//! report [`DetectError::UnsupportedPlatform`] instead of pretending.

#![warn(missing_docs)]
#![warn(clippy::all)]

use rawcopy_core::format_size;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Device enumeration errors
#[derive(Error, Debug)]
pub enum DetectError {
    /// Failed to enumerate devices
    #[error("Failed to enumerate devices: {0}")]
    EnumerationFailed(String),

    /// External enumeration command failed
    #[error("Command failed: {0}")]
    CommandFailed(String),

    /// Failed to parse device information
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Platform has no device enumeration facility
    #[error("Platform not supported")]
    UnsupportedPlatform,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for device enumeration operations
pub type Result<T> = std::result::Result<T, DetectError>;

/// A detected storage device
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Device path (e.g. `/dev/sdb`, `/dev/disk2`, `\\.\PhysicalDrive1`)
    pub path: String,

    /// Model or media description, if the platform reports one
    pub model: Option<String>,

    /// Size in bytes
    pub size: u64,

    /// Whether the platform reports the device as removable
    pub removable: bool,
}

impl DeviceInfo {
    /// Create a new device with the given path
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Builder: set the model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Builder: set the size
    #[must_use]
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    /// Builder: set the removable flag
    #[must_use]
    pub fn with_removable(mut self, removable: bool) -> Self {
        self.removable = removable;
        self
    }

    /// Format the size for human-readable display
    #[must_use]
    pub fn size_display(&self) -> String {
        format_size(self.size)
    }

    /// Model if known, otherwise the device path
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.model.as_deref().unwrap_or(&self.path)
    }
}

// Platform-specific implementations
cfg_if::cfg_if! {
    if #[cfg(target_os = "linux")] {
        mod linux;
        pub use linux::list_devices;
    } else if #[cfg(target_os = "macos")] {
        mod macos;
        pub use macos::list_devices;
    } else if #[cfg(target_os = "windows")] {
        mod windows;
        pub use windows::list_devices;
    } else {
        /// List storage devices (unsupported platform)
        ///
        /// # Errors
        ///
        /// Always returns [`DetectError::UnsupportedPlatform`].
        pub fn list_devices() -> Result<Vec<DeviceInfo>> {
            Err(DetectError::UnsupportedPlatform)
        }
    }
}

// ============================================================================
// UNIT TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_info_builder() {
        let device = DeviceInfo::new("/dev/sdb")
            .with_model("SanDisk Ultra")
            .with_size(32 * 1024 * 1024 * 1024)
            .with_removable(true);

        assert_eq!(device.path, "/dev/sdb");
        assert_eq!(device.model.as_deref(), Some("SanDisk Ultra"));
        assert_eq!(device.size, 32 * 1024 * 1024 * 1024);
        assert!(device.removable);
    }

    #[test]
    fn test_device_info_default() {
        let device = DeviceInfo::default();
        assert!(device.path.is_empty());
        assert!(device.model.is_none());
        assert_eq!(device.size, 0);
        assert!(!device.removable);
    }

    #[test]
    fn test_size_display() {
        let device = DeviceInfo::new("/dev/sdb").with_size(32 * 1024 * 1024 * 1024);
        assert_eq!(device.size_display(), "32.0 GB");

        let device = DeviceInfo::new("/dev/sdc").with_size(1536);
        assert_eq!(device.size_display(), "1.5 KB");
    }

    #[test]
    fn test_display_name_falls_back_to_path() {
        let device = DeviceInfo::new("/dev/sdb").with_model("Kingston DataTraveler");
        assert_eq!(device.display_name(), "Kingston DataTraveler");

        let device = DeviceInfo::new("/dev/sdb");
        assert_eq!(device.display_name(), "/dev/sdb");
    }

    #[test]
    fn test_device_info_serialization() {
        let device = DeviceInfo::new("/dev/sdb")
            .with_model("Test")
            .with_size(1024)
            .with_removable(true);

        let json = serde_json::to_string(&device).expect("Should serialize");
        assert!(json.contains("/dev/sdb"));

        let deserialized: DeviceInfo = serde_json::from_str(&json).expect("Should deserialize");
        assert_eq!(deserialized.path, "/dev/sdb");
        assert!(deserialized.removable);
    }

    #[test]
    fn test_error_display() {
        let err = DetectError::EnumerationFailed("test error".to_string());
        assert_eq!(err.to_string(), "Failed to enumerate devices: test error");

        let err = DetectError::UnsupportedPlatform;
        assert_eq!(err.to_string(), "Platform not supported");
    }
}
