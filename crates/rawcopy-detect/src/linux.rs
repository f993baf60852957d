//! Linux device enumeration
//!
//! Reads whole-disk entries from `/sys/block`; sizes are reported there in
//! 512-byte sectors regardless of the device's logical sector size.

use super::{DetectError, DeviceInfo, Result};
use std::fs;
use std::path::Path;

/// List storage devices on Linux
///
/// # Errors
///
/// Returns an error if `/sys/block` does not exist or cannot be read.
pub fn list_devices() -> Result<Vec<DeviceInfo>> {
    let block_dir = Path::new("/sys/block");
    if !block_dir.exists() {
        return Err(DetectError::EnumerationFailed(
            "/sys/block not found".to_string(),
        ));
    }

    let mut devices = Vec::new();

    for entry in fs::read_dir(block_dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();

        if should_skip_device(&name) {
            continue;
        }

        if let Some(device) = read_block_device(&name) {
            devices.push(device);
        }
    }

    Ok(devices)
}

/// Check if a block device name is a virtual or non-disk device
pub(crate) fn should_skip_device(name: &str) -> bool {
    name.starts_with("loop")
        || name.starts_with("ram")
        || name.starts_with("dm-")
        || name.starts_with("zram")
        || name.starts_with("sr")  // CD/DVD drives
        || name.starts_with("fd") // Floppy drives
}

/// Read one device from its /sys/block entry
fn read_block_device(name: &str) -> Option<DeviceInfo> {
    let sys_path = format!("/sys/block/{name}");

    let size = read_sys_value(&format!("{sys_path}/size"))
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(sectors_to_bytes)?;

    if size == 0 {
        tracing::debug!(device = name, "skipping zero-size device");
        return None;
    }

    let removable = read_sys_value(&format!("{sys_path}/removable"))
        .map(|s| s.trim() == "1")
        .unwrap_or(false);

    let model = read_sys_value(&format!("{sys_path}/device/model"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let mut device = DeviceInfo::new(format!("/dev/{name}"))
        .with_size(size)
        .with_removable(removable);
    if let Some(model) = model {
        device = device.with_model(model);
    }

    Some(device)
}

/// /sys/block sizes are in 512-byte sectors
pub(crate) fn sectors_to_bytes(sectors: u64) -> u64 {
    sectors * 512
}

fn read_sys_value(path: &str) -> Option<String> {
    fs::read_to_string(path).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_skip_virtual_devices() {
        assert!(should_skip_device("loop0"));
        assert!(should_skip_device("ram1"));
        assert!(should_skip_device("dm-0"));
        assert!(should_skip_device("zram0"));
        assert!(should_skip_device("sr0"));
        assert!(should_skip_device("fd0"));
    }

    #[test]
    fn test_should_keep_disk_devices() {
        assert!(!should_skip_device("sda"));
        assert!(!should_skip_device("sdb"));
        assert!(!should_skip_device("nvme0n1"));
        assert!(!should_skip_device("mmcblk0"));
        assert!(!should_skip_device("vda"));
    }

    #[test]
    fn test_sectors_to_bytes() {
        assert_eq!(sectors_to_bytes(0), 0);
        assert_eq!(sectors_to_bytes(1), 512);
        // A "16 GB" card: 31,250,000 sectors
        assert_eq!(sectors_to_bytes(31_250_000), 16_000_000_000);
    }
}
