//! macOS device enumeration
//!
//! Shells out to `diskutil` for whole-disk names and per-disk details.
//! The plist output is scanned line by line; diskutil emits one key or
//! value per line, so a full plist parser is not needed.

use super::{DetectError, DeviceInfo, Result};
use std::collections::HashMap;
use std::process::Command;

/// List storage devices on macOS
///
/// # Errors
///
/// Returns an error if `diskutil` cannot be launched or its disk list
/// cannot be parsed. Disks whose details cannot be read are skipped.
pub fn list_devices() -> Result<Vec<DeviceInfo>> {
    let output = Command::new("diskutil")
        .args(["list", "-plist"])
        .output()
        .map_err(|e| DetectError::CommandFailed(format!("diskutil list failed: {e}")))?;

    if !output.status.success() {
        return Err(DetectError::CommandFailed(format!(
            "diskutil list failed: {}",
            String::from_utf8_lossy(&output.stderr)
        )));
    }

    let plist = String::from_utf8_lossy(&output.stdout);
    let disk_names = parse_whole_disks(&plist)?;

    let mut devices = Vec::new();
    for name in disk_names {
        match read_disk_info(&name) {
            Ok(Some(device)) => devices.push(device),
            Ok(None) => continue,
            Err(e) => {
                tracing::debug!(disk = %name, error = %e, "failed to read disk info");
                continue;
            }
        }
    }

    Ok(devices)
}

/// Extract the `WholeDisks` array from `diskutil list -plist` output
pub(crate) fn parse_whole_disks(plist: &str) -> Result<Vec<String>> {
    let mut disks = Vec::new();
    let mut in_whole_disks = false;
    let mut in_array = false;

    for line in plist.lines() {
        let trimmed = line.trim();

        if trimmed.contains("<key>WholeDisks</key>") {
            in_whole_disks = true;
            continue;
        }

        if in_whole_disks {
            if trimmed == "<array>" {
                in_array = true;
                continue;
            }
            if trimmed == "</array>" {
                break;
            }
            if in_array && trimmed.starts_with("<string>") && trimmed.ends_with("</string>") {
                let disk = trimmed
                    .trim_start_matches("<string>")
                    .trim_end_matches("</string>");
                disks.push(disk.to_string());
            }
        }
    }

    if disks.is_empty() {
        return Err(DetectError::ParseError(
            "No disks found in diskutil output".to_string(),
        ));
    }

    Ok(disks)
}

/// Read one disk via `diskutil info -plist`
fn read_disk_info(disk_name: &str) -> Result<Option<DeviceInfo>> {
    let output = Command::new("diskutil")
        .args(["info", "-plist", disk_name])
        .output()
        .map_err(|e| DetectError::CommandFailed(format!("diskutil info failed: {e}")))?;

    if !output.status.success() {
        return Ok(None);
    }

    let plist = String::from_utf8_lossy(&output.stdout);
    let info = parse_info_pairs(&plist);

    // Synthesized APFS disks shadow the physical ones
    if info.get("VirtualOrPhysical").map(String::as_str) == Some("Virtual") {
        return Ok(None);
    }

    let device_node = match info.get("DeviceNode") {
        Some(node) => node.clone(),
        None => return Ok(None),
    };

    let size = info
        .get("TotalSize")
        .or_else(|| info.get("Size"))
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0);
    if size == 0 {
        return Ok(None);
    }

    let removable = info.get("RemovableMedia").map(String::as_str) == Some("true")
        || info.get("Ejectable").map(String::as_str) == Some("true");

    let model = info.get("MediaName").cloned();

    let mut device = DeviceInfo::new(device_node)
        .with_size(size)
        .with_removable(removable);
    if let Some(model) = model {
        device = device.with_model(model);
    }

    Ok(Some(device))
}

/// Collect key/value pairs from `diskutil info -plist` output.
///
/// `<true/>`/`<false/>` become "true"/"false"; nested containers after a
/// key are ignored.
pub(crate) fn parse_info_pairs(plist: &str) -> HashMap<String, String> {
    let mut info = HashMap::new();
    let mut pending_key: Option<String> = None;

    for line in plist.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with("<key>") && trimmed.ends_with("</key>") {
            pending_key = Some(
                trimmed
                    .trim_start_matches("<key>")
                    .trim_end_matches("</key>")
                    .to_string(),
            );
            continue;
        }

        if let Some(key) = pending_key.take() {
            let value = if trimmed == "<true/>" {
                Some("true".to_string())
            } else if trimmed == "<false/>" {
                Some("false".to_string())
            } else if let Some(v) = strip_tag(trimmed, "string") {
                Some(v)
            } else if let Some(v) = strip_tag(trimmed, "integer") {
                Some(v)
            } else {
                None
            };

            if let Some(value) = value {
                info.insert(key, value);
            }
        }
    }

    info
}

fn strip_tag(line: &str, tag: &str) -> Option<String> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    if line.starts_with(&open) && line.ends_with(&close) {
        Some(
            line.trim_start_matches(&open)
                .trim_end_matches(&close)
                .to_string(),
        )
    } else {
        None
    }
}
