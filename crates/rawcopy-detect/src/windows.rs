//! Windows device enumeration
//!
//! Shells out to PowerShell and parses WMI disk records from CSV output.

use super::{DetectError, DeviceInfo, Result};
use std::collections::HashMap;
use std::process::Command;

/// List storage devices on Windows
///
/// # Errors
///
/// Returns an error if PowerShell cannot be launched, exits unsuccessfully,
/// or produces output that cannot be parsed.
pub fn list_devices() -> Result<Vec<DeviceInfo>> {
    let ps_command = r#"Get-CimInstance -ClassName Win32_DiskDrive | Select-Object Index,Model,Size,MediaType | ConvertTo-Csv -NoTypeInformation"#;

    let output = Command::new("powershell")
        .args(["-NoProfile", "-NonInteractive", "-Command", ps_command])
        .output()
        .map_err(|e| DetectError::CommandFailed(format!("PowerShell failed: {e}")))?;

    if !output.status.success() {
        return Err(DetectError::CommandFailed(format!(
            "PowerShell failed: {}",
            String::from_utf8_lossy(&output.stderr)
        )));
    }

    let output_str = String::from_utf8_lossy(&output.stdout);
    parse_disk_csv(&output_str)
}

/// Parse PowerShell CSV output into devices
pub(crate) fn parse_disk_csv(csv: &str) -> Result<Vec<DeviceInfo>> {
    let mut devices = Vec::new();
    let mut lines = csv.lines();

    // First line is the header row
    let headers: Vec<String> = match lines.next() {
        Some(line) => parse_csv_line(line),
        None => return Ok(devices),
    };

    if headers.is_empty() {
        return Ok(devices);
    }

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields = parse_csv_line(line);
        if fields.len() != headers.len() {
            continue;
        }

        let mut row: HashMap<&str, &str> = HashMap::new();
        for (i, header) in headers.iter().enumerate() {
            if let Some(value) = fields.get(i) {
                row.insert(header.as_str(), value.as_str());
            }
        }

        let index = row
            .get("Index")
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(0);
        let size = row
            .get("Size")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(0);

        // Zero-size records are card readers with no media
        if size == 0 {
            continue;
        }

        let model = row
            .get("Model")
            .filter(|s| !s.is_empty())
            .map(|s| (*s).to_string());
        let removable = row
            .get("MediaType")
            .is_some_and(|m| m.contains("Removable") || m.contains("External"));

        let mut device = DeviceInfo::new(format!("\\\\.\\PhysicalDrive{index}"))
            .with_size(size)
            .with_removable(removable);
        if let Some(model) = model {
            device = device.with_model(model);
        }

        devices.push(device);
    }

    Ok(devices)
}

/// Parse a CSV line handling quoted fields
fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current = String::new();
            }
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());
    fields
}
