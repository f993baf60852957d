//! List command - displays storage devices

use anyhow::{Context, Result};
use console::style;

/// Execute the list command
pub fn execute() -> Result<()> {
    let devices = rawcopy_detect::list_devices().context("Failed to list storage devices")?;

    if devices.is_empty() {
        println!("No storage devices found.");
        return Ok(());
    }

    println!(
        "{} {} device(s):\n",
        style("Found").green().bold(),
        devices.len()
    );

    for device in &devices {
        let kind = if device.removable {
            style("removable").cyan()
        } else {
            style("internal").yellow()
        };

        println!(
            "  {} {} ({}, {})",
            style(&device.path).white().bold(),
            device.display_name(),
            device.size_display(),
            kind
        );
    }

    Ok(())
}
