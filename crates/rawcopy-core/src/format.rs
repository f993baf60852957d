//! Human-readable size and speed formatting
//!
//! Output text is part of the status-line contract, so both functions pick
//! the largest matching power-of-two band and render one decimal place.

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;

/// Format a byte count for display (e.g. "9.8 KB", "1.0 GB", "512 bytes")
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} bytes")
    }
}

/// Format a byte rate for display (e.g. "1.5 KB/s", "0.0 bytes/s")
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_speed(bytes_per_second: f64) -> String {
    if bytes_per_second >= GB as f64 {
        format!("{:.1} GB/s", bytes_per_second / GB as f64)
    } else if bytes_per_second >= MB as f64 {
        format!("{:.1} MB/s", bytes_per_second / MB as f64)
    } else if bytes_per_second >= KB as f64 {
        format!("{:.1} KB/s", bytes_per_second / KB as f64)
    } else {
        format!("{bytes_per_second:.1} bytes/s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // format_size tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_format_size_bytes() {
        assert_eq!(format_size(0), "0 bytes");
        assert_eq!(format_size(1), "1 bytes");
        assert_eq!(format_size(512), "512 bytes");
        assert_eq!(format_size(1023), "1023 bytes");
    }

    #[test]
    fn test_format_size_kilobytes() {
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(10_000), "9.8 KB");
    }

    #[test]
    fn test_format_size_megabytes() {
        assert_eq!(format_size(1024 * 1024), "1.0 MB");
        assert_eq!(format_size(500 * 1024 * 1024), "500.0 MB");
    }

    #[test]
    fn test_format_size_gigabytes() {
        assert_eq!(format_size(1_073_741_824), "1.0 GB");
        assert_eq!(format_size(32 * 1024 * 1024 * 1024), "32.0 GB");
    }

    #[test]
    fn test_format_size_band_boundaries() {
        // Exactly one band applies at each threshold
        assert_eq!(format_size(1024 * 1024 - 1), "1024.0 KB");
        assert_eq!(format_size(1024 * 1024 * 1024 - 1), "1024.0 MB");
    }

    // -------------------------------------------------------------------------
    // format_speed tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_format_speed_sub_kilobyte() {
        assert_eq!(format_speed(0.0), "0.0 bytes/s");
        assert_eq!(format_speed(512.0), "512.0 bytes/s");
        assert_eq!(format_speed(1023.9), "1023.9 bytes/s");
    }

    #[test]
    fn test_format_speed_bands() {
        assert_eq!(format_speed(1536.0), "1.5 KB/s");
        assert_eq!(format_speed(1024.0 * 1024.0), "1.0 MB/s");
        assert_eq!(format_speed(50.0 * 1024.0 * 1024.0), "50.0 MB/s");
        assert_eq!(format_speed(1024.0 * 1024.0 * 1024.0), "1.0 GB/s");
    }
}
