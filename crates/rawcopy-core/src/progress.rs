//! Status-line construction for periodic and final reports
//!
//! A report is derived from the engine's counters and two timestamps, and
//! rendered as one line:
//!
//! ```text
//! 10000 bytes (9.8 KB) copied, 0.2 s, 9.8 KB/s
//! ```
//!
//! When less than one second has passed since the start of the copy, the
//! speed field carries the raw byte count instead of a rate. That matches
//! the historical behavior of this line format and is kept as-is.

use crate::format::{format_size, format_speed};
use std::time::Duration;

/// Wall-clock interval between periodic progress reports
pub const REPORT_INTERVAL: Duration = Duration::from_secs(1);

/// One measurement, derived per report and immediately rendered
#[derive(Debug, Clone, Copy)]
pub struct ProgressSample {
    /// Total bytes copied so far
    pub total_bytes: u64,

    /// Time since the copy started
    pub elapsed: Duration,

    /// Bytes per second since the previous report, or the raw byte count
    /// for sub-second runs
    pub rate: f64,
}

#[allow(clippy::cast_precision_loss)]
fn sample(
    total_bytes: u64,
    bytes_since_last: u64,
    now: Duration,
    started_at: Duration,
    last_report_at: Duration,
) -> ProgressSample {
    let elapsed = now.saturating_sub(started_at);
    let since_last = now.saturating_sub(last_report_at);

    let rate = if elapsed >= REPORT_INTERVAL && !since_last.is_zero() {
        bytes_since_last as f64 / since_last.as_secs_f64()
    } else {
        bytes_since_last as f64
    };

    ProgressSample {
        total_bytes,
        elapsed,
        rate,
    }
}

fn render(sample: &ProgressSample) -> String {
    format!(
        "{} bytes ({}) copied, {:.1} s, {}",
        sample.total_bytes,
        format_size(sample.total_bytes),
        sample.elapsed.as_secs_f64(),
        format_speed(sample.rate)
    )
}

/// Build a periodic progress line from bytes transferred since the last report.
#[must_use]
pub fn periodic_line(
    total_bytes: u64,
    bytes_since_last: u64,
    now: Duration,
    started_at: Duration,
    last_report_at: Duration,
) -> String {
    render(&sample(
        total_bytes,
        bytes_since_last,
        now,
        started_at,
        last_report_at,
    ))
}

/// Build the final summary line for a finished (or failed) copy.
///
/// Equivalent to a periodic report covering the whole run, so a copy that
/// finished in under a second shows the byte count in the speed field.
#[must_use]
pub fn final_line(total_bytes: u64, now: Duration, started_at: Duration) -> String {
    periodic_line(total_bytes, total_bytes, now, started_at, started_at)
}
