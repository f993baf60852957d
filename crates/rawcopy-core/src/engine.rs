//! Block copy engine
//!
//! This module provides the transfer loop at the center of rawcopy:
//! - Block-based reads and verbatim writes with running byte/block counters
//! - Optional block-count limit
//! - Periodic progress lines on a one-second wall-clock cadence
//! - A final status line on every terminal state reached after copying began

use crate::clock::{Clock, MonotonicClock};
use crate::config::TransferConfig;
use crate::error::Error;
use crate::progress::{self, REPORT_INTERVAL};
use std::io::{Read, Write};
use std::time::Duration;
use thiserror::Error as ThisError;

/// Progress sink: receives fully formatted status lines
pub type ProgressCallback = Box<dyn Fn(&str) + Send + Sync>;

/// Result of a completed copy operation
#[derive(Debug, Clone, Default)]
pub struct CopyResult {
    /// Total bytes copied (read and fully written)
    pub bytes_copied: u64,

    /// Number of blocks copied
    pub blocks_copied: u64,

    /// Time elapsed from first I/O attempt to the terminal state
    pub elapsed: Duration,
}

/// A copy failure, carrying the counters accumulated before the error
#[derive(Debug, ThisError)]
#[error("{source}")]
pub struct CopyError {
    /// What went wrong
    #[source]
    pub source: Error,

    /// Bytes/blocks transferred before the failure
    pub partial: CopyResult,
}

/// Counters for one copy operation, owned by the engine for its duration
#[derive(Debug)]
struct TransferState {
    bytes_read: u64,
    bytes_written: u64,
    blocks_copied: u64,
    started_at: Duration,
    last_report_at: Option<Duration>,
    bytes_at_last_report: u64,
}

impl TransferState {
    fn new(started_at: Duration) -> Self {
        Self {
            bytes_read: 0,
            bytes_written: 0,
            blocks_copied: 0,
            started_at,
            last_report_at: None,
            bytes_at_last_report: 0,
        }
    }
}

/// Copy engine for block stream transfers
pub struct CopyEngine<C = MonotonicClock> {
    config: TransferConfig,
    clock: C,
    progress_callback: Option<ProgressCallback>,
}

impl CopyEngine<MonotonicClock> {
    /// Create a new engine with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(TransferConfig::default())
    }

    /// Create a new engine with custom configuration
    #[must_use]
    pub fn with_config(config: TransferConfig) -> Self {
        Self::with_clock(config, MonotonicClock::new())
    }
}

impl Default for CopyEngine<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> CopyEngine<C> {
    /// Create an engine driven by the given clock
    pub fn with_clock(config: TransferConfig, clock: C) -> Self {
        Self {
            config,
            clock,
            progress_callback: None,
        }
    }

    /// Set the sink for progress and status lines
    #[must_use]
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.progress_callback = Some(Box::new(callback));
        self
    }

    /// Get the engine's configuration
    pub fn config(&self) -> &TransferConfig {
        &self.config
    }

    /// Copy from source to destination.
    ///
    /// Reads up to `block_size` bytes at a time and writes each block in
    /// full before the next read. Stops at end of input or once
    /// `block_limit` blocks have been copied. A final status line is
    /// emitted through the sink on every terminal state reached after
    /// copying began, whether or not periodic reporting is enabled.
    ///
    /// # Errors
    ///
    /// Returns a [`CopyError`] carrying the partial [`CopyResult`] when the
    /// configuration is invalid, a read or write fails, or a write is
    /// short. Writes are never retried.
    pub fn run<R, W>(&mut self, mut source: R, mut dest: W) -> Result<CopyResult, CopyError>
    where
        R: Read,
        W: Write,
    {
        if let Err(e) = self.config.validate() {
            return Err(CopyError {
                source: e,
                partial: CopyResult::default(),
            });
        }

        tracing::debug!(
            block_size = self.config.block_size,
            block_limit = ?self.config.block_limit,
            "starting copy"
        );

        let mut buffer = vec![0u8; self.config.block_size];
        let mut state = TransferState::new(self.clock.now());

        loop {
            if let Some(limit) = self.config.block_limit {
                if state.blocks_copied >= limit {
                    break;
                }
            }

            if self.config.report_progress {
                self.report_if_due(&mut state);
            }

            let len = match read_block(&mut source, &mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) => return Err(self.fail(&state, Error::Read(e))),
            };
            state.bytes_read += len as u64;

            // The whole block must land before the next read; a short
            // write is a failure, not a retry.
            match dest.write(&buffer[..len]) {
                Ok(n) if n == len => {}
                Ok(n) => {
                    return Err(self.fail(
                        &state,
                        Error::PartialWrite {
                            expected: len,
                            actual: n,
                        },
                    ))
                }
                Err(e) => return Err(self.fail(&state, Error::Write(e))),
            }
            state.bytes_written += len as u64;
            state.blocks_copied += 1;
        }

        if let Err(e) = dest.flush() {
            return Err(self.fail(&state, Error::Write(e)));
        }

        let result = self.terminal(&state);
        tracing::debug!(
            bytes = result.bytes_copied,
            blocks = result.blocks_copied,
            "copy complete"
        );
        Ok(result)
    }

    /// Emit a periodic line if the cadence interval has elapsed.
    ///
    /// The first check only seeds the report timestamp.
    fn report_if_due(&self, state: &mut TransferState) {
        let now = self.clock.now();
        match state.last_report_at {
            None => state.last_report_at = Some(now),
            Some(last) if now.saturating_sub(last) >= REPORT_INTERVAL => {
                let line = progress::periodic_line(
                    state.bytes_written,
                    state.bytes_written - state.bytes_at_last_report,
                    now,
                    state.started_at,
                    last,
                );
                self.emit(&line);
                state.last_report_at = Some(now);
                state.bytes_at_last_report = state.bytes_written;
            }
            Some(_) => {}
        }
    }

    /// Emit the final status line and close out the counters.
    fn terminal(&self, state: &TransferState) -> CopyResult {
        debug_assert_eq!(state.bytes_written, state.bytes_read);
        let now = self.clock.now();
        let line = progress::final_line(state.bytes_written, now, state.started_at);
        self.emit(&line);
        CopyResult {
            bytes_copied: state.bytes_written,
            blocks_copied: state.blocks_copied,
            elapsed: now.saturating_sub(state.started_at),
        }
    }

    fn fail(&self, state: &TransferState, source: Error) -> CopyError {
        let now = self.clock.now();
        let line = progress::final_line(state.bytes_written, now, state.started_at);
        self.emit(&line);
        CopyError {
            source,
            partial: CopyResult {
                bytes_copied: state.bytes_written,
                blocks_copied: state.blocks_copied,
                elapsed: now.saturating_sub(state.started_at),
            },
        }
    }

    fn emit(&self, line: &str) {
        if let Some(callback) = &self.progress_callback {
            callback(line);
        }
    }
}

/// Issue a single read, retrying only on `Interrupted`.
///
/// A non-zero short read is a normal block; the buffer is not refilled.
fn read_block<R: Read>(source: &mut R, buffer: &mut [u8]) -> std::io::Result<usize> {
    loop {
        match source.read(buffer) {
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            other => return other,
        }
    }
}

// ============================================================================
// UNIT TESTS
// ============================================================================
