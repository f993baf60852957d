//! Transfer configuration

use crate::error::{Error, Result};

/// Default block size for copy operations (4 KB)
pub const DEFAULT_BLOCK_SIZE: usize = 4096;

/// Validated parameters for one copy operation
#[derive(Debug, Clone)]
pub struct TransferConfig {
    /// Block size for read/write operations, in bytes
    pub block_size: usize,

    /// Maximum number of blocks to copy; `None` means unbounded
    pub block_limit: Option<u64>,

    /// Whether to emit periodic progress lines while copying
    pub report_progress: bool,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            block_limit: None,
            report_progress: false,
        }
    }
}

impl TransferConfig {
    /// Create a new config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set block size
    #[must_use]
    pub fn block_size(mut self, size: usize) -> Self {
        self.block_size = size;
        self
    }

    /// Set the block-count limit
    #[must_use]
    pub fn block_limit(mut self, limit: Option<u64>) -> Self {
        self.block_limit = limit;
        self
    }

    /// Set periodic progress reporting
    #[must_use]
    pub fn report_progress(mut self, report: bool) -> Self {
        self.report_progress = report;
        self
    }

    /// Check that the parameters permit a transfer at all.
    ///
    /// Must pass before any I/O is attempted; the engine calls it again
    /// defensively at the top of [`crate::CopyEngine::run`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the block size is zero.
    pub fn validate(&self) -> Result<()> {
        if self.block_size == 0 {
            return Err(Error::InvalidConfig(
                "block size must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = TransferConfig::default();
        assert_eq!(config.block_size, DEFAULT_BLOCK_SIZE);
        assert_eq!(config.block_limit, None);
        assert!(!config.report_progress);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = TransferConfig::new()
            .block_size(1024)
            .block_limit(Some(16))
            .report_progress(true);

        assert_eq!(config.block_size, 1024);
        assert_eq!(config.block_limit, Some(16));
        assert!(config.report_progress);
    }

    #[test]
    fn test_config_zero_block_size_rejected() {
        let config = TransferConfig::new().block_size(0);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_config_zero_block_limit_is_valid() {
        // A limit of zero blocks is a legal request to copy nothing
        let config = TransferConfig::new().block_limit(Some(0));
        assert!(config.validate().is_ok());
    }
}
