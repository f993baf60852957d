//! Copy command - runs the block transfer
//!
//! Validates the transfer config, opens both streams, and hands them to
//! the engine with a stdout sink for status lines. Everything the engine
//! reports as an error lands on stderr via the caller; status lines never
//! do.

use anyhow::Result;
use std::fs::{self, File, OpenOptions};

use crate::operands::CopyRequest;
use rawcopy_core::{CopyEngine, Error, TransferConfig};

/// Execute the copy command
pub fn execute(request: &CopyRequest) -> Result<()> {
    let config = TransferConfig::new()
        .block_size(request.block_size)
        .block_limit(request.count)
        .report_progress(request.progress);

    // Reject a bad config before either stream is opened
    config.validate()?;

    let source = File::open(&request.input).map_err(|e| Error::Open {
        path: request.input.clone(),
        source: e,
    })?;
    let dest = open_destination(&request.output).map_err(|e| Error::Open {
        path: request.output.clone(),
        source: e,
    })?;

    let mut engine = CopyEngine::with_config(config).on_progress(|line| println!("{line}"));

    let result = engine.run(source, dest)?;
    tracing::debug!(
        bytes = result.bytes_copied,
        blocks = result.blocks_copied,
        elapsed_us = result.elapsed.as_micros() as u64,
        "transfer finished"
    );

    Ok(())
}

/// Open the destination for writing.
///
/// An existing regular file is truncated so the result matches the source
/// exactly; device nodes and other special files are written in place,
/// and a missing path is created.
fn open_destination(path: &str) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true);

    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => {
            options.truncate(true);
        }
        Ok(_) => {}
        Err(_) => {
            options.create(true);
        }
    }

    options.open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_open_destination_truncates_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.bin");
        fs::write(&path, vec![0xFFu8; 1000]).unwrap();

        let mut dest = open_destination(path.to_str().unwrap()).unwrap();
        dest.write_all(b"short").unwrap();
        drop(dest);

        assert_eq!(fs::read(&path).unwrap(), b"short");
    }

    #[test]
    fn test_open_destination_creates_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fresh.bin");

        let dest = open_destination(path.to_str().unwrap());
        assert!(dest.is_ok());
        assert!(path.exists());
    }

    #[test]
    fn test_open_destination_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("no_such_dir").join("out.bin");

        assert!(open_destination(path.to_str().unwrap()).is_err());
    }
}
