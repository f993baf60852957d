//! # rawcopy core
//!
//! Core library for the rawcopy block copier.
//!
//! ## Modules
//!
//! - `engine`: The block transfer loop with byte/block accounting
//! - `config`: Validated parameters for one copy operation
//! - `progress`: Periodic and final status-line construction
//! - `format`: Human-readable size and speed formatting
//! - `clock`: Wall-clock seam for the report cadence
//! - `error`: Error types and result alias
//!
//! ## Example
//!
//! ```no_run
//! use rawcopy_core::{CopyEngine, TransferConfig};
//! use std::fs::File;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = File::open("disk.img")?;
//! let dest = File::create("/dev/sdb")?;
//!
//! let config = TransferConfig::new()
//!     .block_size(4096)
//!     .report_progress(true);
//!
//! let mut engine = CopyEngine::with_config(config)
//!     .on_progress(|line| println!("{line}"));
//!
//! let result = engine.run(source, dest)?;
//! println!("copied {} blocks", result.blocks_copied);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod progress;

pub use clock::{Clock, MonotonicClock};
pub use config::{TransferConfig, DEFAULT_BLOCK_SIZE};
pub use engine::{CopyEngine, CopyError, CopyResult, ProgressCallback};
pub use error::{Error, Result};
pub use format::{format_size, format_speed};
pub use progress::{final_line, periodic_line, ProgressSample, REPORT_INTERVAL};
