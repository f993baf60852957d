//! rawcopy - a minimal dd-style block copier for files and raw devices
//!
//! # Usage
//!
//! ```bash
//! # Copy a file
//! rawcopy if=disk.img of=/dev/sdb
//!
//! # Copy one 4 KB block with periodic progress
//! rawcopy if=/dev/sda of=backup.img bs=4k count=1 status=progress
//!
//! # List storage devices
//! rawcopy list
//! ```

use anyhow::Result;
use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;
mod operands;

use operands::Request;

/// rawcopy - a minimal dd-style block copier for files and raw devices
#[derive(Parser)]
#[command(name = "rawcopy")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all log output
    #[arg(short, long)]
    quiet: bool,

    /// dd-style operands: if=<path> of=<path> [bs=N] [count=N] [status=progress], or `list`
    #[arg(value_name = "OPERAND")]
    operands: Vec<String>,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", style("Error:").red().bold(), e);

        // Show cause chain when backtraces are requested
        if std::env::var("RUST_BACKTRACE").is_ok() {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  {} {}", style("Caused by:").yellow(), cause);
                source = cause.source();
            }
        }

        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout is reserved for status lines
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else if cli.quiet {
        EnvFilter::new("off")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match operands::parse(&cli.operands)? {
        Request::ListDevices => commands::list::execute(),
        Request::Copy(request) => commands::copy::execute(&request),
    }
}
