//! dd-style operand parsing
//!
//! The command line is a list of `key=value` tokens (`if=`, `of=`, `bs=`,
//! `count=`, `status=`) plus the bare `list` token, which short-circuits
//! everything else.

use anyhow::{anyhow, Context, Result};
use rawcopy_core::DEFAULT_BLOCK_SIZE;

/// Usage text shown on operand errors
pub const USAGE: &str = "Usage: rawcopy if=<in_file> of=<out_file> [bs=N] [count=N] [status=progress]\n       rawcopy list";

/// What the operands ask the tool to do
#[derive(Debug, PartialEq, Eq)]
pub enum Request {
    /// Copy from an input to an output
    Copy(CopyRequest),
    /// Enumerate storage devices instead of copying
    ListDevices,
}

/// A parsed copy invocation
#[derive(Debug, PartialEq, Eq)]
pub struct CopyRequest {
    pub input: String,
    pub output: String,
    pub block_size: usize,
    pub count: Option<u64>,
    pub progress: bool,
}

/// Parse the operand tokens into a request.
///
/// A `list` token wins immediately, no matter what surrounds it. Unknown
/// keys are rejected rather than ignored, so a mistyped `bs=`/`count=`
/// cannot silently fall back to defaults.
pub fn parse(tokens: &[String]) -> Result<Request> {
    let mut input: Option<String> = None;
    let mut output: Option<String> = None;
    let mut block_size = DEFAULT_BLOCK_SIZE;
    let mut count = None;
    let mut progress = false;

    for token in tokens {
        if token == "list" {
            return Ok(Request::ListDevices);
        }

        let (key, value) = token
            .split_once('=')
            .ok_or_else(|| anyhow!("unrecognized operand '{token}'\n{USAGE}"))?;

        match key {
            "if" => input = Some(value.to_string()),
            "of" => output = Some(value.to_string()),
            "bs" => block_size = parse_size(value)?,
            "count" => {
                count = Some(
                    value
                        .parse::<u64>()
                        .with_context(|| format!("Invalid count: {value}"))?,
                );
            }
            "status" => progress = value == "progress",
            _ => return Err(anyhow!("unrecognized operand '{token}'\n{USAGE}")),
        }
    }

    let input = input.filter(|s| !s.is_empty());
    let output = output.filter(|s| !s.is_empty());

    match (input, output) {
        (Some(input), Some(output)) => Ok(Request::Copy(CopyRequest {
            input,
            output,
            block_size,
            count,
            progress,
        })),
        _ => Err(anyhow!("if= and of= operands are required\n{USAGE}")),
    }
}

/// Parse a block size with optional `k`/`m`/`g` suffix (powers of 1024).
///
/// Zero is accepted here; the transfer config rejects it before any I/O.
fn parse_size(s: &str) -> Result<usize> {
    let t = s.trim();

    let (num_str, multiplier): (&str, usize) = match t.chars().last() {
        Some('k' | 'K') => (&t[..t.len() - 1], 1 << 10),
        Some('m' | 'M') => (&t[..t.len() - 1], 1 << 20),
        Some('g' | 'G') => (&t[..t.len() - 1], 1 << 30),
        _ => (t, 1),
    };

    let num: usize = num_str
        .parse()
        .with_context(|| format!("Invalid block size: {s}"))?;

    num.checked_mul(multiplier)
        .ok_or_else(|| anyhow!("Block size too large: {s}"))
}
