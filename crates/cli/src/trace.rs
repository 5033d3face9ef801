//! Memory reference trace parsing.
//!
//! One reference per line: `<core_id> <R|W> <byte address>`. The address is
//! hexadecimal, with or without a `0x` prefix. Blank lines and lines starting
//! with `#` are skipped.

use std::io::BufRead;

use memsim_core::common::CoreId;
use thiserror::Error;

/// A single memory reference issued by a simulated core.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemRef {
    /// Issuing core.
    pub core: CoreId,
    /// Store (`W`) or load (`R`).
    pub is_write: bool,
    /// Byte address.
    pub addr: u64,
}

/// Errors raised while reading a trace.
#[derive(Error, Debug)]
pub enum TraceError {
    /// The underlying reader failed.
    #[error("failed to read trace: {0}")]
    Io(#[from] std::io::Error),

    /// A line did not have the `<core> <R|W> <addr>` shape.
    #[error("line {line}: {reason}")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },
}

/// Parses one non-comment trace line.
///
/// Returns `Ok(None)` for blank and comment lines.
///
/// # Errors
///
/// Returns [`TraceError::Malformed`] if a field is missing, unparsable, or
/// there are trailing fields.
pub fn parse_line(text: &str, line: usize) -> Result<Option<MemRef>, TraceError> {
    let text = text.trim();
    if text.is_empty() || text.starts_with('#') {
        return Ok(None);
    }

    let malformed = |reason: String| TraceError::Malformed { line, reason };
    let mut fields = text.split_whitespace();
    let (Some(core), Some(op), Some(addr), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(malformed(format!("expected `<core> <R|W> <addr>`, got `{text}`")));
    };

    let core = core
        .parse::<u32>()
        .map_err(|e| malformed(format!("bad core id `{core}`: {e}")))?;
    let is_write = match op {
        "R" | "r" => false,
        "W" | "w" => true,
        other => return Err(malformed(format!("bad access type `{other}`"))),
    };
    let digits = addr
        .strip_prefix("0x")
        .or_else(|| addr.strip_prefix("0X"))
        .unwrap_or(addr);
    let addr = u64::from_str_radix(digits, 16)
        .map_err(|e| malformed(format!("bad address `{addr}`: {e}")))?;

    Ok(Some(MemRef {
        core: CoreId(core),
        is_write,
        addr,
    }))
}

/// Reads every reference from `reader`, stopping at the first error.
///
/// # Errors
///
/// Returns the first I/O or parse error encountered.
pub fn read_trace<R: BufRead>(reader: R) -> Result<Vec<MemRef>, TraceError> {
    let mut refs = Vec::new();
    for (idx, text) in reader.lines().enumerate() {
        if let Some(r) = parse_line(&text?, idx + 1)? {
            refs.push(r);
        }
    }
    Ok(refs)
}
