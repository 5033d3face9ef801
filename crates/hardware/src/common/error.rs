//! Construction-time error definitions.
//!
//! Access, install and DRAM access never fail. The only error surface of the
//! model is a geometry or timing configuration that would leave the address
//! decomposition undefined; those are reported here before any state is built.

use thiserror::Error;

/// Errors raised while validating a cache or DRAM configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A geometry parameter that must be positive was zero.
    #[error("{0} must be non-zero")]
    ZeroParameter(&'static str),

    /// The cache size is not a whole number of sets.
    #[error("cache size {size} is not divisible by ways ({ways}) x line size ({line_bytes})")]
    NotDivisible {
        /// Total cache size in bytes.
        size: u64,
        /// Associativity.
        ways: u64,
        /// Line size in bytes.
        line_bytes: u64,
    },

    /// `ways * line_bytes` does not fit in 64 bits.
    #[error("set size overflows: {ways} ways x {line_bytes} bytes")]
    SetSizeOverflow {
        /// Associativity.
        ways: u64,
        /// Line size in bytes.
        line_bytes: u64,
    },

    /// The derived set count cannot be indexed with a bitmask.
    #[error("set count {0} is not a power of two")]
    SetsNotPowerOfTwo(u64),

    /// The static partition gives core 0 more ways than a set holds.
    #[error("core 0 way quota {quota} exceeds associativity {ways}")]
    QuotaExceedsWays {
        /// Ways reserved for core 0.
        quota: u64,
        /// Associativity.
        ways: u64,
    },

    /// The DRAM row buffer does not hold a whole number of cache lines.
    #[error("row buffer size {row_bytes} is not a multiple of line size {line_bytes}")]
    RowNotLineMultiple {
        /// Row buffer size in bytes.
        row_bytes: u64,
        /// Line size in bytes.
        line_bytes: u64,
    },

    /// The cache and DRAM were configured with different line sizes.
    #[error("cache line size {cache} differs from DRAM line size {dram}")]
    LineSizeMismatch {
        /// Cache line size in bytes.
        cache: u64,
        /// DRAM line size in bytes.
        dram: u64,
    },

    /// The configuration document could not be parsed.
    #[error("malformed configuration document: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
