//! Line address and core identifier types.
//!
//! This module defines strong types for the values the driver hands to the
//! memory model. It provides the following:
//! 1. **Type Safety:** Distinguishes line-granular addresses from byte addresses at compile time.
//! 2. **Address Manipulation:** Conversion from byte addresses and raw value access.
//! 3. **Attribution:** An opaque core identifier used only for bookkeeping and partitioning.

/// An address expressed in units of one cache line.
///
/// The line-offset bits have already been removed, so consecutive values name
/// consecutive cache lines. Both the cache and the DRAM model consume this type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineAddr(pub u64);

impl LineAddr {
    /// Creates a new line address from a raw line number.
    ///
    /// # Arguments
    ///
    /// * `line` - The raw line number.
    ///
    /// # Returns
    ///
    /// A new `LineAddr` wrapping the provided value.
    #[inline(always)]
    pub const fn new(line: u64) -> Self {
        Self(line)
    }

    /// Converts a byte address into a line address by dropping the offset bits.
    ///
    /// # Arguments
    ///
    /// * `byte_addr` - The byte address issued by a core.
    /// * `line_bytes` - The cache line size in bytes. Must be non-zero.
    ///
    /// # Returns
    ///
    /// The line containing `byte_addr`.
    #[inline(always)]
    pub const fn from_byte_addr(byte_addr: u64, line_bytes: u64) -> Self {
        Self(byte_addr / line_bytes)
    }

    /// Returns the raw line number.
    #[inline(always)]
    pub const fn val(self) -> u64 {
        self.0
    }
}

impl From<u64> for LineAddr {
    fn from(line: u64) -> Self {
        Self(line)
    }
}

/// Identifier of the simulated core that issued a reference.
///
/// Core identifiers are never validated against a core count; any value is
/// accepted and stored on the lines the core installs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CoreId(pub u32);

impl CoreId {
    /// Returns the raw identifier.
    #[inline(always)]
    pub const fn val(self) -> u32 {
        self.0
    }
}

impl From<u32> for CoreId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}
