//! Banked DRAM Timing Model.
//!
//! This module implements the DRAM half of the memory hierarchy. It provides:
//! 1. **Address mapping:** Line address to (bank, row), banks interleaved at row granularity.
//! 2. **Row buffers:** One open-row latch per bank, persisting for the module's lifetime.
//! 3. **Controller:** Page-policy-dependent latency (see [`controller`]).
//!
//! Accesses are evaluated in isolation: there is no queueing, refresh or
//! bank contention, and an access never fails.

/// Page controller implementations for access latency modeling.
pub mod controller;

use tracing::trace;

use self::controller::{
    ClosePageController, DramTiming, FixedLatencyController, OpenPageController, PageController,
};
use crate::common::{ConfigError, LineAddr};
use crate::config::{DramConfig, DramMode, PagePolicy};
use crate::stats::DramStats;

/// Row-buffer state of one bank.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RowbufEntry {
    /// Whether a row is latched.
    pub valid: bool,
    /// The latched row; meaningful only while `valid`.
    pub row_id: u64,
}

impl RowbufEntry {
    /// The latched row, if any.
    pub const fn open_row(&self) -> Option<u64> {
        if self.valid { Some(self.row_id) } else { None }
    }

    /// Latches `row_id`, replacing whatever was open.
    pub const fn open(&mut self, row_id: u64) {
        self.valid = true;
        self.row_id = row_id;
    }
}

/// Bank and row targeted by a line address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowLocation {
    /// Bank index, `page % num_banks`.
    pub bank: usize,
    /// Row within the bank, `page / num_banks`.
    pub row: u64,
}

/// DRAM module with per-bank row buffers.
///
/// # Examples
///
/// ```
/// use memsim_core::common::LineAddr;
/// use memsim_core::config::DramConfig;
/// use memsim_core::dram::Dram;
///
/// let mut dram = Dram::new(&DramConfig::default()).unwrap();
/// let first = dram.access(LineAddr(80), false);
/// let again = dram.access(LineAddr(81), false);
/// assert_eq!(first, 100);
/// assert_eq!(again, 55);
/// ```
pub struct Dram {
    row_buffers: Vec<RowbufEntry>,
    lines_per_row: u64,
    num_banks: u64,
    controller: Box<dyn PageController>,
    stats: DramStats,
}

impl std::fmt::Debug for Dram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dram")
            .field("num_banks", &self.num_banks)
            .field("lines_per_row", &self.lines_per_row)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl Dram {
    /// Creates a DRAM module with every row buffer empty and zeroed statistics.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the bank count or line size is zero, or
    /// the row buffer is not a non-zero multiple of the line size.
    pub fn new(config: &DramConfig) -> Result<Self, ConfigError> {
        if config.num_banks == 0 {
            return Err(ConfigError::ZeroParameter("bank count"));
        }
        if config.line_bytes == 0 {
            return Err(ConfigError::ZeroParameter("line size"));
        }
        if config.row_buffer_bytes == 0 || config.row_buffer_bytes % config.line_bytes != 0 {
            return Err(ConfigError::RowNotLineMultiple {
                row_bytes: config.row_buffer_bytes,
                line_bytes: config.line_bytes,
            });
        }

        let timing = DramTiming {
            t_act: config.t_act,
            t_cas: config.t_cas,
            t_pre: config.t_pre,
            t_bus: config.t_bus,
        };
        let controller: Box<dyn PageController> = match (config.mode, config.page_policy) {
            (DramMode::Fixed, _) => Box::new(FixedLatencyController::new(config.fixed_latency)),
            (DramMode::RowBuffer, PagePolicy::OpenPage) => {
                Box::new(OpenPageController::new(timing))
            }
            (DramMode::RowBuffer, PagePolicy::ClosePage) => {
                Box::new(ClosePageController::new(timing))
            }
        };

        Ok(Self {
            row_buffers: vec![RowbufEntry::default(); config.num_banks as usize],
            lines_per_row: config.row_buffer_bytes / config.line_bytes,
            num_banks: config.num_banks,
            controller,
            stats: DramStats::default(),
        })
    }

    /// Maps a line address to its bank and row.
    ///
    /// Consecutive lines share a row; consecutive rows go to consecutive banks.
    pub const fn locate(&self, addr: LineAddr) -> RowLocation {
        let page = addr.0 / self.lines_per_row;
        RowLocation {
            bank: (page % self.num_banks) as usize,
            row: page / self.num_banks,
        }
    }

    /// Performs one access and returns its latency in cycles.
    ///
    /// The latency and one access are charged to the read or write statistics.
    ///
    /// # Arguments
    ///
    /// * `addr` - Line address (in cache-line units, not bytes).
    /// * `is_write` - Whether this is a writeback rather than a fill.
    pub fn access(&mut self, addr: LineAddr, is_write: bool) -> u64 {
        let loc = self.locate(addr);
        let delay = self
            .controller
            .access_delay(&mut self.row_buffers[loc.bank], loc.row);
        self.stats.record(is_write, delay);
        trace!(line = addr.val(), bank = loc.bank, row = loc.row, is_write, delay, "dram access");
        delay
    }

    /// Row-buffer state of every bank, in bank order.
    pub fn row_buffers(&self) -> &[RowbufEntry] {
        &self.row_buffers
    }

    /// Number of banks.
    pub const fn num_banks(&self) -> u64 {
        self.num_banks
    }

    /// Cache lines held by one row.
    pub const fn lines_per_row(&self) -> u64 {
        self.lines_per_row
    }

    /// Cumulative counters.
    pub const fn stats(&self) -> &DramStats {
        &self.stats
    }
}
