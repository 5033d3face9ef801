//! Page controllers for DRAM latency modeling.
//!
//! This module provides:
//! 1. **OpenPageController:** Keeps rows latched; row hits skip activation.
//! 2. **ClosePageController:** Closes the row after every access; fixed cost.
//! 3. **FixedLatencyController:** Flat latency per access, no row-buffer modeling.
//!
//! Controllers are `Send + Sync` so a driver may move the DRAM model across threads.

use tracing::{debug, trace};

use super::RowbufEntry;

/// Per-phase DRAM latencies, in cycles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DramTiming {
    /// Row activation (ACT).
    pub t_act: u64,
    /// Column access (CAS).
    pub t_cas: u64,
    /// Precharge (PRE).
    pub t_pre: u64,
    /// Bus transfer.
    pub t_bus: u64,
}

impl DramTiming {
    /// Cost of opening a row in an idle bank and reading a column from it.
    pub const fn activate_read(&self) -> u64 {
        self.t_bus + self.t_act + self.t_cas
    }

    /// Cost of reading a column from the row already latched in the bank.
    pub const fn row_hit(&self) -> u64 {
        self.t_cas + self.t_bus
    }

    /// Cost of closing the latched row, opening another and reading from it.
    pub const fn row_conflict(&self) -> u64 {
        self.t_pre + self.t_cas + self.t_act + self.t_bus
    }
}

/// Trait for page management strategies that report access latency in cycles.
pub trait PageController: Send + Sync {
    /// Returns the number of cycles for an access to `row_id` in `bank`.
    ///
    /// # Arguments
    ///
    /// * `bank` - Row-buffer state of the targeted bank. Controllers that keep
    ///   rows open update it; others leave it untouched.
    /// * `row_id` - Row targeted within the bank.
    ///
    /// # Returns
    ///
    /// Latency in simulation cycles.
    fn access_delay(&mut self, bank: &mut RowbufEntry, row_id: u64) -> u64;
}

/// Open-page controller; the activated row stays latched until a different row is needed.
#[derive(Clone, Copy, Debug)]
pub struct OpenPageController {
    timing: DramTiming,
}

impl OpenPageController {
    /// Creates an open-page controller with the given timing.
    pub const fn new(timing: DramTiming) -> Self {
        Self { timing }
    }
}

impl PageController for OpenPageController {
    fn access_delay(&mut self, bank: &mut RowbufEntry, row_id: u64) -> u64 {
        match bank.open_row() {
            None => {
                bank.open(row_id);
                trace!(row = row_id, "row buffer empty");
                self.timing.activate_read()
            }
            Some(open) if open == row_id => {
                trace!(row = row_id, "row buffer hit");
                self.timing.row_hit()
            }
            Some(open) => {
                bank.open(row_id);
                debug!(closed = open, opened = row_id, "row buffer conflict");
                self.timing.row_conflict()
            }
        }
    }
}

/// Close-page controller; every access activates, reads and precharges.
#[derive(Clone, Copy, Debug)]
pub struct ClosePageController {
    timing: DramTiming,
}

impl ClosePageController {
    /// Creates a close-page controller with the given timing.
    pub const fn new(timing: DramTiming) -> Self {
        Self { timing }
    }
}

impl PageController for ClosePageController {
    fn access_delay(&mut self, _bank: &mut RowbufEntry, _row_id: u64) -> u64 {
        self.timing.t_act + self.timing.t_cas + self.timing.t_bus
    }
}

/// Fixed-latency controller; every access takes the same number of cycles.
#[derive(Clone, Copy, Debug)]
pub struct FixedLatencyController {
    latency: u64,
}

impl FixedLatencyController {
    /// Creates a fixed controller with the given latency in cycles.
    pub const fn new(latency: u64) -> Self {
        Self { latency }
    }
}

impl PageController for FixedLatencyController {
    fn access_delay(&mut self, _bank: &mut RowbufEntry, _row_id: u64) -> u64 {
        self.latency
    }
}
