//! Trace-driven driver around the cache and DRAM models.
//!
//! Owns both components and the cycle counter. For each reference: look up
//! the cache; on a miss, read the line from DRAM, install it, and write the
//! victim back to DRAM if it was dirty. Each reference advances the clock by
//! one cycle; fill latency is accumulated separately as stall cycles and
//! writebacks are off the critical path.

use memsim_core::common::{ConfigError, LineAddr};
use memsim_core::{Cache, Config, Dram};
use tracing::debug;

use crate::trace::MemRef;

/// Cache plus DRAM plus the global cycle counter.
#[derive(Debug)]
pub struct Driver {
    /// The simulated cache.
    pub cache: Cache,
    /// The simulated DRAM module.
    pub dram: Dram,
    cycle: u64,
    stall_cycles: u64,
    writebacks: u64,
}

impl Driver {
    /// Builds both components from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::LineSizeMismatch`] if the cache and DRAM
    /// disagree on the line size, and propagates the cache or DRAM
    /// construction error otherwise.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            cache: Cache::new(&config.cache)?,
            dram: Dram::new(&config.dram)?,
            cycle: 0,
            stall_cycles: 0,
            writebacks: 0,
        })
    }

    /// Current cycle.
    pub const fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Total DRAM fill latency seen by missing references.
    pub const fn stall_cycles(&self) -> u64 {
        self.stall_cycles
    }

    /// Number of dirty victims written back to DRAM.
    pub const fn writebacks(&self) -> u64 {
        self.writebacks
    }

    /// Applies one reference and returns the stall it caused, in cycles.
    pub fn step(&mut self, r: &MemRef) -> u64 {
        let line = LineAddr::from_byte_addr(r.addr, self.cache.line_bytes());
        let now = self.cycle;
        let mut stall = 0;

        if !self.cache.access(line, r.is_write, r.core, now).is_hit() {
            stall = self.dram.access(line, false);
            self.cache.install(line, r.is_write, r.core, now);

            if let Some(victim) = self.cache.last_evicted().filter(|v| v.needs_writeback()) {
                let victim_line = victim.line_addr();
                let _ = self.dram.access(victim_line, true);
                self.writebacks += 1;
                debug!(victim = victim_line.val(), cycle = now, "writeback");
            }
        }

        self.cycle += 1;
        self.stall_cycles += stall;
        stall
    }

    /// Applies every reference in order.
    pub fn run(&mut self, refs: &[MemRef]) {
        for r in refs {
            let _ = self.step(r);
        }
    }
}
