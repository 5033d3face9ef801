//! Cumulative statistics for the cache and DRAM models.
//!
//! This module keeps the counters and their textual dumps apart. It provides:
//! 1. **Counters:** Plain aggregates (`CacheStats`, `DramStats`) updated by the models.
//! 2. **Derived metrics:** Miss percentages and average delays.
//! 3. **Reports:** Fixed-format dumps consumed by downstream analysis scripts.
//!
//! The report layout (labels, tab runs, `%10` widths, three decimals) is a
//! compatibility contract and must not change.

use std::fmt;

/// Cumulative counters of one cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of read accesses.
    pub read_access: u64,
    /// Number of write accesses.
    pub write_access: u64,
    /// Number of read accesses that missed.
    pub read_miss: u64,
    /// Number of write accesses that missed.
    pub write_miss: u64,
    /// Number of installs that replaced a valid, dirty line.
    pub dirty_evicts: u64,
}

impl CacheStats {
    /// Read miss ratio in percent, or zero when there were no reads.
    pub fn read_miss_percent(&self) -> f64 {
        percent(self.read_miss, self.read_access)
    }

    /// Write miss ratio in percent, or zero when there were no writes.
    pub fn write_miss_percent(&self) -> f64 {
        percent(self.write_miss, self.write_access)
    }

    /// Returns a displayable dump with every statistic prefixed by `label`.
    ///
    /// # Arguments
    ///
    /// * `label` - Prefix such as `L1D` or `L2`, used to tell caches apart.
    pub const fn report<'a>(&'a self, label: &'a str) -> CacheReport<'a> {
        CacheReport { stats: self, label }
    }

    /// Prints the dump for `label` to stdout.
    pub fn print(&self, label: &str) {
        print!("{}", self.report(label));
    }
}

/// Fixed-format dump of [`CacheStats`].
#[derive(Debug)]
pub struct CacheReport<'a> {
    stats: &'a CacheStats,
    label: &'a str,
}

impl fmt::Display for CacheReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.stats;
        let l = self.label;
        writeln!(f)?;
        writeln!(f, "{l}_READ_ACCESS     \t\t : {:10}", s.read_access)?;
        writeln!(f, "{l}_WRITE_ACCESS    \t\t : {:10}", s.write_access)?;
        writeln!(f, "{l}_READ_MISS       \t\t : {:10}", s.read_miss)?;
        writeln!(f, "{l}_WRITE_MISS      \t\t : {:10}", s.write_miss)?;
        writeln!(f, "{l}_READ_MISS_PERC  \t\t : {:10.3}", s.read_miss_percent())?;
        writeln!(f, "{l}_WRITE_MISS_PERC \t\t : {:10.3}", s.write_miss_percent())?;
        writeln!(f, "{l}_DIRTY_EVICTS    \t\t : {:10}", s.dirty_evicts)
    }
}

/// Cumulative counters of the DRAM module.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DramStats {
    /// Number of read accesses.
    pub read_access: u64,
    /// Number of write accesses.
    pub write_access: u64,
    /// Sum of cycles spent on reads.
    pub read_delay: u64,
    /// Sum of cycles spent on writes.
    pub write_delay: u64,
}

impl DramStats {
    /// Charges one access of `delay` cycles to the read or write bucket.
    pub const fn record(&mut self, is_write: bool, delay: u64) {
        if is_write {
            self.write_access += 1;
            self.write_delay += delay;
        } else {
            self.read_access += 1;
            self.read_delay += delay;
        }
    }

    /// Mean read latency, or zero when there were no reads.
    pub fn avg_read_delay(&self) -> f64 {
        average(self.read_delay, self.read_access)
    }

    /// Mean write latency, or zero when there were no writes.
    pub fn avg_write_delay(&self) -> f64 {
        average(self.write_delay, self.write_access)
    }

    /// Returns a displayable dump of the DRAM counters.
    pub const fn report(&self) -> DramReport<'_> {
        DramReport { stats: self }
    }

    /// Prints the dump to stdout.
    pub fn print(&self) {
        print!("{}", self.report());
    }
}

/// Fixed-format dump of [`DramStats`].
#[derive(Debug)]
pub struct DramReport<'a> {
    stats: &'a DramStats,
}

impl fmt::Display for DramReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.stats;
        writeln!(f)?;
        writeln!(f, "DRAM_READ_ACCESS     \t\t : {:10}", s.read_access)?;
        writeln!(f, "DRAM_WRITE_ACCESS    \t\t : {:10}", s.write_access)?;
        writeln!(f, "DRAM_READ_DELAY_AVG  \t\t : {:10.3}", s.avg_read_delay())?;
        writeln!(f, "DRAM_WRITE_DELAY_AVG \t\t : {:10.3}", s.avg_write_delay())
    }
}

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        100.0 * part as f64 / whole as f64
    }
}

fn average(total: u64, count: u64) -> f64 {
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}
