//! Static Way Partitioning.
//!
//! Splits every set between two partitions: core 0, and all other cores.
//! Core 0 may own at most `core0_ways` ways of a set, the others share the
//! remaining `ways - core0_ways`. A core under its quota grows into empty ways
//! or takes the other partition's LRU line; a core at its quota replaces its
//! own partition's LRU line.
//!
//! The quota is enforced lazily: lines are never moved, so a set may briefly
//! hold more lines of one partition than its quota (e.g. after the other
//! partition filled it while it was idle). Such sets converge as soon as the
//! over-quota partition installs again.

use super::{VictimPolicy, first_invalid, oldest_where};
use crate::cache::CacheLine;
use crate::common::CoreId;

/// Static partition policy state.
#[derive(Debug, Clone, Copy)]
pub struct StaticPartitionPolicy {
    core0_ways: usize,
    ways: usize,
}

impl StaticPartitionPolicy {
    /// Creates a partition policy.
    ///
    /// # Arguments
    ///
    /// * `ways` - The associativity of the cache.
    /// * `core0_ways` - Ways per set reserved for core 0. A value above `ways`
    ///   leaves the other cores no quota.
    pub const fn new(ways: usize, core0_ways: usize) -> Self {
        Self { core0_ways, ways }
    }

    /// Ways per set available to `core`'s partition.
    pub const fn quota(&self, core: CoreId) -> usize {
        if core.0 == 0 {
            self.core0_ways
        } else {
            self.ways.saturating_sub(self.core0_ways)
        }
    }
}

/// Whether `owner` belongs to the same partition as `core`.
const fn same_partition(owner: CoreId, core: CoreId) -> bool {
    (owner.0 == 0) == (core.0 == 0)
}

impl VictimPolicy for StaticPartitionPolicy {
    fn select_victim(&mut self, lines: &[CacheLine], core: CoreId) -> usize {
        let owned = lines
            .iter()
            .filter(|line| line.valid && same_partition(line.core_id, core))
            .count();

        let candidate = if owned < self.quota(core) {
            first_invalid(lines)
                .or_else(|| oldest_where(lines, |line| !same_partition(line.core_id, core)))
        } else {
            oldest_where(lines, |line| same_partition(line.core_id, core))
        };

        // Degenerate quotas (0 or all ways) leave no candidate: plain LRU.
        candidate
            .or_else(|| first_invalid(lines))
            .or_else(|| oldest_where(lines, |_| true))
            .unwrap_or(0)
    }
}
