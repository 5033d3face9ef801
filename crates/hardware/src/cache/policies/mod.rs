//! Cache Replacement Policies.
//!
//! Implements the algorithms that choose a victim way when a line is installed.
//! All policies share one rule: an invalid way is always taken before any valid
//! line is evicted.
//!
//! # Policies
//!
//! - `Lru`: Least Recently Used, by last-access timestamp.
//! - `Random`: Uniform choice among the ways of a full set.
//! - `StaticPartition`: LRU within a fixed per-core way quota.

/// Least Recently Used replacement policy.
pub mod lru;

/// Static way partitioning between core 0 and the other cores.
pub mod partition;

/// Random replacement policy.
pub mod random;

pub use lru::LruPolicy;
pub use partition::StaticPartitionPolicy;
pub use random::RandomPolicy;

use super::CacheLine;
use crate::common::CoreId;

/// Trait for cache replacement policies.
///
/// A policy sees the ways of one set and the requesting core, and names the
/// way to overwrite. Recency lives in the lines themselves (`last_access`), so
/// a policy needs no per-access update hook.
pub trait VictimPolicy: Send + Sync {
    /// Selects the way to replace within a set.
    ///
    /// # Arguments
    ///
    /// * `lines` - The ways of the target set, in way order. Never empty.
    /// * `core` - The core requesting the install.
    ///
    /// # Returns
    ///
    /// The index of the way to evict. It may hold a valid line, in which case
    /// the caller records it as the evicted line.
    fn select_victim(&mut self, lines: &[CacheLine], core: CoreId) -> usize;
}

/// Returns the lowest-numbered invalid way, if any.
pub(crate) fn first_invalid(lines: &[CacheLine]) -> Option<usize> {
    lines.iter().position(|line| !line.valid)
}

/// Returns the valid way with the oldest timestamp among those accepted by `filter`.
///
/// Ties resolve to the lowest way because the comparison is strict.
pub(crate) fn oldest_where<F>(lines: &[CacheLine], filter: F) -> Option<usize>
where
    F: Fn(&CacheLine) -> bool,
{
    let mut victim: Option<usize> = None;
    for (way, line) in lines.iter().enumerate() {
        if !line.valid || !filter(line) {
            continue;
        }
        match victim {
            Some(v) if lines[v].last_access <= line.last_access => {}
            _ => victim = Some(way),
        }
    }
    victim
}
