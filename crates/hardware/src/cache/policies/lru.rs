//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the line whose last-access timestamp is the oldest in
//! the set. Timestamps are refreshed by every hit (read or write) and by every
//! install, so the scan sees true recency rather than insertion order.
//!
//! # Performance
//!
//! - **Time Complexity:** `select_victim()` is O(W) where W is the associativity
//! - **Space Complexity:** O(1); recency is stored in the lines
//! - **Best Case:** Workloads with strong temporal locality
//! - **Worst Case:** Cyclic scans slightly larger than the set (thrashing)

use super::VictimPolicy;
use crate::cache::CacheLine;
use crate::common::CoreId;

/// LRU Policy. Stateless.
#[derive(Debug, Default, Clone, Copy)]
pub struct LruPolicy;

impl LruPolicy {
    /// Creates a new LRU policy instance.
    pub const fn new() -> Self {
        Self
    }
}

impl VictimPolicy for LruPolicy {
    /// Takes the first invalid way; otherwise the way with the smallest
    /// timestamp, lowest way on ties.
    fn select_victim(&mut self, lines: &[CacheLine], _core: CoreId) -> usize {
        let mut victim = 0;
        for (way, line) in lines.iter().enumerate() {
            if !line.valid {
                return way;
            }
            if line.last_access < lines[victim].last_access {
                victim = way;
            }
        }
        victim
    }
}
