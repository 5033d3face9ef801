//! Random Replacement Policy.
//!
//! This policy fills empty ways first, then evicts a uniformly chosen way from
//! a full set. It uses a xorshift generator so runs are reproducible for a
//! given seed.

use super::{VictimPolicy, first_invalid};
use crate::cache::CacheLine;
use crate::common::CoreId;

/// Seed used when none is supplied.
const DEFAULT_SEED: u64 = 123456789;

/// Random Policy state.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    /// Internal state for the pseudo-random number generator. Never zero.
    state: u64,
}

impl RandomPolicy {
    /// Creates a new Random policy with the default seed.
    pub const fn new() -> Self {
        Self {
            state: DEFAULT_SEED,
        }
    }

    /// Creates a Random policy with an explicit seed.
    ///
    /// A zero seed would lock xorshift at zero, so it is replaced by the default.
    pub const fn with_seed(seed: u64) -> Self {
        Self {
            state: if seed == 0 { DEFAULT_SEED } else { seed },
        }
    }

    const fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl VictimPolicy for RandomPolicy {
    /// Takes the first invalid way; otherwise a pseudo-random way. Recency and
    /// dirtiness carry no weight.
    fn select_victim(&mut self, lines: &[CacheLine], _core: CoreId) -> usize {
        if let Some(way) = first_invalid(lines) {
            return way;
        }
        (self.next() % lines.len() as u64) as usize
    }
}
