//! Set-Associative Cache Model.
//!
//! This module implements the cache half of the memory hierarchy. It provides:
//! 1. **Geometry:** Sets of ways derived from size, associativity and line size.
//! 2. **Lookup:** Tag matching on line addresses, with dirty marking and recency refresh.
//! 3. **Install:** Victim selection through a pluggable policy and writeback tracking.
//!
//! The cache never talks to DRAM. On a miss the driver obtains the fill latency
//! itself, calls [`Cache::install`], and inspects [`Cache::last_evicted`] to
//! decide whether a writeback is owed.

/// Cache replacement policy implementations (LRU, Random, static partitioning).
pub mod policies;

use tracing::{debug, trace};

use self::policies::{LruPolicy, RandomPolicy, StaticPartitionPolicy, VictimPolicy};
use crate::common::{ConfigError, CoreId, LineAddr};
use crate::config::{CacheConfig, ReplacementPolicy};
use crate::stats::CacheStats;

/// Outcome of a cache lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheResult {
    /// The line was resident.
    Hit,
    /// The line was not resident; the driver should fetch and install it.
    Miss,
}

impl CacheResult {
    /// Returns `true` for [`CacheResult::Hit`].
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }
}

/// One storage slot of a set.
///
/// `dirty` implies `valid`, and `tag`, `core_id` and `last_access` are only
/// meaningful while `valid` is set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    /// Whether the slot holds a line.
    pub valid: bool,
    /// Whether the line was written since it was installed.
    pub dirty: bool,
    /// Line address with the set-index bits cleared.
    pub tag: u64,
    /// Core that installed the line.
    pub core_id: CoreId,
    /// Cycle of the most recent install or hit.
    pub last_access: u64,
}

/// The ways sharing one set index, in way order.
#[derive(Clone, Debug)]
pub struct CacheSet {
    lines: Vec<CacheLine>,
}

impl CacheSet {
    fn new(ways: usize) -> Self {
        Self {
            lines: vec![CacheLine::default(); ways],
        }
    }

    /// The ways of this set.
    pub fn lines(&self) -> &[CacheLine] {
        &self.lines
    }

    fn find(&self, tag: u64) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.valid && line.tag == tag)
    }
}

/// A line displaced by [`Cache::install`], captured before it was overwritten.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EvictedLine {
    /// The victim way's state prior to the install.
    pub line: CacheLine,
    /// Set the victim lived in.
    pub set_index: usize,
    /// Way the victim occupied.
    pub way: usize,
}

impl EvictedLine {
    /// Whether the driver owes a writeback for this line.
    pub const fn needs_writeback(&self) -> bool {
        self.line.valid && self.line.dirty
    }

    /// Reconstructs the victim's line address.
    ///
    /// Tags keep their bits in place, so the address is `tag | set_index`.
    /// Meaningless when the victim was invalid.
    pub const fn line_addr(&self) -> LineAddr {
        LineAddr(self.line.tag | self.set_index as u64)
    }
}

/// Set-associative cache with a configurable replacement policy.
///
/// # Examples
///
/// ```
/// use memsim_core::cache::{Cache, CacheResult};
/// use memsim_core::common::{CoreId, LineAddr};
/// use memsim_core::config::CacheConfig;
///
/// let mut cache = Cache::new(&CacheConfig::default()).unwrap();
/// let line = LineAddr(0x1234);
///
/// assert_eq!(cache.access(line, false, CoreId(0), 1), CacheResult::Miss);
/// cache.install(line, false, CoreId(0), 1);
/// assert_eq!(cache.access(line, true, CoreId(0), 2), CacheResult::Hit);
/// ```
pub struct Cache {
    sets: Vec<CacheSet>,
    num_sets: usize,
    ways: usize,
    line_bytes: u64,
    index_mask: u64,
    policy: Box<dyn VictimPolicy>,
    stats: CacheStats,
    last_evicted: Option<EvictedLine>,
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("num_sets", &self.num_sets)
            .field("ways", &self.ways)
            .field("line_bytes", &self.line_bytes)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl Cache {
    /// Creates a cache with every line invalid and all counters at zero.
    ///
    /// # Arguments
    ///
    /// * `config` - Size, associativity, line size and replacement policy.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any dimension is zero, the set size
    /// overflows, the size is not a whole number of sets, the set count is not a power of two, or the
    /// static partition quota exceeds the associativity.
    pub fn new(config: &CacheConfig) -> Result<Self, ConfigError> {
        if config.size_bytes == 0 {
            return Err(ConfigError::ZeroParameter("cache size"));
        }
        if config.ways == 0 {
            return Err(ConfigError::ZeroParameter("associativity"));
        }
        if config.line_bytes == 0 {
            return Err(ConfigError::ZeroParameter("line size"));
        }

        let set_bytes = config
            .ways
            .checked_mul(config.line_bytes)
            .ok_or(ConfigError::SetSizeOverflow {
                ways: config.ways,
                line_bytes: config.line_bytes,
            })?;
        if config.size_bytes % set_bytes != 0 {
            return Err(ConfigError::NotDivisible {
                size: config.size_bytes,
                ways: config.ways,
                line_bytes: config.line_bytes,
            });
        }
        let num_sets = config.size_bytes / set_bytes;
        if !num_sets.is_power_of_two() {
            return Err(ConfigError::SetsNotPowerOfTwo(num_sets));
        }

        let ways = config.ways as usize;
        let policy: Box<dyn VictimPolicy> = match config.policy {
            ReplacementPolicy::Lru => Box::new(LruPolicy::new()),
            ReplacementPolicy::Random => Box::new(RandomPolicy::new()),
            ReplacementPolicy::StaticPartition => {
                if config.core0_ways > config.ways {
                    return Err(ConfigError::QuotaExceedsWays {
                        quota: config.core0_ways,
                        ways: config.ways,
                    });
                }
                Box::new(StaticPartitionPolicy::new(
                    ways,
                    config.core0_ways as usize,
                ))
            }
        };

        debug!(
            sets = num_sets,
            ways,
            line_bytes = config.line_bytes,
            policy = ?config.policy,
            "cache constructed"
        );

        Ok(Self::with_policy(
            num_sets as usize,
            ways,
            config.line_bytes,
            policy,
        ))
    }

    /// Builds a cache around an explicit policy object.
    ///
    /// Geometry is trusted: `num_sets` must be a power of two and `ways` non-zero.
    fn with_policy(
        num_sets: usize,
        ways: usize,
        line_bytes: u64,
        policy: Box<dyn VictimPolicy>,
    ) -> Self {
        Self {
            sets: (0..num_sets).map(|_| CacheSet::new(ways)).collect(),
            num_sets,
            ways,
            line_bytes,
            index_mask: num_sets as u64 - 1,
            policy,
            stats: CacheStats::default(),
            last_evicted: None,
        }
    }

    /// Number of sets.
    pub const fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Associativity.
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Line size in bytes.
    pub const fn line_bytes(&self) -> u64 {
        self.line_bytes
    }

    /// Number of low line-address bits used as the set index.
    pub const fn index_bits(&self) -> u32 {
        self.num_sets.trailing_zeros()
    }

    /// Set index of a line address: its low `index_bits` bits.
    #[inline]
    pub const fn set_index(&self, addr: LineAddr) -> usize {
        (addr.0 & self.index_mask) as usize
    }

    /// Tag of a line address: the address with its index bits cleared.
    #[inline]
    pub const fn tag(&self, addr: LineAddr) -> u64 {
        addr.0 & !self.index_mask
    }

    /// Read-only view of one set.
    ///
    /// # Panics
    ///
    /// Panics if `index >= num_sets()`.
    pub fn set(&self, index: usize) -> &CacheSet {
        &self.sets[index]
    }

    /// Cumulative counters.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// The line displaced by the most recent install, if any install happened.
    ///
    /// The victim may have been invalid (an empty way was filled); check
    /// [`EvictedLine::needs_writeback`] before issuing a writeback.
    pub const fn last_evicted(&self) -> Option<&EvictedLine> {
        self.last_evicted.as_ref()
    }

    /// Looks up a line and updates statistics.
    ///
    /// On a hit the line's timestamp is refreshed to `now`, and a write marks
    /// it dirty. A miss changes no line state; the driver is expected to call
    /// [`Cache::install`] afterwards.
    ///
    /// # Arguments
    ///
    /// * `addr` - Line address of the reference.
    /// * `is_write` - Whether the reference is a store.
    /// * `core` - Issuing core, used only for attribution.
    /// * `now` - Current cycle.
    pub fn access(
        &mut self,
        addr: LineAddr,
        is_write: bool,
        core: CoreId,
        now: u64,
    ) -> CacheResult {
        if is_write {
            self.stats.write_access += 1;
        } else {
            self.stats.read_access += 1;
        }

        let index = self.set_index(addr);
        let tag = self.tag(addr);
        let set = &mut self.sets[index];

        if let Some(way) = set.find(tag) {
            let line = &mut set.lines[way];
            if is_write {
                line.dirty = true;
            }
            line.last_access = now;
            trace!(line = addr.val(), set = index, way, is_write, core = core.val(), "hit");
            return CacheResult::Hit;
        }

        if is_write {
            self.stats.write_miss += 1;
        } else {
            self.stats.read_miss += 1;
        }
        trace!(line = addr.val(), set = index, is_write, core = core.val(), "miss");
        CacheResult::Miss
    }

    /// Chooses the way that an install into `set_index` would overwrite.
    ///
    /// # Panics
    ///
    /// Panics if `set_index >= num_sets()`.
    pub fn find_victim(&mut self, set_index: usize, core: CoreId) -> usize {
        self.policy.select_victim(&self.sets[set_index].lines, core)
    }

    /// Places a line, evicting the victim chosen by the replacement policy.
    ///
    /// The victim's prior state is recorded as the last evicted line before it
    /// is overwritten. The new line is valid, clean, owned by `core` and
    /// stamped with `now`, even when the install was triggered by a write; the
    /// driver's preceding write access is what counts as the store.
    ///
    /// # Arguments
    ///
    /// * `addr` - Line address to install.
    /// * `is_write` - Whether the triggering reference was a store.
    /// * `core` - Core that will own the line.
    /// * `now` - Current cycle.
    pub fn install(&mut self, addr: LineAddr, is_write: bool, core: CoreId, now: u64) {
        let index = self.set_index(addr);
        let tag = self.tag(addr);
        let way = self.find_victim(index, core);

        let slot = &mut self.sets[index].lines[way];
        let evicted = EvictedLine {
            line: *slot,
            set_index: index,
            way,
        };
        if evicted.needs_writeback() {
            self.stats.dirty_evicts += 1;
            debug!(
                victim = evicted.line_addr().0,
                set = index,
                way,
                owner = evicted.line.core_id.0,
                "dirty eviction"
            );
        }

        *slot = CacheLine {
            valid: true,
            dirty: false,
            tag,
            core_id: core,
            last_access: now,
        };
        self.last_evicted = Some(evicted);
        trace!(line = addr.val(), set = index, way, is_write, core = core.val(), "install");
    }
}
