//! Cache Replacement Policy Tests.
//!
//! Verifies the victim selection logic for LRU, Random and static way
//! partitioning. Each policy implements `VictimPolicy` and is exercised on
//! hand-built sets, without a surrounding cache.

use memsim_core::cache::CacheLine;
use memsim_core::cache::policies::{
    LruPolicy, RandomPolicy, StaticPartitionPolicy, VictimPolicy,
};
use memsim_core::common::CoreId;
use rstest::rstest;

/// A valid, clean line owned by `core` and last used at `ts`.
fn line(core: u32, ts: u64) -> CacheLine {
    CacheLine {
        valid: true,
        dirty: false,
        tag: ts << 8,
        core_id: CoreId(core),
        last_access: ts,
    }
}

fn empty() -> CacheLine {
    CacheLine::default()
}

// ══════════════════════════════════════════════════════════
// 1. LRU Policy
// ══════════════════════════════════════════════════════════

#[test]
fn lru_picks_oldest_timestamp() {
    let set = [line(0, 7), line(0, 3), line(0, 9), line(0, 5)];
    assert_eq!(LruPolicy::new().select_victim(&set, CoreId(0)), 1);
}

#[test]
fn lru_ties_resolve_to_lowest_way() {
    let set = [line(0, 8), line(0, 2), line(0, 2), line(0, 2)];
    assert_eq!(LruPolicy::new().select_victim(&set, CoreId(0)), 1);
}

/// An empty way wins even when an older valid line sits before it.
#[rstest]
#[case([empty(), line(0, 1), line(0, 2), line(0, 3)], 0)]
#[case([line(0, 1), line(0, 2), empty(), line(0, 3)], 2)]
#[case([line(0, 1), empty(), empty(), line(0, 0)], 1)]
fn lru_prefers_invalid_way(#[case] set: [CacheLine; 4], #[case] expected: usize) {
    assert_eq!(LruPolicy::new().select_victim(&set, CoreId(0)), expected);
}

#[test]
fn lru_ignores_dirtiness_and_owner() {
    let mut set = [line(3, 4), line(1, 6), line(0, 5)];
    set[0].dirty = true;
    assert_eq!(LruPolicy::new().select_victim(&set, CoreId(1)), 0);
}

#[test]
fn lru_single_way() {
    assert_eq!(LruPolicy::new().select_victim(&[line(0, 1)], CoreId(0)), 0);
}

// ══════════════════════════════════════════════════════════
// 2. Random Policy
// ══════════════════════════════════════════════════════════

#[test]
fn random_prefers_invalid_way() {
    let set = [line(0, 1), line(0, 2), empty(), line(0, 4)];
    let mut policy = RandomPolicy::new();
    for _ in 0..16 {
        assert_eq!(policy.select_victim(&set, CoreId(0)), 2);
    }
}

#[test]
fn random_stays_in_range_and_covers_all_ways() {
    let set = [line(0, 1), line(0, 2), line(0, 3), line(0, 4)];
    let mut policy = RandomPolicy::new();
    let mut seen = [false; 4];
    for _ in 0..256 {
        let way = policy.select_victim(&set, CoreId(0));
        assert!(way < 4);
        seen[way] = true;
    }
    assert!(seen.iter().all(|&s| s), "every way should be chosen eventually: {seen:?}");
}

#[test]
fn random_same_seed_same_sequence() {
    let set = [line(0, 1); 8];
    let mut a = RandomPolicy::with_seed(42);
    let mut b = RandomPolicy::with_seed(42);
    for _ in 0..32 {
        assert_eq!(
            a.select_victim(&set, CoreId(0)),
            b.select_victim(&set, CoreId(0))
        );
    }
}

#[test]
fn random_zero_seed_does_not_stick() {
    let set = [line(0, 1); 8];
    let mut policy = RandomPolicy::with_seed(0);
    let picks: Vec<usize> = (0..32).map(|_| policy.select_victim(&set, CoreId(0))).collect();
    assert!(picks.iter().any(|&w| w != picks[0]));
}

// ══════════════════════════════════════════════════════════
// 3. Static Way Partitioning
// ══════════════════════════════════════════════════════════

#[test]
fn partition_quota_split() {
    let policy = StaticPartitionPolicy::new(8, 3);
    assert_eq!(policy.quota(CoreId(0)), 3);
    assert_eq!(policy.quota(CoreId(1)), 5);
    assert_eq!(policy.quota(CoreId(6)), 5);
}

/// Under quota with a full set: take the other partition's LRU line.
#[test]
fn partition_under_quota_steals_from_other_partition() {
    // Core 0 holds ways 0 and 3 (ts 1 and 2); core 1 holds ways 1 and 2.
    let set = [line(0, 1), line(1, 6), line(1, 4), line(0, 2)];
    let mut policy = StaticPartitionPolicy::new(4, 1);
    // Core 1 owns 2 < 3: victim is core 0's oldest line, way 0.
    assert_eq!(policy.select_victim(&set, CoreId(1)), 0);
}

/// Under quota with an empty way: fill it.
#[test]
fn partition_under_quota_fills_empty_way() {
    let set = [line(1, 1), empty(), line(0, 4), empty()];
    let mut policy = StaticPartitionPolicy::new(4, 2);
    assert_eq!(policy.select_victim(&set, CoreId(0)), 1);
}

/// At quota: recycle the requesting partition's own LRU line, even if an
/// older line from the other partition exists.
#[test]
fn partition_at_quota_replaces_own_line() {
    let set = [line(1, 1), line(0, 5), line(1, 2), line(0, 3)];
    let mut policy = StaticPartitionPolicy::new(4, 2);
    assert_eq!(policy.select_victim(&set, CoreId(0)), 3);
    assert_eq!(policy.select_victim(&set, CoreId(1)), 0);
}

/// At quota with empty ways left: the empty ways belong to the other
/// partition, so the core still replaces its own line.
#[test]
fn partition_at_quota_leaves_empty_ways_alone() {
    let set = [line(0, 9), empty(), line(0, 3), empty()];
    let mut policy = StaticPartitionPolicy::new(4, 2);
    assert_eq!(policy.select_victim(&set, CoreId(0)), 2);
}

/// All non-zero cores share one partition.
#[test]
fn partition_groups_non_zero_cores() {
    let set = [line(2, 1), line(0, 2), line(5, 3), line(0, 4)];
    let mut policy = StaticPartitionPolicy::new(4, 2);
    // Core 7 sees cores 2 and 5 as its own partition (2 == quota 2).
    assert_eq!(policy.select_victim(&set, CoreId(7)), 0);
}

/// A zero quota leaves the core no partition; it falls back to plain LRU.
#[test]
fn partition_zero_quota_falls_back_to_lru() {
    let set = [line(1, 4), line(1, 2), line(1, 3)];
    let mut policy = StaticPartitionPolicy::new(3, 0);
    assert_eq!(policy.select_victim(&set, CoreId(0)), 1);

    let half_empty = [line(1, 4), empty(), line(1, 3)];
    assert_eq!(policy.select_victim(&half_empty, CoreId(0)), 1);
}

/// A core 0 quota above the associativity leaves the other cores nothing;
/// both sides still get a victim instead of underflowing.
#[test]
fn partition_oversized_quota_saturates() {
    let policy = StaticPartitionPolicy::new(4, 6);
    assert_eq!(policy.quota(CoreId(0)), 6);
    assert_eq!(policy.quota(CoreId(1)), 0);

    let mut policy = policy;
    let set = [line(0, 5), line(0, 2), line(0, 7), line(0, 4)];
    assert_eq!(policy.select_victim(&set, CoreId(1)), 1);
    assert_eq!(policy.select_victim(&set, CoreId(0)), 1);
}
