//! # Configuration Tests
//!
//! Defaults, JSON deserialization, and the fallback rules for unknown
//! policy names.

use memsim_core::common::ConfigError;
use memsim_core::config::*;
use memsim_core::{Cache, Dram};
use rstest::rstest;

#[test]
fn test_cache_config_defaults() {
    let cache = CacheConfig::default();
    assert_eq!(cache.size_bytes, 1024 * 1024);
    assert_eq!(cache.line_bytes, 64);
    assert_eq!(cache.ways, 16);
    assert_eq!(cache.policy, ReplacementPolicy::Lru);
    assert_eq!(cache.core0_ways, 8);
}

#[test]
fn test_dram_config_defaults() {
    let dram = DramConfig::default();
    assert_eq!(dram.mode, DramMode::RowBuffer);
    assert_eq!(dram.page_policy, PagePolicy::OpenPage);
    assert_eq!(dram.num_banks, 16);
    assert_eq!(dram.row_buffer_bytes, 1024);
    assert_eq!(dram.line_bytes, 64);
    assert_eq!(dram.t_act, 45);
    assert_eq!(dram.t_cas, 45);
    assert_eq!(dram.t_pre, 45);
    assert_eq!(dram.t_bus, 10);
    assert_eq!(dram.fixed_latency, 100);
}

#[test]
fn test_default_config_builds_both_components() {
    let config = Config::default();
    let cache = Cache::new(&config.cache).unwrap();
    let dram = Dram::new(&config.dram).unwrap();
    assert_eq!(cache.num_sets(), 1024);
    assert_eq!(dram.num_banks(), 16);
}

#[test]
fn test_empty_json_is_all_defaults() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config.cache.ways, 16);
    assert_eq!(config.dram.num_banks, 16);
}

#[test]
fn test_full_json() {
    let json = r#"{
        "cache": {
            "size_bytes": 65536,
            "line_bytes": 32,
            "ways": 4,
            "policy": "SWP",
            "core0_ways": 1
        },
        "dram": {
            "mode": "Fixed",
            "page_policy": "OPEN_PAGE",
            "num_banks": 8,
            "row_buffer_bytes": 2048,
            "line_bytes": 32,
            "t_act": 20,
            "t_cas": 15,
            "t_pre": 12,
            "t_bus": 4,
            "fixed_latency": 80
        }
    }"#;
    let config = Config::from_json(json).unwrap();
    assert_eq!(config.cache.size_bytes, 65536);
    assert_eq!(config.cache.line_bytes, 32);
    assert_eq!(config.cache.policy, ReplacementPolicy::StaticPartition);
    assert_eq!(config.cache.core0_ways, 1);
    assert_eq!(config.dram.mode, DramMode::Fixed);
    assert_eq!(config.dram.num_banks, 8);
    assert_eq!(config.dram.row_buffer_bytes, 2048);
    assert_eq!(config.dram.t_pre, 12);
    assert_eq!(config.dram.fixed_latency, 80);
}

#[test]
fn test_malformed_json_is_parse_error() {
    assert!(matches!(
        Config::from_json(r#"{ "cache": { "ways": "many" } }"#),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(Config::from_json("{"), Err(ConfigError::Parse(_))));
}

#[rstest]
#[case("LRU", ReplacementPolicy::Lru)]
#[case("lru", ReplacementPolicy::Lru)]
#[case("RANDOM", ReplacementPolicy::Random)]
#[case("Random", ReplacementPolicy::Random)]
#[case("SWP", ReplacementPolicy::StaticPartition)]
#[case("static_partition", ReplacementPolicy::StaticPartition)]
#[case("DWP", ReplacementPolicy::Lru)]
#[case("", ReplacementPolicy::Lru)]
#[case("mru", ReplacementPolicy::Lru)]
fn test_replacement_policy_names(#[case] name: &str, #[case] expected: ReplacementPolicy) {
    assert_eq!(ReplacementPolicy::from(name), expected);
}

#[rstest]
#[case("OPEN_PAGE", PagePolicy::OpenPage)]
#[case("open", PagePolicy::OpenPage)]
#[case("CLOSE_PAGE", PagePolicy::ClosePage)]
#[case("close", PagePolicy::ClosePage)]
#[case("adaptive", PagePolicy::ClosePage)]
#[case("", PagePolicy::ClosePage)]
fn test_page_policy_names(#[case] name: &str, #[case] expected: PagePolicy) {
    assert_eq!(PagePolicy::from(name), expected);
}

/// The cache hands line addresses to DRAM unchanged, so a line size set on
/// one side only must not leave DRAM counting lines of another size.
#[test]
fn test_line_size_mismatch_is_rejected() {
    let err = Config::from_json(r#"{ "cache": { "line_bytes": 128, "size_bytes": 131072 } }"#)
        .unwrap_err();
    assert_eq!(err, ConfigError::LineSizeMismatch { cache: 128, dram: 64 });
    assert_eq!(
        err.to_string(),
        "cache line size 128 differs from DRAM line size 64"
    );

    let config = Config::from_json(
        r#"{
            "cache": { "line_bytes": 128, "size_bytes": 131072 },
            "dram": { "line_bytes": 128 }
        }"#,
    )
    .unwrap();
    assert!(config.validate().is_ok());
    let dram = Dram::new(&config.dram).unwrap();
    assert_eq!(dram.lines_per_row(), 1024 / 128);
}

#[test]
fn test_validate_catches_programmatic_mismatch() {
    let mut config = Config::default();
    config.dram.line_bytes = 32;
    assert_eq!(
        config.validate(),
        Err(ConfigError::LineSizeMismatch { cache: 64, dram: 32 })
    );
}

/// Unknown names in a config document fall back instead of failing the parse.
#[test]
fn test_unknown_policies_in_json_fall_back() {
    let config = Config::from_json(
        r#"{ "cache": { "policy": "PLRU" }, "dram": { "page_policy": "MYSTERY" } }"#,
    )
    .unwrap();
    assert_eq!(config.cache.policy, ReplacementPolicy::Lru);
    assert_eq!(config.dram.page_policy, PagePolicy::ClosePage);
}
