//! Configuration system for the memory model.
//!
//! This module defines all configuration structures and enums used to parameterize
//! the cache and the DRAM. It provides:
//! 1. **Defaults:** Baseline geometry and timing constants.
//! 2. **Structures:** Cache and DRAM config, plus a root `Config` holding both.
//! 3. **Enums:** Replacement policy, page policy, and DRAM timing mode.
//!
//! Configuration is supplied as JSON (see [`Config::from_json`]) or built with
//! `Config::default()`. Every value the original model read from process-wide
//! globals lives here instead, so each component is constructible on its own.

use serde::Deserialize;
use tracing::warn;

use crate::common::ConfigError;

/// Default configuration constants for the model.
///
/// These values define the baseline hardware configuration when not
/// explicitly overridden in the JSON configuration.
mod defaults {
    /// Default cache size in bytes (1 MiB).
    pub const CACHE_SIZE: u64 = 1024 * 1024;

    /// Default cache line size in bytes (64 bytes).
    ///
    /// Also the line size the DRAM address mapping assumes.
    pub const LINE_BYTES: u64 = 64;

    /// Default cache associativity.
    pub const CACHE_WAYS: u64 = 16;

    /// Default number of ways per set reserved for core 0 under static partitioning.
    ///
    /// The remaining ways form the quota shared by all other cores.
    pub const CORE0_WAYS: u64 = 8;

    /// Number of banks in the DRAM module.
    pub const NUM_BANKS: u64 = 16;

    /// Row buffer size in bytes.
    pub const ROW_BUFFER_BYTES: u64 = 1024;

    /// Row activation latency (ACT, also known as RAS) in cycles.
    pub const T_ACT: u64 = 45;

    /// Column selection latency (CAS) in cycles.
    pub const T_CAS: u64 = 45;

    /// Precharge latency (PRE) in cycles.
    pub const T_PRE: u64 = 45;

    /// Bus transfer latency in cycles.
    ///
    /// Paid on every row-buffer-mode access.
    pub const T_BUS: u64 = 10;

    /// Latency of every access in fixed-latency mode, bus transfer included.
    pub const FIXED_LATENCY: u64 = 100;
}

/// Cache replacement policy algorithms.
///
/// Specifies the algorithm used to select which way to evict when a new line
/// must be installed in a full set.
///
/// Parsing is total: any name that is not recognized selects [`ReplacementPolicy::Lru`].
///
/// ```
/// use memsim_core::config::ReplacementPolicy;
///
/// assert_eq!(ReplacementPolicy::from("random"), ReplacementPolicy::Random);
/// assert_eq!(ReplacementPolicy::from("SWP"), ReplacementPolicy::StaticPartition);
/// assert_eq!(ReplacementPolicy::from("bogus"), ReplacementPolicy::Lru);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum ReplacementPolicy {
    /// Least Recently Used replacement policy.
    ///
    /// Evicts the line with the oldest last-access timestamp.
    #[default]
    Lru,
    /// Random replacement policy.
    ///
    /// Evicts a uniformly selected line from a full set.
    Random,
    /// Static way partitioning.
    ///
    /// Core 0 may hold at most `core0_ways` ways per set; all other cores
    /// share the remainder. Victims are chosen by LRU within the partition.
    StaticPartition,
}

impl ReplacementPolicy {
    /// Resolves a policy by name, falling back to LRU for unknown names.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_uppercase().as_str() {
            "LRU" => Self::Lru,
            "RANDOM" => Self::Random,
            "SWP" | "STATIC_PARTITION" | "STATICPARTITION" => Self::StaticPartition,
            other => {
                warn!(policy = other, "unknown replacement policy, using LRU");
                Self::Lru
            }
        }
    }
}

impl From<String> for ReplacementPolicy {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<&str> for ReplacementPolicy {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

/// DRAM page management policy.
///
/// Parsing is total: any name that is not an open-page spelling selects
/// [`PagePolicy::ClosePage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum PagePolicy {
    /// Keep the activated row latched in the bank's row buffer across accesses.
    #[default]
    OpenPage,
    /// Deactivate the row after every access; every access pays full activation.
    ClosePage,
}

impl PagePolicy {
    /// Resolves a page policy by name, falling back to close-page for anything else.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_uppercase().as_str() {
            "OPEN_PAGE" | "OPENPAGE" | "OPEN" => Self::OpenPage,
            "CLOSE_PAGE" | "CLOSEPAGE" | "CLOSE" => Self::ClosePage,
            other => {
                warn!(policy = other, "unknown page policy, using close-page");
                Self::ClosePage
            }
        }
    }
}

impl From<String> for PagePolicy {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<&str> for PagePolicy {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

/// DRAM timing model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum DramMode {
    /// Row-buffer-aware timing driven by the configured [`PagePolicy`].
    #[default]
    RowBuffer,
    /// Every access takes `fixed_latency` cycles regardless of row state.
    Fixed,
}

/// Root configuration structure containing both memory components.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use memsim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.cache.size_bytes, 1024 * 1024);
/// assert_eq!(config.dram.num_banks, 16);
/// ```
///
/// Deserializing from JSON; omitted fields keep their defaults:
///
/// ```
/// use memsim_core::config::{Config, PagePolicy, ReplacementPolicy};
///
/// let json = r#"{
///     "cache": { "size_bytes": 32768, "ways": 8, "policy": "RANDOM" },
///     "dram": { "page_policy": "CLOSE_PAGE" }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.cache.ways, 8);
/// assert_eq!(config.cache.line_bytes, 64);
/// assert_eq!(config.cache.policy, ReplacementPolicy::Random);
/// assert_eq!(config.dram.page_policy, PagePolicy::ClosePage);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Cache geometry and replacement policy
    #[serde(default)]
    pub cache: CacheConfig,
    /// DRAM geometry, timing and page policy
    #[serde(default)]
    pub dram: DramConfig,
}

impl Config {
    /// Parses a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the document is not valid JSON or a
    /// field has the wrong type, and [`ConfigError::LineSizeMismatch`] if the
    /// cache and DRAM disagree on the line size. Per-component geometry is
    /// validated later, when the components are constructed.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the constraints that span both components.
    ///
    /// Line addresses produced for the cache are fed to DRAM unchanged, so
    /// both must count lines of the same size.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::LineSizeMismatch`] if `cache.line_bytes` and
    /// `dram.line_bytes` differ.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.cache.line_bytes != self.dram.line_bytes {
            return Err(ConfigError::LineSizeMismatch {
                cache: self.cache.line_bytes,
                dram: self.dram.line_bytes,
            });
        }
        Ok(())
    }
}

/// Set-associative cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Total capacity in bytes.
    #[serde(default = "CacheConfig::default_size")]
    pub size_bytes: u64,

    /// Line size in bytes.
    #[serde(default = "CacheConfig::default_line")]
    pub line_bytes: u64,

    /// Associativity (ways per set).
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: u64,

    /// Victim selection algorithm.
    #[serde(default)]
    pub policy: ReplacementPolicy,

    /// Ways per set reserved for core 0 under [`ReplacementPolicy::StaticPartition`].
    #[serde(default = "CacheConfig::default_core0_ways")]
    pub core0_ways: u64,
}

impl CacheConfig {
    fn default_size() -> u64 {
        defaults::CACHE_SIZE
    }

    fn default_line() -> u64 {
        defaults::LINE_BYTES
    }

    fn default_ways() -> u64 {
        defaults::CACHE_WAYS
    }

    fn default_core0_ways() -> u64 {
        defaults::CORE0_WAYS
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            size_bytes: defaults::CACHE_SIZE,
            line_bytes: defaults::LINE_BYTES,
            ways: defaults::CACHE_WAYS,
            policy: ReplacementPolicy::default(),
            core0_ways: defaults::CORE0_WAYS,
        }
    }
}

/// DRAM module configuration.
///
/// All latencies are in simulation cycles.
#[derive(Debug, Clone, Deserialize)]
pub struct DramConfig {
    /// Row-buffer-aware or fixed-latency timing.
    #[serde(default)]
    pub mode: DramMode,

    /// Page management policy used in row-buffer mode.
    #[serde(default)]
    pub page_policy: PagePolicy,

    /// Number of independent banks.
    #[serde(default = "DramConfig::default_banks")]
    pub num_banks: u64,

    /// Row buffer size in bytes.
    #[serde(default = "DramConfig::default_row_buffer")]
    pub row_buffer_bytes: u64,

    /// Cache line size in bytes; line addresses are interpreted in these units.
    #[serde(default = "DramConfig::default_line")]
    pub line_bytes: u64,

    /// Row activation latency.
    #[serde(default = "DramConfig::default_t_act")]
    pub t_act: u64,

    /// Column access latency.
    #[serde(default = "DramConfig::default_t_cas")]
    pub t_cas: u64,

    /// Precharge latency.
    #[serde(default = "DramConfig::default_t_pre")]
    pub t_pre: u64,

    /// Bus transfer latency.
    #[serde(default = "DramConfig::default_t_bus")]
    pub t_bus: u64,

    /// Per-access latency in [`DramMode::Fixed`].
    #[serde(default = "DramConfig::default_fixed_latency")]
    pub fixed_latency: u64,
}

impl DramConfig {
    fn default_banks() -> u64 {
        defaults::NUM_BANKS
    }

    fn default_row_buffer() -> u64 {
        defaults::ROW_BUFFER_BYTES
    }

    fn default_line() -> u64 {
        defaults::LINE_BYTES
    }

    fn default_t_act() -> u64 {
        defaults::T_ACT
    }

    fn default_t_cas() -> u64 {
        defaults::T_CAS
    }

    fn default_t_pre() -> u64 {
        defaults::T_PRE
    }

    fn default_t_bus() -> u64 {
        defaults::T_BUS
    }

    fn default_fixed_latency() -> u64 {
        defaults::FIXED_LATENCY
    }
}

impl Default for DramConfig {
    fn default() -> Self {
        Self {
            mode: DramMode::default(),
            page_policy: PagePolicy::default(),
            num_banks: defaults::NUM_BANKS,
            row_buffer_bytes: defaults::ROW_BUFFER_BYTES,
            line_bytes: defaults::LINE_BYTES,
            t_act: defaults::T_ACT,
            t_cas: defaults::T_CAS,
            t_pre: defaults::T_PRE,
            t_bus: defaults::T_BUS,
            fixed_latency: defaults::FIXED_LATENCY,
        }
    }
}
