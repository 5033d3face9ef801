//! Cache and DRAM timing model library.
//!
//! This crate implements the backing memory model of a trace-driven simulator:
//! 1. **Cache:** Set-associative storage with LRU, random, or statically partitioned replacement.
//! 2. **DRAM:** Banked row buffers with open-page, close-page, or fixed-latency timing.
//! 3. **Configuration:** Serde-backed geometry, timing and policy settings.
//! 4. **Statistics:** Counter aggregates with fixed-format reports.
//!
//! The two components never reference each other. A driver owns both, keeps the
//! cycle counter, and passes the current cycle into every cache call:
//!
//! ```
//! use memsim_core::{Cache, Config, Dram};
//! use memsim_core::common::{CoreId, LineAddr};
//!
//! let config = Config::default();
//! let mut cache = Cache::new(&config.cache).unwrap();
//! let mut dram = Dram::new(&config.dram).unwrap();
//!
//! let (line, core, now) = (LineAddr(42), CoreId(0), 7);
//! let mut stall = 0;
//! if !cache.access(line, false, core, now).is_hit() {
//!     stall += dram.access(line, false);
//!     cache.install(line, false, core, now);
//!     if let Some(victim) = cache.last_evicted().filter(|v| v.needs_writeback()) {
//!         let _ = dram.access(victim.line_addr(), true);
//!     }
//! }
//! assert_eq!(stall, 100);
//! ```

/// Set-associative cache and replacement policies.
pub mod cache;
/// Line addresses, core identifiers and configuration errors.
pub mod common;
/// Model configuration (defaults, policy enums, cache and DRAM settings).
pub mod config;
/// Banked DRAM with row buffers and page controllers.
pub mod dram;
/// Statistics aggregates and fixed-format reports.
pub mod stats;

/// Set-associative cache; construct with `Cache::new`.
pub use crate::cache::Cache;
/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// DRAM module; construct with `Dram::new`.
pub use crate::dram::Dram;
