//! Common types shared by the cache and DRAM models.
//!
//! This module provides the small building blocks used on both sides of the
//! hierarchy. It includes:
//! 1. **Address Types:** Line-granular addresses and core identifiers.
//! 2. **Error Handling:** Construction-time configuration errors.

/// Line address and core identifier types.
pub mod addr;

/// Configuration error types.
pub mod error;

pub use addr::{CoreId, LineAddr};
pub use error::ConfigError;
