//! DRAM tests.

/// Page controllers driven directly against a row-buffer entry.
pub mod controller;
