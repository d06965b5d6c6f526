//! Common infrastructure shared across parsing and analysis
//!
//! This module provides:
//! - Plain data types for decoded events and running tallies
//! - A synthetic data-file builder for tests

pub mod data_structures;

#[cfg(test)]
pub mod test_data;

// Re-export commonly used items
pub use data_structures::{CategoryTally, EventRecord, FiberLayerCounts, PaddleHit};
