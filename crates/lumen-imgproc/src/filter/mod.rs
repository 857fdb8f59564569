//! Filter operations
//!
//! This module provides the clamp-to-edge correlation engine and the filters
//! built on it.

/// Filter kernels
pub mod kernels;

/// Border handling
mod border;
pub use border::clamp_to_edge;

/// Correlation engine
mod correlation;
pub use correlation::*;

/// Filter operations
mod ops;
pub use ops::*;
