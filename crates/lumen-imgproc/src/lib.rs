#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// color transformations module.
pub mod color;

/// image filtering module.
pub mod filter;

/// module containing parallization utilities.
pub mod parallel;

/// conversion of raw filter responses to 8-bit samples.
pub mod quantize;

/// utility functions for resizing grids.
pub mod resize;
