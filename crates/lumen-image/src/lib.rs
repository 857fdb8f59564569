#![deny(missing_docs)]
//! Sample grid types for grayscale image filtering

/// Row-major sample grid.
pub mod grid;

/// Error types for the image module.
pub mod error;

pub use crate::error::ImageError;
pub use crate::grid::{Grid, GridSize};
