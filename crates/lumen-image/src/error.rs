/// An error type for grids and the operations built on them.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ImageError {
    /// Error when a grid is requested with a zero width or height.
    #[error("Invalid grid dimension ({0}x{1}), width and height must be > 0")]
    InvalidDimension(usize, usize),

    /// Error when a side does not fit the 32-bit range used by image codecs.
    #[error("Grid dimension ({0}x{1}) exceeds the 32-bit range of image containers")]
    DimensionTooLarge(usize, usize),

    /// Error when a coordinate falls outside the grid.
    #[error("Coordinate ({x}, {y}) is out of range for a {width}x{height} grid")]
    OutOfRange {
        /// Requested column.
        x: usize,
        /// Requested row.
        y: usize,
        /// Width of the grid.
        width: usize,
        /// Height of the grid.
        height: usize,
    },

    /// Error when the sample buffer does not match the grid size.
    #[error("Data length ({0}) does not match the grid size ({1})")]
    InvalidDataLength(usize, usize),

    /// Error when grids that must share a shape do not.
    #[error("Grid size mismatch: {0} vs {1}")]
    SizeMismatch(crate::GridSize, crate::GridSize),

    /// Error when a kernel is empty, not square or has an even side.
    #[error("Invalid kernel: {0}")]
    InvalidKernel(String),
}
