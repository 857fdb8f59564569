use lumen_image::{Grid, ImageError};

use super::{correlate_raw_with_strategy, correlate_with_strategy, kernels};
use crate::parallel::{self, ExecutionStrategy};
use crate::quantize::quantize;

/// Invert a grayscale grid, mapping every sample `c` to `255 - c`.
///
/// # Example
///
/// ```
/// use lumen_image::Grid;
/// use lumen_imgproc::filter::invert;
///
/// let grid = Grid::new([3, 1].into(), vec![0u8, 100, 255]).unwrap();
/// assert_eq!(invert(&grid).as_slice(), &[255, 155, 0]);
/// ```
pub fn invert(src: &Grid<u8>) -> Grid<u8> {
    src.map(|c| u8::MAX - c)
}

/// Blur a grid with an `n x n` box filter.
///
/// # Arguments
///
/// * `src` - The source grid.
/// * `kernel_size` - The side of the box, must be odd. `1` is the identity.
///
/// # Errors
///
/// Returns [`ImageError::InvalidKernel`] for a zero or even `kernel_size`.
pub fn box_blur(src: &Grid<u8>, kernel_size: usize) -> Result<Grid<u8>, ImageError> {
    box_blur_with_strategy(src, kernel_size, ExecutionStrategy::default())
}

/// Same as [`box_blur`] with an explicit execution strategy.
pub fn box_blur_with_strategy(
    src: &Grid<u8>,
    kernel_size: usize,
    strategy: ExecutionStrategy,
) -> Result<Grid<u8>, ImageError> {
    let kernel = kernels::box_blur_kernel(kernel_size)?;
    correlate_with_strategy(src, &kernel, strategy)
}

/// Sharpen a grid with an unsharp mask, `2 * src - box_blur(src, n)`.
///
/// # Arguments
///
/// * `src` - The source grid.
/// * `kernel_size` - The side of the blur used for the mask, must be odd.
///
/// # Errors
///
/// Returns [`ImageError::InvalidKernel`] for a zero or even `kernel_size`.
pub fn sharpen(src: &Grid<u8>, kernel_size: usize) -> Result<Grid<u8>, ImageError> {
    sharpen_with_strategy(src, kernel_size, ExecutionStrategy::default())
}

/// Same as [`sharpen`] with an explicit execution strategy.
pub fn sharpen_with_strategy(
    src: &Grid<u8>,
    kernel_size: usize,
    strategy: ExecutionStrategy,
) -> Result<Grid<u8>, ImageError> {
    let kernel = kernels::sharpen_kernel(kernel_size)?;
    correlate_with_strategy(src, &kernel, strategy)
}

/// Compute the Sobel gradient magnitude of a grid.
///
/// Both 3x3 Sobel responses are computed unclamped, combined as
/// `sqrt(h^2 + v^2)` and quantized once.
///
/// # Example
///
/// ```
/// use lumen_image::Grid;
/// use lumen_imgproc::filter::edges;
///
/// let flat = Grid::from_size_val([4, 4].into(), 77u8).unwrap();
/// assert!(edges(&flat).unwrap().as_slice().iter().all(|&s| s == 0));
/// ```
pub fn edges(src: &Grid<u8>) -> Result<Grid<u8>, ImageError> {
    edges_with_strategy(src, ExecutionStrategy::default())
}

/// Same as [`edges`] with an explicit execution strategy.
pub fn edges_with_strategy(
    src: &Grid<u8>,
    strategy: ExecutionStrategy,
) -> Result<Grid<u8>, ImageError> {
    let (sobel_h, sobel_v) = kernels::sobel_kernels3();

    let gh = correlate_raw_with_strategy(src, &sobel_h, strategy)?;
    let gv = correlate_raw_with_strategy(src, &sobel_v, strategy)?;

    let mut dst = Grid::<u8>::zeros(src.size())?;
    parallel::iter_samples_two(&gh, &gv, &mut dst, strategy, |&h, &v, out| {
        *out = quantize((h * h + v * v).sqrt());
    })?;

    Ok(dst)
}
