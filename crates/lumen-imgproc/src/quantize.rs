use lumen_image::Grid;

use crate::parallel::{self, ExecutionStrategy};

/// Largest value an 8-bit luminance sample can hold.
pub const MAX_SAMPLE: f64 = 255.0;

/// Quantize a raw filter response to an 8-bit luminance sample.
///
/// The value is clamped to `[0, 255]` and then rounded to the nearest integer,
/// with exact halves going to the even neighbour. Every quantization point in
/// the crate goes through this function.
///
/// # Examples
///
/// ```
/// use lumen_imgproc::quantize::quantize;
///
/// assert_eq!(quantize(28.333), 28);
/// assert_eq!(quantize(2.5), 2);
/// assert_eq!(quantize(3.5), 4);
/// assert_eq!(quantize(-12.0), 0);
/// assert_eq!(quantize(400.0), 255);
/// ```
#[inline]
pub fn quantize(value: f64) -> u8 {
    // NaN falls through clamp and saturates to 0 in the cast
    value.clamp(0.0, MAX_SAMPLE).round_ties_even() as u8
}

/// Quantize every sample of a raw grid.
pub fn quantize_grid(src: &Grid<f64>, strategy: ExecutionStrategy) -> Grid<u8> {
    let mut dst = src.map(|_| 0u8);
    parallel::iter_rows_mut(&mut dst, strategy, |y, row| {
        row.iter_mut()
            .zip(src.row(y))
            .for_each(|(out, &raw)| *out = quantize(raw));
    });
    dst
}
