use lumen_image::{Grid, GridSize, ImageError};

use crate::quantize::quantize;

/// Define the RGB weights for the grayscale conversion.
const RW: f64 = 0.299;
const GW: f64 = 0.587;
const BW: f64 = 0.114;

/// Convert interleaved RGB8 samples to a luminance grid using the formula:
///
/// Y = 0.299 * R + 0.587 * G + 0.114 * B
///
/// rounded with the same half-to-even rule as every filter.
///
/// # Arguments
///
/// * `size` - The size of the image in pixels.
/// * `src` - Interleaved `R, G, B` samples, `3 * width * height` long.
///
/// # Example
///
/// ```
/// use lumen_imgproc::color::gray_from_rgb;
///
/// let gray = gray_from_rgb([3, 1].into(), &[255, 0, 0, 0, 255, 0, 0, 0, 255]).unwrap();
/// assert_eq!(gray.as_slice(), &[76, 150, 29]);
/// ```
pub fn gray_from_rgb(size: GridSize, src: &[u8]) -> Result<Grid<u8>, ImageError> {
    gray_from_interleaved::<3>(size, src, luma)
}

/// Convert interleaved RGBA8 samples to a luminance grid, ignoring alpha.
///
/// Uses the same weights as [`gray_from_rgb`].
pub fn gray_from_rgba(size: GridSize, src: &[u8]) -> Result<Grid<u8>, ImageError> {
    gray_from_interleaved::<4>(size, src, luma)
}

/// Take the luminance channel of interleaved LA8 samples.
pub fn gray_from_luma_alpha(size: GridSize, src: &[u8]) -> Result<Grid<u8>, ImageError> {
    gray_from_interleaved::<2>(size, src, |pixel| pixel[0])
}

#[inline]
fn luma(pixel: &[u8]) -> u8 {
    let r = f64::from(pixel[0]);
    let g = f64::from(pixel[1]);
    let b = f64::from(pixel[2]);
    quantize(RW * r + GW * g + BW * b)
}

fn gray_from_interleaved<const C: usize>(
    size: GridSize,
    src: &[u8],
    f: impl Fn(&[u8]) -> u8,
) -> Result<Grid<u8>, ImageError> {
    let expected = size.num_samples() * C;
    if src.len() != expected {
        return Err(ImageError::InvalidDataLength(src.len(), expected));
    }

    Grid::new(size, src.chunks_exact(C).map(f).collect())
}
