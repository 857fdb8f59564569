use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::ImageFormat;
use lumen_image::Grid;

use crate::{error::IoError, functional::encode_image_gray};

/// Encodes a grid as a single-frame GIF and returns it as standard base64.
///
/// This is the payload a display surface embeds to show a grid.
///
/// # Arguments
///
/// * `grid` - The grid to encode.
///
/// # Example
///
/// ```
/// use lumen_image::Grid;
/// use lumen_io::gif::gif_base64;
///
/// let grid = Grid::from_size_val([4, 4].into(), 200u8).unwrap();
/// let payload = gif_base64(&grid).unwrap();
///
/// assert!(payload.starts_with("R0lGOD"));
/// ```
pub fn gif_base64(grid: &Grid<u8>) -> Result<String, IoError> {
    let bytes = encode_image_gray(grid, ImageFormat::Gif)?;
    Ok(STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functional::decode_image_gray;

    #[test]
    fn gif_payload_decodes() -> Result<(), IoError> {
        #[rustfmt::skip]
        let grid = Grid::new(
            [3, 2].into(),
            vec![
                0u8, 255, 0,
                255, 0, 255,
            ],
        )?;

        let payload = gif_base64(&grid)?;
        assert!(payload.starts_with("R0lGOD"));

        let bytes = STANDARD
            .decode(payload)
            .map_err(|e| IoError::UnsupportedFormat(e.to_string()))?;
        let decoded = decode_image_gray(&bytes)?;
        assert_eq!(decoded.size(), grid.size());

        // pure black and white survive palette quantization
        assert_eq!(decoded.as_slice(), grid.as_slice());
        Ok(())
    }
}
