use std::{io::Cursor, path::Path};

use image::{DynamicImage, GrayImage, ImageFormat};
use lumen_image::{Grid, GridSize, ImageError};
use lumen_imgproc::color::{gray_from_luma_alpha, gray_from_rgb, gray_from_rgba};

use crate::error::IoError;

/// Reads an image from the given file path as 8-bit luminance.
///
/// The method reads any format supported by the image crate. Color sources
/// are converted with the `0.299 R + 0.587 G + 0.114 B` weighting, gray with
/// alpha keeps its gray channel and 8-bit gray passes through.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Errors
///
/// Returns [`IoError::FileDoesNotExist`] for a missing file and
/// [`IoError::UnsupportedFormat`] for sources that are not 8 bits per channel.
pub fn read_image_gray(file_path: impl AsRef<Path>) -> Result<Grid<u8>, IoError> {
    let file_path = file_path.as_ref();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let bytes = std::fs::read(file_path)?;
    let grid = decode_image_gray(&bytes)?;

    log::debug!("read {} grid from {}", grid.size(), file_path.display());

    Ok(grid)
}

/// Decodes an in-memory image as 8-bit luminance.
///
/// # Arguments
///
/// * `bytes` - The encoded image, format is guessed from its content.
pub fn decode_image_gray(bytes: &[u8]) -> Result<Grid<u8>, IoError> {
    let img = image::load_from_memory(bytes)?;
    gray_from_dynamic(img)
}

fn gray_from_dynamic(img: DynamicImage) -> Result<Grid<u8>, IoError> {
    let size = GridSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    let grid = match img {
        DynamicImage::ImageLuma8(buf) => Grid::new(size, buf.into_raw())?,
        DynamicImage::ImageLumaA8(buf) => gray_from_luma_alpha(size, buf.as_raw())?,
        DynamicImage::ImageRgb8(buf) => gray_from_rgb(size, buf.as_raw())?,
        DynamicImage::ImageRgba8(buf) => gray_from_rgba(size, buf.as_raw())?,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "{:?} cannot be read as 8-bit luminance",
                other.color()
            )))
        }
    };

    Ok(grid)
}

/// Writes a grid to the given file path as a grayscale image.
///
/// The format is deduced from the file extension.
///
/// # Arguments
///
/// * `file_path` - The destination path.
/// * `grid` - The grid to write.
pub fn write_image_gray(file_path: impl AsRef<Path>, grid: &Grid<u8>) -> Result<(), IoError> {
    let file_path = file_path.as_ref();

    let format = ImageFormat::from_path(file_path)
        .map_err(|_| IoError::InvalidFileExtension(file_path.to_path_buf()))?;

    let bytes = encode_image_gray(grid, format)?;
    std::fs::write(file_path, bytes)?;

    log::debug!("wrote {} grid to {}", grid.size(), file_path.display());

    Ok(())
}

/// Encodes a grid as a grayscale image in the given format.
///
/// # Arguments
///
/// * `grid` - The grid to encode.
/// * `format` - The target container format.
///
/// # Example
///
/// ```
/// use image::ImageFormat;
/// use lumen_image::Grid;
/// use lumen_io::functional::{decode_image_gray, encode_image_gray};
///
/// let grid = Grid::new([2, 2].into(), vec![0u8, 64, 128, 255]).unwrap();
/// let png = encode_image_gray(&grid, ImageFormat::Png).unwrap();
///
/// assert_eq!(decode_image_gray(&png).unwrap(), grid);
/// ```
pub fn encode_image_gray(grid: &Grid<u8>, format: ImageFormat) -> Result<Vec<u8>, IoError> {
    let buf = gray_buffer(grid)?;
    let mut bytes = Cursor::new(Vec::new());

    match format {
        // the gif encoder only takes rgb(a) frames
        ImageFormat::Gif => DynamicImage::ImageLuma8(buf)
            .to_rgb8()
            .write_to(&mut bytes, format),
        _ => buf.write_to(&mut bytes, format),
    }
    .map_err(IoError::ImageEncodeError)?;

    Ok(bytes.into_inner())
}

fn gray_buffer(grid: &Grid<u8>) -> Result<GrayImage, IoError> {
    let [width, height]: [u32; 2] = grid.size().try_into()?;
    GrayImage::from_raw(width, height, grid.as_slice().to_vec()).ok_or(
        IoError::ImageCreationError(ImageError::InvalidDataLength(
            grid.num_samples(),
            grid.size().num_samples(),
        )),
    )
}
