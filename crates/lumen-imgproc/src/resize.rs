use lumen_image::{Grid, GridSize, ImageError};

use crate::filter::clamp_to_edge;

/// Resize a grid to a new size using nearest neighbor sampling.
///
/// Destination sample `x` reads source column `floor((x + 0.5) * src_w / dst_w)`,
/// and likewise for rows.
///
/// # Arguments
///
/// * `src` - The input grid.
/// * `new_size` - The size of the output grid.
///
/// # Example
///
/// ```
/// use lumen_image::Grid;
/// use lumen_imgproc::resize::resize_nearest;
///
/// let grid = Grid::new([2, 1].into(), vec![10u8, 20]).unwrap();
/// let resized = resize_nearest(&grid, [4, 2].into()).unwrap();
///
/// assert_eq!(resized.as_slice(), &[10, 10, 20, 20, 10, 10, 20, 20]);
/// ```
pub fn resize_nearest<T>(src: &Grid<T>, new_size: GridSize) -> Result<Grid<T>, ImageError>
where
    T: Copy,
{
    let mut samples = Vec::with_capacity(new_size.num_samples());

    let xs = nearest_indices(src.width(), new_size.width);
    let ys = nearest_indices(src.height(), new_size.height);

    for &sy in ys.iter() {
        let row = src.row(sy);
        samples.extend(xs.iter().map(|&sx| row[sx]));
    }

    Grid::new(new_size, samples)
}

fn nearest_indices(src_len: usize, dst_len: usize) -> Vec<usize> {
    let scale = src_len as f64 / dst_len as f64;
    (0..dst_len)
        .map(|i| clamp_to_edge(((i as f64 + 0.5) * scale).floor() as isize, src_len))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_nearest_identity() -> Result<(), ImageError> {
        let grid = Grid::new([3, 2].into(), vec![1u8, 2, 3, 4, 5, 6])?;
        assert_eq!(resize_nearest(&grid, grid.size())?, grid);
        Ok(())
    }

    #[test]
    fn test_resize_nearest_downscale() -> Result<(), ImageError> {
        #[rustfmt::skip]
        let grid = Grid::new(
            [4, 4].into(),
            vec![
                0u8, 1, 2, 3,
                4, 5, 6, 7,
                8, 9, 10, 11,
                12, 13, 14, 15,
            ],
        )?;
        let resized = resize_nearest(&grid, [2, 2].into())?;
        assert_eq!(resized.as_slice(), &[5, 7, 13, 15]);
        Ok(())
    }

    #[test]
    fn test_resize_nearest_invalid_size() -> Result<(), ImageError> {
        let grid = Grid::new([2, 2].into(), vec![1u8, 2, 3, 4])?;
        assert_eq!(
            resize_nearest(&grid, [0, 3].into()),
            Err(ImageError::InvalidDimension(0, 3))
        );
        Ok(())
    }
}
