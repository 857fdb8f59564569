use lumen_image::{Grid, ImageError};

use super::border::clamped_window;
use super::kernels::Kernel;
use crate::parallel::{self, ExecutionStrategy};
use crate::quantize::quantize_grid;

/// Correlate a grid with a kernel, returning the raw, unclamped responses.
///
/// Each output sample `(x, y)` is
/// `sum(kernel[i][j] * src(clamp(x + i - half), clamp(y + j - half)))`
/// accumulated in `f64`, where coordinates past an edge are clamped to that
/// edge. The kernel is not flipped.
///
/// # Arguments
///
/// * `src` - The source grid.
/// * `kernel` - The correlation kernel.
///
/// # Returns
///
/// A grid of the same size as `src` holding the raw responses.
pub fn correlate_raw<T>(src: &Grid<T>, kernel: &Kernel) -> Result<Grid<f64>, ImageError>
where
    T: Copy + Into<f64> + Sync,
{
    correlate_raw_with_strategy(src, kernel, ExecutionStrategy::default())
}

/// Same as [`correlate_raw`] with an explicit execution strategy.
pub fn correlate_raw_with_strategy<T>(
    src: &Grid<T>,
    kernel: &Kernel,
    strategy: ExecutionStrategy,
) -> Result<Grid<f64>, ImageError>
where
    T: Copy + Into<f64> + Sync,
{
    let mut dst = Grid::<f64>::zeros(src.size())?;

    let (width, height) = (src.width(), src.height());
    let (side, half) = (kernel.side(), kernel.half());

    log::debug!(
        "correlating {} grid with {side}x{side} kernel ({strategy:?})",
        src.size()
    );

    parallel::iter_rows_mut(&mut dst, strategy, |y, dst_row| {
        let mut ys = vec![0usize; side];
        let mut xs = vec![0usize; side];
        clamped_window(y, half, height, &mut ys);

        for (x, out) in dst_row.iter_mut().enumerate() {
            clamped_window(x, half, width, &mut xs);

            let mut acc = 0.0;
            for (&sx, weights) in xs.iter().zip(kernel.rows()) {
                for (&sy, &w) in ys.iter().zip(weights) {
                    let sample: f64 = src.row(sy)[sx].into();
                    acc += w * sample;
                }
            }
            *out = acc;
        }
    });

    Ok(dst)
}

/// Correlate a grid with a kernel and quantize the result to 8-bit samples.
///
/// # Example
///
/// ```
/// use lumen_image::Grid;
/// use lumen_imgproc::filter::{correlate, kernels::Kernel};
///
/// let grid = Grid::new([3, 1].into(), vec![0u8, 10, 20]).unwrap();
/// let shift = Kernel::new(vec![vec![0.0, 0.0, 0.0], vec![0.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]]).unwrap();
///
/// // samples are pulled from the right neighbour, the last one clamps to itself
/// let shifted = correlate(&grid, &shift).unwrap();
/// assert_eq!(shifted.as_slice(), &[10, 20, 20]);
/// ```
pub fn correlate<T>(src: &Grid<T>, kernel: &Kernel) -> Result<Grid<u8>, ImageError>
where
    T: Copy + Into<f64> + Sync,
{
    correlate_with_strategy(src, kernel, ExecutionStrategy::default())
}

/// Same as [`correlate`] with an explicit execution strategy.
pub fn correlate_with_strategy<T>(
    src: &Grid<T>,
    kernel: &Kernel,
    strategy: ExecutionStrategy,
) -> Result<Grid<u8>, ImageError>
where
    T: Copy + Into<f64> + Sync,
{
    let raw = correlate_raw_with_strategy(src, kernel, strategy)?;
    Ok(quantize_grid(&raw, strategy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lumen_image::GridSize;

    const STRATEGIES: [ExecutionStrategy; 2] =
        [ExecutionStrategy::Serial, ExecutionStrategy::ParallelRows];

    #[test]
    fn test_correlate_preserves_size() -> Result<(), ImageError> {
        let grid = Grid::new([5, 3].into(), (0..15u8).collect())?;
        for side in [1, 3, 5, 7, 9] {
            let kernel = Kernel::from_fn(side, |i, j| (i + j) as f64)?;
            assert_eq!(correlate(&grid, &kernel)?.size(), grid.size());
            assert_eq!(correlate_raw(&grid, &kernel)?.size(), grid.size());
        }
        Ok(())
    }

    #[test]
    fn test_correlate_single_sample() -> Result<(), ImageError> {
        // every neighbour of a 1x1 grid clamps onto the one sample
        let grid = Grid::new([1, 1].into(), vec![40u8])?;

        let kernel = Kernel::from_fn(5, |i, j| if (i + j) % 2 == 0 { 0.25 } else { -0.1 })?;
        let raw = correlate_raw(&grid, &kernel)?;
        assert_relative_eq!(raw.as_slice()[0], 40.0 * kernel.sum(), epsilon = 1e-9);
        assert_eq!(
            correlate(&grid, &kernel)?.as_slice(),
            &[crate::quantize::quantize(40.0 * kernel.sum())]
        );

        let kernel = Kernel::from_fn(3, |_, _| 1.0)?;
        assert_eq!(correlate(&grid, &kernel)?.as_slice(), &[255]);

        let kernel = Kernel::from_fn(3, |_, _| -1.0)?;
        assert_eq!(correlate(&grid, &kernel)?.as_slice(), &[0]);
        Ok(())
    }

    #[test]
    fn test_correlate_clamp_multiplicity() -> Result<(), ImageError> {
        let grid = Grid::new([3, 1].into(), vec![0u8, 0, 90])?;
        let kernel = Kernel::from_fn(3, |_, _| 1.0)?;

        // the 90 is visited 0, 3 and 6 times by the three neighbourhoods
        let raw = correlate_raw(&grid, &kernel)?;
        assert_eq!(raw.as_slice(), &[0.0, 270.0, 540.0]);
        Ok(())
    }

    #[test]
    fn test_correlate_axes_not_flipped() -> Result<(), ImageError> {
        #[rustfmt::skip]
        let grid = Grid::new(
            [3, 3].into(),
            vec![
                1u8, 2, 3,
                4, 5, 6,
                7, 8, 9,
            ],
        )?;

        // pick the neighbour at (x + 1, y)
        let right = Kernel::from_fn(3, |i, j| if i == 2 && j == 1 { 1.0 } else { 0.0 })?;
        #[rustfmt::skip]
        assert_eq!(
            correlate(&grid, &right)?.as_slice(),
            &[
                2, 3, 3,
                5, 6, 6,
                8, 9, 9,
            ]
        );

        // pick the neighbour at (x, y - 1)
        let up = Kernel::from_fn(3, |i, j| if i == 1 && j == 0 { 1.0 } else { 0.0 })?;
        #[rustfmt::skip]
        assert_eq!(
            correlate(&grid, &up)?.as_slice(),
            &[
                1, 2, 3,
                1, 2, 3,
                4, 5, 6,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_correlate_raw_is_unclamped() -> Result<(), ImageError> {
        let grid = Grid::new([2, 1].into(), vec![200u8, 100])?;
        let double = Kernel::new(vec![vec![2.0]])?;
        let negate = Kernel::new(vec![vec![-1.0]])?;

        assert_eq!(correlate_raw(&grid, &double)?.as_slice(), &[400.0, 200.0]);
        assert_eq!(correlate_raw(&grid, &negate)?.as_slice(), &[-200.0, -100.0]);
        assert_eq!(correlate(&grid, &double)?.as_slice(), &[255, 200]);
        assert_eq!(correlate(&grid, &negate)?.as_slice(), &[0, 0]);
        Ok(())
    }

    #[test]
    fn test_correlate_strategies_agree() -> Result<(), ImageError> {
        let size = GridSize {
            width: 17,
            height: 11,
        };
        let data: Vec<u8> = (0..17 * 11).map(|i| ((i * 37) % 256) as u8).collect();
        let grid = Grid::new(size, data)?;
        let kernel = Kernel::from_fn(5, |i, j| (i as f64 - 2.0) * 0.3 + j as f64 * 0.1)?;

        let expected = correlate_raw_with_strategy(&grid, &kernel, ExecutionStrategy::Serial)?;
        for strategy in STRATEGIES {
            let raw = correlate_raw_with_strategy(&grid, &kernel, strategy)?;
            assert_eq!(raw, expected, "{strategy:?}");
        }
        Ok(())
    }

    #[test]
    fn test_correlate_float_source() -> Result<(), ImageError> {
        let grid = Grid::new([2, 1].into(), vec![1.5f64, -3.0])?;
        let kernel = Kernel::from_fn(3, |_, j| if j == 1 { 1.0 } else { 0.0 })?;
        // the kernel sums the three x-neighbours of each sample
        assert_eq!(correlate_raw(&grid, &kernel)?.as_slice(), &[0.0, -4.5]);
        Ok(())
    }
}
