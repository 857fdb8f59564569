use lumen_image::{Grid, GridSize, ImageError};
use lumen_imgproc::filter::{self, kernels::Kernel};
use lumen_imgproc::parallel::ExecutionStrategy;
use lumen_imgproc::quantize::quantize;

fn checkerboard(size: GridSize, cell: usize) -> Result<Grid<u8>, ImageError> {
    let data = (0..size.height)
        .flat_map(|y| {
            (0..size.width).map(move |x| {
                if (x / cell + y / cell) % 2 == 0 {
                    30
                } else {
                    220
                }
            })
        })
        .collect();
    Grid::new(size, data)
}

#[test]
fn test_filters_preserve_shape() -> Result<(), ImageError> {
    let size = GridSize {
        width: 13,
        height: 6,
    };
    let grid = checkerboard(size, 2)?;

    assert_eq!(filter::invert(&grid).size(), size);
    for n in [1, 3, 5, 7, 9, 11, 13, 15] {
        assert_eq!(filter::box_blur(&grid, n)?.size(), size);
        assert_eq!(filter::sharpen(&grid, n)?.size(), size);
    }
    assert_eq!(filter::edges(&grid)?.size(), size);
    Ok(())
}

#[test]
fn test_single_sample_grid_scales_by_kernel_weight() -> Result<(), ImageError> {
    for value in [0u8, 3, 100, 255] {
        let grid = Grid::new([1, 1].into(), vec![value])?;
        for side in [1, 3, 5] {
            for scale in [0.0, 0.25, 1.0, 1.7, -0.5] {
                let weight = scale / (side * side) as f64;
                let kernel = Kernel::from_fn(side, |_, _| weight)?;
                let out = filter::correlate(&grid, &kernel)?;
                assert_eq!(
                    out.as_slice(),
                    &[quantize(f64::from(value) * kernel.sum())],
                    "value={value} side={side} scale={scale}"
                );
            }
        }

        // blur and sharpen both have unit weight
        assert_eq!(filter::box_blur(&grid, 7)?, grid);
        assert_eq!(filter::sharpen(&grid, 7)?, grid);
        assert_eq!(filter::edges(&grid)?.as_slice(), &[0]);
    }
    Ok(())
}

#[test]
fn test_blur_matches_manual_clamped_average() -> Result<(), ImageError> {
    let grid = checkerboard([5, 4].into(), 1)?;
    let blurred = filter::box_blur(&grid, 3)?;

    for y in 0..grid.height() as isize {
        for x in 0..grid.width() as isize {
            let mut sum = 0.0;
            for dx in -1..=1 {
                for dy in -1..=1 {
                    let sx = filter::clamp_to_edge(x + dx, grid.width());
                    let sy = filter::clamp_to_edge(y + dy, grid.height());
                    sum += (1.0 / 9.0) * f64::from(grid.get(sx, sy)?);
                }
            }
            assert_eq!(blurred.get(x as usize, y as usize)?, quantize(sum));
        }
    }
    Ok(())
}

#[test]
fn test_sharpen_is_twice_minus_blur() -> Result<(), ImageError> {
    // pick samples whose blur is exact so no rounding ties appear
    let grid = Grid::new([4, 1].into(), vec![9u8, 18, 27, 36])?;
    let blurred = filter::box_blur(&grid, 3)?;
    let sharpened = filter::sharpen(&grid, 3)?;

    for x in 0..grid.width() {
        let expected = 2.0 * f64::from(grid.get(x, 0)?) - f64::from(blurred.get(x, 0)?);
        assert_eq!(sharpened.get(x, 0)?, quantize(expected));
    }
    Ok(())
}

#[test]
fn test_edges_on_vertical_step() -> Result<(), ImageError> {
    // left half dark, right half bright
    let size = GridSize {
        width: 4,
        height: 3,
    };
    let data: Vec<u8> = (0..size.num_samples())
        .map(|i| if i % size.width < 2 { 10 } else { 50 })
        .collect();
    let grid = Grid::new(size, data)?;

    let out = filter::edges(&grid)?;
    // response is 4 * 40 across the step and 0 away from it
    for row in out.rows() {
        assert_eq!(row, &[0, 160, 160, 0]);
    }
    Ok(())
}

#[test]
fn test_strategies_are_bit_identical() -> Result<(), ImageError> {
    let grid = checkerboard([31, 17].into(), 3)?;
    let serial = ExecutionStrategy::Serial;
    let parallel = ExecutionStrategy::ParallelRows;

    assert_eq!(
        filter::box_blur_with_strategy(&grid, 5, serial)?,
        filter::box_blur_with_strategy(&grid, 5, parallel)?
    );
    assert_eq!(
        filter::sharpen_with_strategy(&grid, 3, serial)?,
        filter::sharpen_with_strategy(&grid, 3, parallel)?
    );
    assert_eq!(
        filter::edges_with_strategy(&grid, serial)?,
        filter::edges_with_strategy(&grid, parallel)?
    );
    Ok(())
}
