use rayon::prelude::*;

use lumen_image::{Grid, ImageError};

/// Controls how row-wise operations are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool to process rows in parallel.
    #[default]
    ParallelRows,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small grids, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,
}

impl ExecutionStrategy {
    /// Whether this strategy dispatches work to the thread pool.
    pub fn is_parallel(&self) -> bool {
        matches!(self, ExecutionStrategy::ParallelRows)
    }
}

/// Fill every row of `dst` with `f(y, row)`.
///
/// Rows are handed out exactly once, so `f` only ever sees the row it owns.
pub fn iter_rows_mut<T>(
    dst: &mut Grid<T>,
    strategy: ExecutionStrategy,
    f: impl Fn(usize, &mut [T]) + Send + Sync,
) where
    T: Send,
{
    let cols = dst.width();
    match strategy {
        ExecutionStrategy::Serial => dst
            .as_slice_mut()
            .chunks_exact_mut(cols)
            .enumerate()
            .for_each(|(y, row)| f(y, row)),
        ExecutionStrategy::ParallelRows => dst
            .as_slice_mut()
            .par_chunks_exact_mut(cols)
            .enumerate()
            .for_each(|(y, row)| f(y, row)),
    }
}

/// Apply a function to each pair of samples of two same-sized grids.
///
/// # Errors
///
/// Returns [`ImageError::SizeMismatch`] unless `src1`, `src2` and `dst` share
/// one size. Nothing is written in that case.
pub fn iter_samples_two<T1, T2, T3>(
    src1: &Grid<T1>,
    src2: &Grid<T2>,
    dst: &mut Grid<T3>,
    strategy: ExecutionStrategy,
    f: impl Fn(&T1, &T2, &mut T3) + Send + Sync,
) -> Result<(), ImageError>
where
    T1: Sync,
    T2: Sync,
    T3: Send,
{
    if src1.size() != src2.size() {
        return Err(ImageError::SizeMismatch(src1.size(), src2.size()));
    }
    if src1.size() != dst.size() {
        return Err(ImageError::SizeMismatch(src1.size(), dst.size()));
    }

    let cols = src1.width();
    match strategy {
        ExecutionStrategy::Serial => src1
            .as_slice()
            .iter()
            .zip(src2.as_slice().iter())
            .zip(dst.as_slice_mut().iter_mut())
            .for_each(|((a, b), out)| f(a, b, out)),
        ExecutionStrategy::ParallelRows => src1
            .as_slice()
            .par_chunks_exact(cols)
            .zip(src2.as_slice().par_chunks_exact(cols))
            .zip(dst.as_slice_mut().par_chunks_exact_mut(cols))
            .for_each(|((row1, row2), dst_row)| {
                row1.iter()
                    .zip(row2.iter())
                    .zip(dst_row.iter_mut())
                    .for_each(|((a, b), out)| f(a, b, out));
            }),
    }

    Ok(())
}
