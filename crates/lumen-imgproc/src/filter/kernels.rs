use lumen_image::ImageError;

/// A square correlation kernel with an odd side length.
///
/// Weights are indexed `[i][j]`: `i` runs along the width (x) axis and `j`
/// along the height (y) axis, so `get(i, j)` weighs the sample at
/// `(x + i - half, y + j - half)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    side: usize,
    weights: Vec<f64>,
}

impl Kernel {
    /// Create a kernel from nested rows of weights.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidKernel`] if the kernel is empty, not square,
    /// or has an even side.
    ///
    /// # Examples
    ///
    /// ```
    /// use lumen_imgproc::filter::kernels::Kernel;
    ///
    /// let kernel = Kernel::new(vec![
    ///     vec![0.0, 1.0, 0.0],
    ///     vec![1.0, -4.0, 1.0],
    ///     vec![0.0, 1.0, 0.0],
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(kernel.side(), 3);
    /// assert_eq!(kernel.half(), 1);
    /// assert_eq!(kernel.sum(), 0.0);
    ///
    /// assert!(Kernel::new(vec![vec![1.0, 1.0], vec![1.0, 1.0]]).is_err());
    /// ```
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self, ImageError> {
        let side = rows.len();
        validate_side(side)?;

        if let Some(row) = rows.iter().find(|row| row.len() != side) {
            return Err(ImageError::InvalidKernel(format!(
                "expected {side} weights per row, got {}",
                row.len()
            )));
        }

        Ok(Self {
            side,
            weights: rows.into_iter().flatten().collect(),
        })
    }

    /// Create a kernel of side `side` where every weight is `f(i, j)`.
    pub fn from_fn(side: usize, f: impl Fn(usize, usize) -> f64) -> Result<Self, ImageError> {
        validate_side(side)?;
        let weights = (0..side)
            .flat_map(|i| (0..side).map(move |j| (i, j)))
            .map(|(i, j)| f(i, j))
            .collect();
        Ok(Self { side, weights })
    }

    /// Side length `n` of the kernel.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Reach of the kernel around its center, `floor(n / 2)`.
    pub fn half(&self) -> usize {
        self.side / 2
    }

    /// Weight at `[i][j]`.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is not below [`Kernel::side`].
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.weights[i * self.side + j]
    }

    /// Weights along the first index `i`, each of length `n`.
    pub fn rows(&self) -> std::slice::ChunksExact<'_, f64> {
        self.weights.chunks_exact(self.side)
    }

    /// Total weight of the kernel.
    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }
}

fn validate_side(side: usize) -> Result<(), ImageError> {
    if side == 0 {
        return Err(ImageError::InvalidKernel("kernel is empty".to_string()));
    }
    if side % 2 == 0 {
        return Err(ImageError::InvalidKernel(format!(
            "kernel side must be odd, got {side}"
        )));
    }
    Ok(())
}

/// Create a box blur kernel where every weight is `1 / (n * n)`.
///
/// # Arguments
///
/// * `kernel_size` - The side of the kernel, must be odd.
pub fn box_blur_kernel(kernel_size: usize) -> Result<Kernel, ImageError> {
    let weight = 1.0 / (kernel_size * kernel_size) as f64;
    Kernel::from_fn(kernel_size, |_, _| weight)
}

/// Create an unsharp mask kernel: `2 * identity - box_blur(n)`.
///
/// Every weight is `-1 / (n * n)` except the center, which is
/// `2 - 1 / (n * n)`.
///
/// # Arguments
///
/// * `kernel_size` - The side of the kernel, must be odd.
pub fn sharpen_kernel(kernel_size: usize) -> Result<Kernel, ImageError> {
    let weight = -1.0 / (kernel_size * kernel_size) as f64;
    let center = kernel_size / 2;
    Kernel::from_fn(kernel_size, |i, j| {
        if i == center && j == center {
            weight + 2.0
        } else {
            weight
        }
    })
}

/// Create the pair of 3x3 Sobel kernels used for edge magnitude.
///
/// # Returns
///
/// The `(horizontal, vertical)` kernels
/// `[[-1,-2,-1],[0,0,0],[1,2,1]]` and `[[-1,0,1],[-2,0,2],[-1,0,1]]`.
pub fn sobel_kernels3() -> (Kernel, Kernel) {
    const HORIZONTAL: [[f64; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];
    const VERTICAL: [[f64; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];

    let build = |weights: [[f64; 3]; 3]| Kernel {
        side: 3,
        weights: weights.into_iter().flatten().collect(),
    };
    (build(HORIZONTAL), build(VERTICAL))
}
