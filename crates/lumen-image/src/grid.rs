use crate::error::ImageError;

/// Grid size in samples
///
/// # Examples
///
/// ```
/// use lumen_image::GridSize;
///
/// let size = GridSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(size.width, 10);
/// assert_eq!(size.height, 20);
/// assert_eq!(size.num_samples(), 200);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridSize {
    /// Width of the grid in samples
    pub width: usize,
    /// Height of the grid in samples
    pub height: usize,
}

impl GridSize {
    /// Number of samples covered by this size.
    pub fn num_samples(&self) -> usize {
        self.width * self.height
    }

    fn validate(&self) -> Result<(), ImageError> {
        if self.width == 0 || self.height == 0 {
            return Err(ImageError::InvalidDimension(self.width, self.height));
        }
        Ok(())
    }
}

impl std::fmt::Display for GridSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl From<[usize; 2]> for GridSize {
    fn from(size: [usize; 2]) -> Self {
        GridSize {
            width: size[0],
            height: size[1],
        }
    }
}

impl TryFrom<GridSize> for [u32; 2] {
    type Error = ImageError;

    fn try_from(size: GridSize) -> Result<Self, Self::Error> {
        match (u32::try_from(size.width), u32::try_from(size.height)) {
            (Ok(width), Ok(height)) => Ok([width, height]),
            _ => Err(ImageError::DimensionTooLarge(size.width, size.height)),
        }
    }
}

/// A 2D grid of samples stored in row-major order.
///
/// The sample at `(x, y)` lives at index `x + y * width`. The shape is fixed
/// at construction; only the contents can change.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    size: GridSize,
    data: Vec<T>,
}

impl<T> Grid<T> {
    /// Create a new grid from sample data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the grid in samples.
    /// * `data` - The samples in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidDimension`] if either side is zero and
    /// [`ImageError::InvalidDataLength`] if `data` does not cover the grid.
    ///
    /// # Examples
    ///
    /// ```
    /// use lumen_image::{Grid, GridSize};
    ///
    /// let grid = Grid::new(
    ///     GridSize {
    ///         width: 3,
    ///         height: 2,
    ///     },
    ///     vec![0u8, 1, 2, 3, 4, 5],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(grid.get(2, 1).unwrap(), 5);
    /// ```
    pub fn new(size: GridSize, data: Vec<T>) -> Result<Self, ImageError> {
        size.validate()?;

        if data.len() != size.num_samples() {
            return Err(ImageError::InvalidDataLength(
                data.len(),
                size.num_samples(),
            ));
        }

        Ok(Self { size, data })
    }

    /// Create a new grid filled with a single value.
    pub fn from_size_val(size: GridSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        size.validate()?;
        Ok(Self {
            size,
            data: vec![val; size.num_samples()],
        })
    }

    /// Create a blank grid where every sample is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use lumen_image::Grid;
    ///
    /// let grid = Grid::<u8>::zeros([4, 3].into()).unwrap();
    /// assert!(grid.as_slice().iter().all(|&s| s == 0));
    ///
    /// assert!(Grid::<u8>::zeros([0, 3].into()).is_err());
    /// ```
    pub fn zeros(size: GridSize) -> Result<Self, ImageError>
    where
        T: num_traits::Zero + Clone,
    {
        Self::from_size_val(size, T::zero())
    }

    /// Get the size of the grid.
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Get the width of the grid in samples.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the grid in samples.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of samples in the grid.
    pub fn num_samples(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Result<usize, ImageError> {
        if x >= self.size.width || y >= self.size.height {
            return Err(ImageError::OutOfRange {
                x,
                y,
                width: self.size.width,
                height: self.size.height,
            });
        }
        Ok(x + y * self.size.width)
    }

    /// Get the sample at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::OutOfRange`] if the coordinate is outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Result<T, ImageError>
    where
        T: Copy,
    {
        let idx = self.index(x, y)?;
        Ok(self.data[idx])
    }

    /// Set the sample at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::OutOfRange`] if the coordinate is outside the grid.
    pub fn set(&mut self, x: usize, y: usize, val: T) -> Result<(), ImageError> {
        let idx = self.index(x, y)?;
        self.data[idx] = val;
        Ok(())
    }

    /// Borrow the samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: usize) -> &[T] {
        let start = y * self.size.width;
        &self.data[start..start + self.size.width]
    }

    /// Iterate over the rows of the grid, top to bottom.
    pub fn rows(&self) -> std::slice::ChunksExact<'_, T> {
        self.data.chunks_exact(self.size.width)
    }

    /// Produce a new grid of the same shape by transforming every sample.
    ///
    /// The transform sees one sample at a time; the order of application is
    /// unspecified.
    ///
    /// # Examples
    ///
    /// ```
    /// use lumen_image::Grid;
    ///
    /// let grid = Grid::new([2, 1].into(), vec![10u8, 200]).unwrap();
    /// let inverted = grid.map(|c| 255 - c);
    ///
    /// assert_eq!(inverted.as_slice(), &[245, 55]);
    /// ```
    pub fn map<U, F>(&self, f: F) -> Grid<U>
    where
        T: Copy,
        F: Fn(T) -> U,
    {
        Grid {
            size: self.size,
            data: self.data.iter().map(|&s| f(s)).collect(),
        }
    }

    /// Get the samples as a slice in row-major order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the samples as a mutable slice in row-major order.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the grid and return its samples.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}
