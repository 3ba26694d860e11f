use crate::error::TensorError;

/// Maximum number of spatial axes an array can have.
pub const MAX_DIMS: usize = 5;

/// Length of the per-axis tables: the reserved axis 0 plus [`MAX_DIMS`] spatial axes.
pub const SHAPE_SIZE: usize = MAX_DIMS + 1;

/// Per-axis coordinates of an element.
///
/// Entry 0 is reserved and always zero, entries `1..=dims` hold the spatial
/// coordinates and the remaining entries are zero.
pub type Coord = [usize; SHAPE_SIZE];

/// Compute the strides of an array from its per-axis extents.
///
/// Axis 0 is reserved with stride 1 and axis 1 is contiguous in memory, so that
/// every outer axis advances by the product of the extents below it.
///
/// # Arguments
///
/// * `shape` - The extent of every axis, including the reserved axis 0.
///
/// # Returns
///
/// An array of strides corresponding to each axis.
///
/// # Examples
///
/// ```rust
/// use dipnd_tensor::shape::get_strides_from_shape;
///
/// let strides = get_strides_from_shape([1, 4, 3, 2, 1, 1]);
/// assert_eq!(strides, [1, 1, 4, 12, 24, 24]);
/// ```
pub fn get_strides_from_shape(shape: [usize; SHAPE_SIZE]) -> [usize; SHAPE_SIZE] {
    let mut strides = [1; SHAPE_SIZE];
    for axis in 2..SHAPE_SIZE {
        strides[axis] = strides[axis - 1] * shape[axis - 1];
    }
    strides
}

/// Shape and stride table of an N-dimensional array.
///
/// The table is computed once at construction and is immutable afterwards. Axes
/// are numbered from 1 to [`NdShape::dims`]; axis 0 is reserved with extent 1.
/// Axes beyond `dims` also have extent 1, which lets a lower-rank window be
/// broadcast across the outer axes of a higher-rank image.
///
/// # Examples
///
/// ```rust
/// use dipnd_tensor::NdShape;
///
/// let shape = NdShape::new(&[4, 3, 2]).unwrap();
/// assert_eq!(shape.dims(), 3);
/// assert_eq!(shape.size(), 24);
/// assert_eq!(shape.stride(3), 12);
///
/// let coord = shape.linear_to_coord(17);
/// assert_eq!(&coord[1..=3], &[1, 1, 1]);
/// assert_eq!(shape.coord_to_linear(&coord), 17);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NdShape {
    dims: usize,
    shape: [usize; SHAPE_SIZE],
    strides: [usize; SHAPE_SIZE],
    size: usize,
}

impl NdShape {
    /// Create the shape of an array with `1..=MAX_DIMS` spatial axes.
    ///
    /// # Arguments
    ///
    /// * `extents` - The extent of axes `1..=extents.len()`.
    ///
    /// # Errors
    ///
    /// Returns an error if the number of axes is unsupported or any extent is zero.
    pub fn new(extents: &[usize]) -> Result<Self, TensorError> {
        if extents.is_empty() || extents.len() > MAX_DIMS {
            return Err(TensorError::UnsupportedDimensions(extents.len()));
        }
        Self::build(extents)
    }

    /// Create the shape of a window, which may have no axes at all.
    ///
    /// A rank-0 window has no taps and is accepted so that reductions over it
    /// can yield their identity.
    ///
    /// # Errors
    ///
    /// Returns an error if there are more than `MAX_DIMS` axes or any extent is zero.
    pub fn window(extents: &[usize]) -> Result<Self, TensorError> {
        if extents.len() > MAX_DIMS {
            return Err(TensorError::UnsupportedDimensions(extents.len()));
        }
        Self::build(extents)
    }

    /// Create the shape of a line of `extent` taps laid along `axis`.
    ///
    /// Axes below `axis` get extent 1, so the shape has rank `axis` and its flat
    /// indices coincide with the positions along the line.
    ///
    /// # Errors
    ///
    /// Returns an error if `axis` is outside `1..=MAX_DIMS` or `extent` is zero.
    pub fn line(axis: usize, extent: usize) -> Result<Self, TensorError> {
        if axis == 0 || axis > MAX_DIMS {
            return Err(TensorError::UnsupportedDimensions(axis));
        }
        let mut extents = [1; MAX_DIMS];
        extents[axis - 1] = extent;
        Self::build(&extents[..axis])
    }

    fn build(extents: &[usize]) -> Result<Self, TensorError> {
        let mut shape = [1; SHAPE_SIZE];
        for (i, &extent) in extents.iter().enumerate() {
            if extent == 0 {
                return Err(TensorError::ZeroExtent { axis: i + 1 });
            }
            shape[i + 1] = extent;
        }

        Ok(Self {
            dims: extents.len(),
            shape,
            strides: get_strides_from_shape(shape),
            size: extents.iter().product(),
        })
    }

    /// Re-describe the same elements with different extents.
    ///
    /// # Errors
    ///
    /// Returns an error if the new extents are invalid or hold a different number of elements.
    pub fn reshape(&self, extents: &[usize]) -> Result<Self, TensorError> {
        let reshaped = Self::new(extents)?;
        if reshaped.size != self.size {
            return Err(TensorError::invalid_shape(self.size, reshaped.size));
        }
        Ok(reshaped)
    }

    /// Number of spatial axes.
    #[inline]
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Total number of elements.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Extent of `axis`; 1 for the reserved axis and for axes beyond `dims`.
    #[inline]
    pub fn extent(&self, axis: usize) -> usize {
        self.shape[axis]
    }

    /// Stride of `axis` in elements.
    #[inline]
    pub fn stride(&self, axis: usize) -> usize {
        self.strides[axis]
    }

    /// The extents of the spatial axes `1..=dims`.
    pub fn extents(&self) -> &[usize] {
        &self.shape[1..=self.dims]
    }

    /// The full stride table including the reserved axis.
    pub fn strides(&self) -> &[usize; SHAPE_SIZE] {
        &self.strides
    }

    /// Decompose a flat index into per-axis coordinates.
    ///
    /// Works from the outermost axis down to axis 1, dividing by each stride and
    /// keeping the remainder. The caller guarantees `index < size`.
    #[inline]
    pub fn linear_to_coord(&self, index: usize) -> Coord {
        let mut coord = [0; SHAPE_SIZE];
        let mut rem = index;
        for axis in (1..=self.dims).rev() {
            let stride = self.strides[axis];
            coord[axis] = rem / stride;
            rem -= coord[axis] * stride;
        }
        coord
    }

    /// Checked variant of [`NdShape::linear_to_coord`].
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is not below the array size.
    pub fn try_linear_to_coord(&self, index: usize) -> Result<Coord, TensorError> {
        if index >= self.size {
            return Err(TensorError::index_out_of_bounds(index, self.size));
        }
        Ok(self.linear_to_coord(index))
    }

    /// Recombine per-axis coordinates into a flat index.
    #[inline]
    pub fn coord_to_linear(&self, coord: &Coord) -> usize {
        (1..=self.dims).map(|axis| coord[axis] * self.strides[axis]).sum()
    }
}

impl std::fmt::Display for NdShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let extents = self
            .extents()
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("x");
        write!(f, "{}D[{}]", self.dims, extents)
    }
}
