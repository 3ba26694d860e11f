use crate::{error::TensorError, shape::NdShape};

fn check_len(shape: &NdShape, len: usize) -> Result<(), TensorError> {
    if len != shape.size() {
        return Err(TensorError::invalid_shape(shape.size(), len));
    }
    Ok(())
}

/// A non-owning, read-only view of an N-dimensional array.
///
/// The view pairs a borrowed sample buffer with its [`NdShape`]. It is validated
/// once at construction and cannot outlive the buffer it describes.
///
/// # Examples
///
/// ```rust
/// use dipnd_tensor::{ArrayView, NdShape};
///
/// let data = [1u8, 2, 3, 4, 5, 6];
/// let view = ArrayView::new(&data, NdShape::new(&[3, 2]).unwrap()).unwrap();
/// assert_eq!(view.dims(), 2);
/// assert_eq!(view.as_slice()[4], 5);
/// ```
#[derive(Debug)]
pub struct ArrayView<'a, T> {
    data: &'a [T],
    shape: NdShape,
}

impl<T> Clone for ArrayView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ArrayView<'_, T> {}

impl<'a, T> ArrayView<'a, T> {
    /// Create a view over `data` with the given shape.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape has no spatial axes or `data` does not hold
    /// exactly one sample per element.
    pub fn new(data: &'a [T], shape: NdShape) -> Result<Self, TensorError> {
        if shape.dims() == 0 {
            return Err(TensorError::UnsupportedDimensions(0));
        }
        check_len(&shape, data.len())?;
        Ok(Self { data, shape })
    }

    // NOTE: only for callers that already hold a validated (data, shape) pair
    pub(crate) fn from_parts(data: &'a [T], shape: NdShape) -> Self {
        Self { data, shape }
    }

    /// The samples in flat order.
    #[inline]
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// The shape and stride table.
    #[inline]
    pub fn shape(&self) -> &NdShape {
        &self.shape
    }

    /// Number of spatial axes.
    #[inline]
    pub fn dims(&self) -> usize {
        self.shape.dims()
    }

    /// Total number of elements.
    #[inline]
    pub fn size(&self) -> usize {
        self.shape.size()
    }
}

/// A non-owning, writable view of an N-dimensional array.
///
/// This is the destination of a kernel invocation; it is the only thing a
/// kernel ever mutates.
#[derive(Debug)]
pub struct ArrayViewMut<'a, T> {
    data: &'a mut [T],
    shape: NdShape,
}

impl<'a, T> ArrayViewMut<'a, T> {
    /// Create a writable view over `data` with the given shape.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape has no spatial axes or `data` does not hold
    /// exactly one sample per element.
    pub fn new(data: &'a mut [T], shape: NdShape) -> Result<Self, TensorError> {
        if shape.dims() == 0 {
            return Err(TensorError::UnsupportedDimensions(0));
        }
        check_len(&shape, data.len())?;
        Ok(Self { data, shape })
    }

    pub(crate) fn from_parts(data: &'a mut [T], shape: NdShape) -> Self {
        Self { data, shape }
    }

    /// The samples in flat order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &*self.data
    }

    /// The samples in flat order, writable.
    #[inline]
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut *self.data
    }

    /// Reborrow as a read-only view, e.g. to feed the next pass.
    #[inline]
    pub fn as_view(&self) -> ArrayView<'_, T> {
        ArrayView::from_parts(&*self.data, self.shape)
    }

    /// Reborrow as a shorter-lived writable view.
    #[inline]
    pub fn reborrow(&mut self) -> ArrayViewMut<'_, T> {
        ArrayViewMut::from_parts(&mut *self.data, self.shape)
    }

    /// The shape and stride table.
    #[inline]
    pub fn shape(&self) -> &NdShape {
        &self.shape
    }

    /// Number of spatial axes.
    #[inline]
    pub fn dims(&self) -> usize {
        self.shape.dims()
    }

    /// Total number of elements.
    #[inline]
    pub fn size(&self) -> usize {
        self.shape.size()
    }
}

/// A non-owning view of a structuring element or convolution kernel.
///
/// A tap `k` is active when `data[k] != 0`. Erosion only looks at activity while
/// convolution uses the weight itself. The window may have fewer axes than the
/// image it is applied to, in which case it does not vary along the outer axes.
#[derive(Clone, Copy, Debug)]
pub struct WindowView<'a> {
    data: &'a [f32],
    shape: NdShape,
}

impl<'a> WindowView<'a> {
    /// Create a window view over `data` with the given shape.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` does not hold exactly one weight per tap.
    pub fn new(data: &'a [f32], shape: NdShape) -> Result<Self, TensorError> {
        check_len(&shape, data.len())?;
        Ok(Self { data, shape })
    }

    /// Re-describe the same weights with another shape of equal size.
    ///
    /// # Errors
    ///
    /// Returns an error if `shape` does not hold exactly one element per weight.
    pub fn with_shape(&self, shape: NdShape) -> Result<Self, TensorError> {
        Self::new(self.data, shape)
    }

    /// The weights in flat order.
    #[inline]
    pub fn data(&self) -> &'a [f32] {
        self.data
    }

    /// The shape and stride table.
    #[inline]
    pub fn shape(&self) -> &NdShape {
        &self.shape
    }

    /// Number of axes the window varies along.
    #[inline]
    pub fn dims(&self) -> usize {
        self.shape.dims()
    }

    /// Whether tap `k` takes part in the window.
    #[inline]
    pub fn is_active(&self, k: usize) -> bool {
        self.data[k] != 0.0
    }

    /// Number of active taps.
    pub fn active_taps(&self) -> usize {
        if self.dims() == 0 {
            return 0;
        }
        self.data.iter().filter(|&&w| w != 0.0).count()
    }
}

impl<'a> From<ArrayView<'a, f32>> for WindowView<'a> {
    fn from(view: ArrayView<'a, f32>) -> Self {
        Self {
            data: view.data,
            shape: view.shape,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_checks_length() -> Result<(), TensorError> {
        let data = [0u8; 5];
        let shape = NdShape::new(&[3, 2])?;
        assert_eq!(
            ArrayView::new(&data, shape).err(),
            Some(TensorError::InvalidShape {
                expected: 6,
                actual: 5
            })
        );
        Ok(())
    }

    #[test]
    fn view_rejects_rank_zero() -> Result<(), TensorError> {
        let data = [0u8; 1];
        let shape = NdShape::window(&[])?;
        assert_eq!(
            ArrayView::new(&data, shape).err(),
            Some(TensorError::UnsupportedDimensions(0))
        );
        Ok(())
    }

    #[test]
    fn view_mut_reborrow() -> Result<(), TensorError> {
        let mut data = [1u8, 2, 3, 4];
        let shape = NdShape::new(&[2, 2])?;
        let mut view = ArrayViewMut::new(&mut data, shape)?;
        view.as_slice_mut()[3] = 9;
        assert_eq!(view.as_view().as_slice(), &[1, 2, 3, 9]);
        assert_eq!(view.reborrow().size(), 4);
        Ok(())
    }

    #[test]
    fn window_activity() -> Result<(), TensorError> {
        let weights = [0.0, 0.5, 0.0, 2.0];
        let window = WindowView::new(&weights, NdShape::window(&[2, 2])?)?;
        assert!(!window.is_active(0));
        assert!(window.is_active(1));
        assert_eq!(window.active_taps(), 2);
        Ok(())
    }

    #[test]
    fn window_reshape() -> Result<(), TensorError> {
        let weights = [1.0; 3];
        let line = WindowView::new(&weights, NdShape::window(&[3])?)?;
        let along_second = line.with_shape(NdShape::line(2, 3)?)?;
        assert_eq!(along_second.dims(), 2);
        assert_eq!(along_second.shape().extent(2), 3);
        Ok(())
    }
}
