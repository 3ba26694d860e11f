use crate::{
    backend::Backend,
    device::Device,
    device_marker::{DeviceMarker, Host},
    error::TensorError,
    shape::{Coord, NdShape},
    storage::TensorStorage,
    view::{ArrayView, ArrayViewMut},
};

/// An owned N-dimensional array living in memory space `D`.
///
/// The tensor couples a flat [`TensorStorage`] with the [`NdShape`] that
/// describes it. Kernels never see tensors directly; they work on the
/// [`ArrayView`]/[`ArrayViewMut`] handed out by [`Tensor::view`] and
/// [`Tensor::view_mut`].
///
/// # Examples
///
/// ```rust
/// use dipnd_tensor::{HostTensor, NdShape};
///
/// let shape = NdShape::new(&[3, 2]).unwrap();
/// let t = HostTensor::<u8>::from_shape_vec(shape, vec![1, 2, 3, 4, 5, 6]).unwrap();
/// assert_eq!(t.numel(), 6);
/// assert_eq!(t.get(&[0, 2, 1, 0, 0, 0]), Some(&6));
/// ```
///
/// The buffer length and the shape are checked against each other when the
/// tensor is built and cannot be changed separately afterwards, so the views
/// handed out by [`Tensor::view`] are always consistent.
///
/// ```compile_fail
/// use dipnd_tensor::{HostTensor, NdShape};
///
/// let mut t = HostTensor::<u8>::from_shape_val(NdShape::new(&[4]).unwrap(), 0).unwrap();
/// t.shape = NdShape::new(&[16]).unwrap();
/// ```
pub struct Tensor<T, D: DeviceMarker = Host> {
    storage: TensorStorage<T, D>,
    shape: NdShape,
}

impl<T, D: DeviceMarker> Tensor<T, D> {
    /// Create a tensor from a shape and a flat buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape has no spatial axes or the buffer does not
    /// hold exactly one sample per element.
    pub fn from_shape_vec(shape: NdShape, data: Vec<T>) -> Result<Self, TensorError> {
        if shape.dims() == 0 {
            return Err(TensorError::UnsupportedDimensions(0));
        }
        if data.len() != shape.size() {
            return Err(TensorError::invalid_shape(shape.size(), data.len()));
        }
        Ok(Self {
            storage: TensorStorage::from_vec(data),
            shape,
        })
    }

    /// Create a tensor filled with `value`.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape has no spatial axes.
    pub fn from_shape_val(shape: NdShape, value: T) -> Result<Self, TensorError>
    where
        T: Clone,
    {
        Self::from_shape_vec(shape, vec![value; shape.size()])
    }

    /// The samples in flat order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.storage.as_slice()
    }

    /// The samples in flat order, writable.
    #[inline]
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        self.storage.as_mut_slice()
    }

    /// The shape and stride table.
    #[inline]
    pub fn shape(&self) -> &NdShape {
        &self.shape
    }

    /// Total number of elements.
    #[inline]
    pub fn numel(&self) -> usize {
        self.shape.size()
    }

    /// Number of spatial axes.
    #[inline]
    pub fn dims(&self) -> usize {
        self.shape.dims()
    }

    /// The memory space the tensor lives in.
    pub fn device(&self) -> Device {
        self.storage.device()
    }

    /// Borrow the tensor as a read-only view.
    pub fn view(&self) -> ArrayView<'_, T> {
        ArrayView::from_parts(self.storage.as_slice(), self.shape)
    }

    /// Borrow the tensor as a writable view.
    pub fn view_mut(&mut self) -> ArrayViewMut<'_, T> {
        ArrayViewMut::from_parts(self.storage.as_mut_slice(), self.shape)
    }

    /// Re-describe the tensor with new extents, keeping the samples in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the new extents do not hold the same number of elements.
    pub fn reshape(self, extents: &[usize]) -> Result<Self, TensorError> {
        let shape = self.shape.reshape(extents)?;
        Ok(Self {
            storage: self.storage,
            shape,
        })
    }

    /// Release the sample buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.storage.into_vec()
    }

    /// Get the element at the given coordinates, if they lie inside the array.
    pub fn get(&self, coord: &Coord) -> Option<&T> {
        let inside = (1..=self.dims()).all(|axis| coord[axis] < self.shape.extent(axis));
        if !inside {
            return None;
        }
        self.as_slice().get(self.shape.coord_to_linear(coord))
    }

    /// Transfer the tensor into a new buffer in memory space `Target`.
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer fails.
    pub fn to_device<Target: DeviceMarker>(&self) -> Result<Tensor<T, Target>, TensorError>
    where
        T: Copy + Default + Send + Sync,
    {
        let mut dst = Tensor::<T, Target>::from_shape_val(self.shape, T::default())?;
        self.copy_into(&mut dst)?;
        Ok(dst)
    }

    /// Copy the samples into an existing buffer in memory space `Target`.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination holds a different number of elements.
    pub fn copy_into<Target: DeviceMarker>(
        &self,
        dst: &mut Tensor<T, Target>,
    ) -> Result<(), TensorError>
    where
        T: Copy + Send + Sync,
    {
        let backend = Target::backend();
        backend.copy(self.as_slice(), dst.as_slice_mut(), D::device_info())?;
        backend.synchronize()
    }
}

impl<T: Clone, D: DeviceMarker> Clone for Tensor<T, D> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            shape: self.shape,
        }
    }
}

impl<T, D: DeviceMarker> std::fmt::Debug for Tensor<T, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape)
            .field("device", &D::device_info())
            .finish()
    }
}
