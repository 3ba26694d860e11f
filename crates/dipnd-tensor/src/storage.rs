use std::marker::PhantomData;

use crate::{device::Device, device_marker::DeviceMarker};

/// Owned, contiguous sample buffer tagged with the memory space it lives in.
///
/// The buffer is only ever created whole, by loading on the host or by a
/// transfer, and is never resized afterwards.
pub struct TensorStorage<T, D: DeviceMarker> {
    data: Vec<T>,
    _device: PhantomData<D>,
}

impl<T, D: DeviceMarker> TensorStorage<T, D> {
    /// Take ownership of `data` as a buffer in memory space `D`.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self {
            data,
            _device: PhantomData,
        }
    }

    /// The samples in flat order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The samples in flat order, writable.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Number of samples in the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer holds no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The memory space of the buffer.
    pub fn device(&self) -> Device {
        D::device_info()
    }

    /// Release the buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: Clone, D: DeviceMarker> Clone for TensorStorage<T, D> {
    fn clone(&self) -> Self {
        Self::from_vec(self.data.clone())
    }
}

impl<T, D: DeviceMarker> std::fmt::Debug for TensorStorage<T, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TensorStorage")
            .field("len", &self.data.len())
            .field("device", &D::device_info())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device_marker::{Compute, Host};

    #[test]
    fn test_storage_device() {
        let host = TensorStorage::<u8, Host>::from_vec(vec![1, 2, 3]);
        assert_eq!(host.device(), Device::Host);
        assert_eq!(host.len(), 3);

        let compute = TensorStorage::<u8, Compute>::from_vec(Vec::new());
        assert_eq!(compute.device(), Device::Compute);
        assert!(compute.is_empty());
    }
}
