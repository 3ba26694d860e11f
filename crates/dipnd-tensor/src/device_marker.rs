//! Device marker types for compile-time tagging of buffers.
//!
//! A [`crate::Tensor`] carries the memory space it lives in as a type parameter,
//! so host and compute buffers cannot be mixed up and every move between them
//! is an explicit transfer.
//!
//! # Examples
//!
//! ```
//! use dipnd_tensor::{Compute, Host, NdShape, Tensor, TensorError};
//!
//! let shape = NdShape::new(&[4, 2])?;
//! let host = Tensor::<u8, Host>::from_shape_val(shape, 7)?;
//! let on_compute: Tensor<u8, Compute> = host.to_device()?;
//! assert!(!on_compute.device().is_host());
//! # Ok::<(), TensorError>(())
//! ```

use crate::{
    backend::{Backend, ComputeBackend, HostBackend},
    device::Device,
};

/// Marker trait for memory spaces.
///
/// This trait is sealed and only implemented by [`Host`] and [`Compute`].
pub trait DeviceMarker: private::Sealed + Clone + Send + Sync + 'static {
    /// The backend performing copies into this memory space.
    type Backend: Backend;

    /// Returns the backend for this memory space.
    fn backend() -> Self::Backend;

    /// Returns device information.
    fn device_info() -> Device;
}

mod private {
    pub trait Sealed {}

    impl Sealed for super::Host {}

    impl Sealed for super::Compute {}
}

/// Zero-sized type representing host memory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Host;

impl DeviceMarker for Host {
    type Backend = HostBackend;

    fn backend() -> Self::Backend {
        HostBackend
    }

    fn device_info() -> Device {
        Device::Host
    }
}

/// Zero-sized type representing kernel executor memory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Compute;

impl DeviceMarker for Compute {
    type Backend = ComputeBackend;

    fn backend() -> Self::Backend {
        ComputeBackend
    }

    fn device_info() -> Device {
        Device::Compute
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_device_marker() {
        assert_eq!(Host::device_info(), Device::Host);
        assert_eq!(Host::backend().device(), Device::Host);
    }

    #[test]
    fn test_compute_device_marker() {
        assert_eq!(Compute::device_info(), Device::Compute);
        assert_eq!(Compute::backend().device(), Device::Compute);
    }
}
