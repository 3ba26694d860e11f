#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! `dipnd-tensor` holds the data model shared by the dipnd crates: the shape and
//! stride table of an N-dimensional array ([`NdShape`]), borrowed views over
//! sample buffers ([`ArrayView`], [`ArrayViewMut`], [`WindowView`]) and owned
//! buffers tagged with the memory space they live in ([`Tensor`]).
//!
//! Arrays have between one and [`MAX_DIMS`] spatial axes numbered from 1. Axis 1
//! is contiguous in memory.
//!
//! # Quick Start
//!
//! ```rust
//! use dipnd_tensor::{ComputeTensor, HostTensor, NdShape};
//!
//! let shape = NdShape::new(&[4, 3, 2]).unwrap();
//! let host = HostTensor::<u8>::from_shape_val(shape, 0).unwrap();
//!
//! // move the samples to the kernel executor and back
//! let compute: ComputeTensor<u8> = host.to_device().unwrap();
//! let back: HostTensor<u8> = compute.to_device().unwrap();
//! assert_eq!(back.numel(), 24);
//! ```

/// backend module containing transfer abstractions.
pub mod backend;

/// Device module containing the memory space enum.
pub mod device;

/// device_marker module containing zero-cost memory space markers.
pub mod device_marker;

/// Error types for the tensor module.
pub mod error;

/// Shape module containing the shape and stride table.
pub mod shape;

/// Storage module containing the owned sample buffer.
pub mod storage;

/// Tensor module containing the owned, device-tagged array.
pub mod tensor;

/// View module containing borrowed array and window views.
pub mod view;

pub use crate::backend::{Backend, ComputeBackend, HostBackend};
pub use crate::device::Device;
pub use crate::device_marker::{Compute, DeviceMarker, Host};
pub use crate::error::TensorError;
pub use crate::shape::{Coord, NdShape, MAX_DIMS};
pub use crate::tensor::Tensor;
pub use crate::view::{ArrayView, ArrayViewMut, WindowView};

/// Type alias for a tensor in host memory.
pub type HostTensor<T> = Tensor<T, Host>;

/// Type alias for a tensor in kernel executor memory.
pub type ComputeTensor<T> = Tensor<T, Compute>;
