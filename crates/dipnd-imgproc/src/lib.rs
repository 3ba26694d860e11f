#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// elementwise operators: copy, invert and threshold.
pub mod core;

/// error types for the imgproc crate.
pub mod error;

/// convolution over an N-dimensional window.
pub mod filter;

/// erosion over an N-dimensional structuring element.
pub mod morphology;

/// tagged operator enums and their entry points.
pub mod ops;

/// module containing parallization utilities.
pub mod parallel;

/// sample types the kernels operate on.
pub mod pixel;

/// decomposition of window operators into per-axis passes.
pub mod separable;

/// structuring element construction.
pub mod strel;

/// window overlay: enumeration of the taps under a centered window.
pub mod window;

pub use crate::error::ImgprocError;
pub use crate::ops::{apply_elementwise, apply_window, ElementwiseOp, WindowOp};
pub use crate::parallel::ExecutionStrategy;
pub use crate::pixel::Pixel;
pub use crate::separable::{apply_separable, SeparablePlan};
pub use crate::strel::Window;
