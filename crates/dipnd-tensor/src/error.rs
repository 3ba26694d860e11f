use thiserror::Error;

use crate::shape::MAX_DIMS;

/// Error type for shape, view and buffer operations.
///
/// Every variant is a configuration error: it is raised while a shape, view or
/// transfer is being set up and before any sample is touched.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TensorError {
    /// The number of spatial axes is outside `1..=MAX_DIMS`.
    #[error("Unsupported dimensionality {0}: expected between 1 and {max} axes", max = MAX_DIMS)]
    UnsupportedDimensions(usize),

    /// The data does not hold exactly one sample per array element.
    #[error("Shape mismatch: expected {expected} elements for shape, but got {actual} elements in data")]
    InvalidShape {
        /// Expected number of elements based on shape
        expected: usize,
        /// Actual number of elements in the data
        actual: usize,
    },

    /// A spatial axis was given an extent of zero.
    #[error("Axis {axis} has zero extent")]
    ZeroExtent {
        /// The 1-based axis number
        axis: usize,
    },

    /// A flat index is past the end of the array.
    #[error("Index {index} out of bounds for array of size {size}")]
    IndexOutOfBounds {
        /// The invalid index that was attempted
        index: usize,
        /// The number of elements in the array
        size: usize,
    },

    /// Source and destination of a transfer differ in length.
    #[error("Transfer size mismatch: source holds {src} elements, destination holds {dst}")]
    TransferSizeMismatch {
        /// Number of elements in the source buffer
        src: usize,
        /// Number of elements in the destination buffer
        dst: usize,
    },
}

impl TensorError {
    /// Creates an InvalidShape error with clear context.
    pub fn invalid_shape(expected: usize, actual: usize) -> Self {
        Self::InvalidShape { expected, actual }
    }

    /// Creates an IndexOutOfBounds error with clear context.
    pub fn index_out_of_bounds(index: usize, size: usize) -> Self {
        Self::IndexOutOfBounds { index, size }
    }

    /// Returns a user-friendly suggestion for resolving the error.
    pub fn suggestion(&self) -> &str {
        match self {
            Self::UnsupportedDimensions(_) => "Describe the array with one to five spatial axes",
            Self::InvalidShape { .. } => {
                "Ensure the product of shape extents equals the number of data elements"
            }
            Self::ZeroExtent { .. } => "Every spatial axis needs an extent of at least one",
            Self::IndexOutOfBounds { .. } => "Keep flat indices below the array size",
            Self::TransferSizeMismatch { .. } => {
                "Allocate the destination with the same shape as the source"
            }
        }
    }
}
