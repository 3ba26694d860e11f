use std::path::PathBuf;

use dipnd_tensor::TensorError;

/// An error type for the io module.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// Error when the file does not exist.
    #[error("File does not exist: {0}")]
    FileDoesNotExist(PathBuf),

    /// Invalid file extension.
    #[error("File does not have a valid extension: {0}")]
    InvalidFileExtension(PathBuf),

    /// Error to open the file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// Error to encode or decode the TIFF image.
    #[error("Error with Tiff encoding/decoding. {0}")]
    TiffError(#[from] tiff::TiffError),

    /// Error to encode the PNG image.
    #[error("Failed to encode the png image. {0}")]
    PngEncodingError(String),

    /// Error to decode the PNG image.
    #[error("Failed to decode the png image. {0}")]
    PngDecodeError(String),

    /// The frame is not 8-bit grayscale.
    #[error("Unsupported pixel format in {path}: {format}, expected 8-bit grayscale")]
    UnsupportedPixelFormat {
        /// The offending file
        path: PathBuf,
        /// Description of the format found
        format: String,
    },

    /// The file name pattern has no usable integer specifier.
    #[error("Invalid file pattern '{0}': expected exactly one %d, %Nd or %0Nd specifier")]
    InvalidPattern(String),

    /// The frame range is empty.
    #[error("Empty frame range: {first}..={last}")]
    EmptyRange {
        /// First frame index
        first: usize,
        /// Last frame index
        last: usize,
    },

    /// A frame differs in size from the first frame of the stack.
    #[error("Frame {path} is {actual:?}, expected {expected:?} like the first frame")]
    FrameSizeMismatch {
        /// The offending frame
        path: PathBuf,
        /// Width and height of the first frame
        expected: (usize, usize),
        /// Width and height of the offending frame
        actual: (usize, usize),
    },

    /// A geometry override does not describe the loaded samples.
    #[error("Geometry {geometry:?} holds {expected} samples but the stack has {actual}")]
    GeometryMismatch {
        /// The requested extents
        geometry: Vec<usize>,
        /// Number of samples the geometry describes
        expected: usize,
        /// Number of samples loaded
        actual: usize,
    },

    /// Error from the shape and buffer layer.
    #[error("Failed to create the array. {0}")]
    TensorError(#[from] TensorError),
}
