use dipnd_tensor::{NdShape, TensorError};
use thiserror::Error;

/// An error type for the imgproc module.
///
/// All variants are raised before any sample is computed.
#[derive(Error, Debug, PartialEq)]
pub enum ImgprocError {
    /// Two arrays taking part in the same operation differ in shape.
    #[error("Size mismatch: input is {input}, output is {output}")]
    SizeMismatch {
        /// Shape of the input array
        input: NdShape,
        /// Shape of the output (or auxiliary) array
        output: NdShape,
    },

    /// The window varies along more axes than the image has.
    #[error("Window of rank {window} cannot be applied to an image of rank {image}")]
    WindowRankExceedsImage {
        /// Rank of the window
        window: usize,
        /// Rank of the image
        image: usize,
    },

    /// A separable operation was asked for an unsupported number of passes.
    #[error("Invalid separable pass count {0}")]
    InvalidPassCount(usize),

    /// The per-axis window of a separable operation is not one-dimensional.
    #[error("Separable window must be one-dimensional, got rank {0}")]
    NotALine(usize),

    /// A fixed thread pool was requested with zero threads.
    #[error("Thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// The thread pool failed to build.
    #[error("Failed to build thread pool: {0}")]
    ThreadPool(String),

    /// An execution strategy could not be parsed.
    #[error("Unknown execution strategy '{0}'")]
    InvalidStrategy(String),

    /// Error from the shape and view layer.
    #[error(transparent)]
    Tensor(#[from] TensorError),
}

impl ImgprocError {
    /// Returns a user-friendly suggestion for resolving the error.
    pub fn suggestion(&self) -> &str {
        match self {
            Self::SizeMismatch { .. } => "Allocate every buffer with the shape of the input",
            Self::WindowRankExceedsImage { .. } => {
                "Use a window with at most as many axes as the image"
            }
            Self::InvalidPassCount(_) => "Run between one pass and one pass per image axis",
            Self::NotALine(_) => "Describe the per-axis window as a single line of taps",
            Self::InvalidThreadCount(_) => "Request at least one thread",
            Self::ThreadPool(_) => "Check the system thread limits",
            Self::InvalidStrategy(_) => "Use 'serial', 'parallel' or 'fixed:<threads>'",
            Self::Tensor(err) => err.suggestion(),
        }
    }
}

/// Check that two arrays have the same shape.
pub(crate) fn ensure_same_shape(input: &NdShape, output: &NdShape) -> Result<(), ImgprocError> {
    if input != output {
        return Err(ImgprocError::SizeMismatch {
            input: *input,
            output: *output,
        });
    }
    Ok(())
}
