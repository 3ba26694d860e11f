use dipnd_imgproc::ImgprocError;
use dipnd_io::IoError;
use dipnd_tensor::TensorError;
use thiserror::Error;

/// An error type for the benchmark harness.
#[derive(Error, Debug)]
pub enum BenchError {
    /// A command line argument is out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Error from a kernel.
    #[error(transparent)]
    Imgproc(#[from] ImgprocError),

    /// Error from loading or saving a stack.
    #[error(transparent)]
    Io(#[from] IoError),

    /// Error from a buffer or transfer.
    #[error(transparent)]
    Tensor(#[from] TensorError),

    /// Error writing the report.
    #[error("Failed to write the report. {0}")]
    Report(#[from] std::io::Error),

    /// The global thread pool could not be configured.
    #[error("Failed to configure the thread pool. {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
