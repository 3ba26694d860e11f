#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`error::IoError`] variants for file access, encoding/decoding
/// failures and stack consistency checks.
pub mod error;

/// High-level frame reading with codec selection by extension.
pub mod functional;

/// Expansion of printf-style numbered file name patterns.
pub mod pattern;

/// PNG grayscale frame encoding and decoding.
pub mod png;

/// Loading and saving numbered frame sequences as N-dimensional arrays.
pub mod stack;

/// TIFF grayscale frame encoding and decoding.
pub mod tiff;

pub use crate::error::IoError;
pub use crate::stack::{load_stack, save_stack, StackLayout};
