#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Timing of named operators and CSV reporting.
pub mod builder;

/// Command line arguments and their validation.
pub mod config;

/// Error types for the benchmark harness.
pub mod error;

/// The standard operator suite.
pub mod suite;

pub use crate::builder::{BenchmarkBuilder, BenchmarkResult, BenchmarkSpec};
pub use crate::config::{BenchArgs, BenchConfig};
pub use crate::error::BenchError;
pub use crate::suite::{standard_suite, SampleSink, SuiteState, STANDARD_OPERATORS};
