use std::{fmt, str::FromStr};

use rayon::prelude::*;

use crate::error::ImgprocError;

/// Controls how the per-element work of a kernel is executed.
///
/// Every strategy returns only once all output elements have been written, so
/// a finished call is a full barrier before the output is read again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Run sequentially on the current thread.
    ///
    /// Useful for small arrays, debugging, or as a reference timing.
    Serial,

    /// Use the global Rayon thread pool to process every element in parallel.
    #[default]
    ParallelElements,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    /// Use this for one-off calls; repeated calls should build one pool and
    /// run [`ExecutionStrategy::ParallelElements`] inside `ThreadPool::install`.
    Fixed(usize),
}

impl fmt::Display for ExecutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionStrategy::Serial => write!(f, "serial"),
            ExecutionStrategy::ParallelElements => write!(f, "parallel"),
            ExecutionStrategy::Fixed(n) => write!(f, "fixed:{n}"),
        }
    }
}

impl FromStr for ExecutionStrategy {
    type Err = ImgprocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "serial" => Ok(Self::Serial),
            "parallel" | "parallel-elements" => Ok(Self::ParallelElements),
            _ => {
                let threads = s
                    .strip_prefix("fixed:")
                    .and_then(|n| n.parse::<usize>().ok())
                    .ok_or_else(|| ImgprocError::InvalidStrategy(s.to_string()))?;
                if threads == 0 {
                    return Err(ImgprocError::InvalidThreadCount(threads));
                }
                Ok(Self::Fixed(threads))
            }
        }
    }
}

fn build_pool(threads: usize) -> Result<rayon::ThreadPool, ImgprocError> {
    if threads == 0 {
        return Err(ImgprocError::InvalidThreadCount(threads));
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| ImgprocError::ThreadPool(e.to_string()))
}

/// Write `f(i)` into `dst[i]` for every flat index `i`.
///
/// Each output slot is written exactly once and `f` only reads shared state, so
/// the elements may be computed in any order.
///
/// # Arguments
///
/// * `dst` - The destination slice.
/// * `strategy` - The execution strategy.
/// * `f` - Computes the value of the element at a flat index.
pub fn fill_indexed<T, F>(dst: &mut [T], strategy: ExecutionStrategy, f: F) -> Result<(), ImgprocError>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    match strategy {
        ExecutionStrategy::Serial => {
            dst.iter_mut().enumerate().for_each(|(i, d)| *d = f(i));
        }
        ExecutionStrategy::ParallelElements => {
            dst.par_iter_mut().enumerate().for_each(|(i, d)| *d = f(i));
        }
        ExecutionStrategy::Fixed(n) => {
            let pool = build_pool(n)?;
            pool.install(|| {
                dst.par_iter_mut().enumerate().for_each(|(i, d)| *d = f(i));
            });
        }
    }
    Ok(())
}

/// Trait to execute elementwise operations on a slice with a given strategy.
pub trait ExecuteExt<T> {
    /// Execute an operation on every (source, destination) element pair.
    ///
    /// # Arguments
    ///
    /// * `strategy` - The execution strategy.
    /// * `dst` - The destination slice.
    /// * `op` - The operation to perform on each (source, destination) element pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the slices differ in length or the pool cannot be built.
    fn execute_with<F>(
        &self,
        strategy: ExecutionStrategy,
        dst: &mut [T],
        op: F,
    ) -> Result<(), ImgprocError>
    where
        F: Fn((&T, &mut T)) + Sync + Send;
}

impl<T: Sync + Send> ExecuteExt<T> for &[T] {
    fn execute_with<F>(
        &self,
        strategy: ExecutionStrategy,
        dst: &mut [T],
        op: F,
    ) -> Result<(), ImgprocError>
    where
        F: Fn((&T, &mut T)) + Sync + Send,
    {
        if self.len() != dst.len() {
            return Err(dipnd_tensor::TensorError::TransferSizeMismatch {
                src: self.len(),
                dst: dst.len(),
            }
            .into());
        }

        match strategy {
            ExecutionStrategy::Serial => {
                self.iter().zip(dst.iter_mut()).for_each(op);
            }
            ExecutionStrategy::ParallelElements => {
                self.par_iter().zip(dst.par_iter_mut()).for_each(op);
            }
            ExecutionStrategy::Fixed(n) => {
                let pool = build_pool(n)?;
                pool.install(|| {
                    self.par_iter().zip(dst.par_iter_mut()).for_each(op);
                });
            }
        }
        Ok(())
    }
}
