//! Backend abstraction for transfers between memory spaces.
//!
//! Every copy into a buffer goes through the [`Backend`] of the destination's
//! memory space, which makes host/compute traffic explicit and auditable.

use rayon::prelude::*;

use crate::{device::Device, error::TensorError};

/// Elements per task when the compute backend copies in parallel.
const COPY_CHUNK: usize = 1 << 16;

/// Backend trait defining the operations of a memory space.
pub trait Backend: Send + Sync + 'static {
    /// Returns the device type for this backend.
    fn device(&self) -> Device;

    /// Copies `src`, living on `src_device`, into `dst` on this backend's device.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffers differ in length.
    fn copy<T: Copy + Send + Sync>(
        &self,
        src: &[T],
        dst: &mut [T],
        src_device: Device,
    ) -> Result<(), TensorError>;

    /// Waits until every pending operation on the device has completed.
    ///
    /// Both backends execute synchronously, so the default is a no-op.
    fn synchronize(&self) -> Result<(), TensorError> {
        Ok(())
    }
}

fn check_transfer<T>(src: &[T], dst: &[T]) -> Result<(), TensorError> {
    if src.len() != dst.len() {
        return Err(TensorError::TransferSizeMismatch {
            src: src.len(),
            dst: dst.len(),
        });
    }
    Ok(())
}

/// Host backend: plain memory copies on the calling thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct HostBackend;

impl Backend for HostBackend {
    fn device(&self) -> Device {
        Device::Host
    }

    fn copy<T: Copy + Send + Sync>(
        &self,
        src: &[T],
        dst: &mut [T],
        src_device: Device,
    ) -> Result<(), TensorError> {
        check_transfer(src, dst)?;
        log::debug!("copy {} elements {} -> host", src.len(), src_device);
        dst.copy_from_slice(src);
        Ok(())
    }
}

/// Compute backend: copies fan out over the rayon pool.
#[derive(Clone, Copy, Debug, Default)]
pub struct ComputeBackend;

impl Backend for ComputeBackend {
    fn device(&self) -> Device {
        Device::Compute
    }

    fn copy<T: Copy + Send + Sync>(
        &self,
        src: &[T],
        dst: &mut [T],
        src_device: Device,
    ) -> Result<(), TensorError> {
        check_transfer(src, dst)?;
        log::debug!("copy {} elements {} -> compute", src.len(), src_device);
        dst.par_chunks_mut(COPY_CHUNK)
            .zip(src.par_chunks(COPY_CHUNK))
            .for_each(|(d, s)| d.copy_from_slice(s));
        Ok(())
    }
}
