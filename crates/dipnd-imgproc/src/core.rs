use dipnd_tensor::{ArrayView, ArrayViewMut};

use crate::{
    error::{ensure_same_shape, ImgprocError},
    parallel::{ExecuteExt, ExecutionStrategy},
    pixel::Pixel,
};

/// Copy every sample of `src` into `dst`.
///
/// # Arguments
///
/// * `src` - The input array.
/// * `dst` - The output array, with the same shape as `src`.
/// * `strategy` - The execution strategy.
///
/// # Errors
///
/// Returns an error if the arrays differ in shape.
pub fn copy<T: Pixel>(
    src: &ArrayView<T>,
    dst: &mut ArrayViewMut<T>,
    strategy: ExecutionStrategy,
) -> Result<(), ImgprocError> {
    ensure_same_shape(src.shape(), dst.shape())?;
    src.as_slice()
        .execute_with(strategy, dst.as_slice_mut(), |(s, d)| *d = *s)
}

/// Invert every sample: `dst[i] = FULL_SCALE - src[i]`.
///
/// # Arguments
///
/// * `src` - The input array.
/// * `dst` - The output array, with the same shape as `src`.
/// * `strategy` - The execution strategy.
///
/// # Errors
///
/// Returns an error if the arrays differ in shape.
///
/// # Examples
///
/// ```
/// use dipnd_imgproc::{core::invert, parallel::ExecutionStrategy};
/// use dipnd_tensor::{ArrayView, ArrayViewMut, NdShape};
///
/// let shape = NdShape::new(&[3]).unwrap();
/// let src = [0u8, 255, 128];
/// let mut dst = [0u8; 3];
/// invert(
///     &ArrayView::new(&src, shape).unwrap(),
///     &mut ArrayViewMut::new(&mut dst, shape).unwrap(),
///     ExecutionStrategy::Serial,
/// )
/// .unwrap();
/// assert_eq!(dst, [255, 0, 127]);
/// ```
pub fn invert<T: Pixel>(
    src: &ArrayView<T>,
    dst: &mut ArrayViewMut<T>,
    strategy: ExecutionStrategy,
) -> Result<(), ImgprocError> {
    ensure_same_shape(src.shape(), dst.shape())?;
    src.as_slice()
        .execute_with(strategy, dst.as_slice_mut(), |(s, d)| *d = s.invert())
}

/// Apply a binary threshold: `dst[i] = high` if `src[i] > threshold`, else zero.
///
/// # Arguments
///
/// * `src` - The input array.
/// * `dst` - The output array, with the same shape as `src`.
/// * `threshold` - Samples strictly above this value are set to `high`.
/// * `high` - The value written for samples above the threshold.
/// * `strategy` - The execution strategy.
///
/// # Errors
///
/// Returns an error if the arrays differ in shape.
pub fn threshold<T: Pixel>(
    src: &ArrayView<T>,
    dst: &mut ArrayViewMut<T>,
    threshold: T,
    high: T,
    strategy: ExecutionStrategy,
) -> Result<(), ImgprocError> {
    ensure_same_shape(src.shape(), dst.shape())?;
    src.as_slice()
        .execute_with(strategy, dst.as_slice_mut(), |(s, d)| {
            *d = if *s > threshold { high } else { T::zero() };
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dipnd_tensor::NdShape;

    const STRATEGIES: [ExecutionStrategy; 3] = [
        ExecutionStrategy::Serial,
        ExecutionStrategy::ParallelElements,
        ExecutionStrategy::Fixed(2),
    ];

    #[test]
    fn invert_u8() -> Result<(), ImgprocError> {
        let shape = NdShape::new(&[3])?;
        let src = [0u8, 255, 128];
        for strategy in STRATEGIES {
            let mut dst = [0u8; 3];
            invert(
                &ArrayView::new(&src, shape)?,
                &mut ArrayViewMut::new(&mut dst, shape)?,
                strategy,
            )?;
            assert_eq!(dst, [255, 0, 127]);
        }
        Ok(())
    }

    #[test]
    fn threshold_u8() -> Result<(), ImgprocError> {
        let shape = NdShape::new(&[3])?;
        let src = [0u8, 128, 200];
        for strategy in STRATEGIES {
            let mut dst = [7u8; 3];
            threshold(
                &ArrayView::new(&src, shape)?,
                &mut ArrayViewMut::new(&mut dst, shape)?,
                128,
                255,
                strategy,
            )?;
            assert_eq!(dst, [0, 0, 255]);
        }
        Ok(())
    }

    #[test]
    fn copy_3d() -> Result<(), ImgprocError> {
        let shape = NdShape::new(&[4, 3, 2])?;
        let src: Vec<u16> = (0..24).map(|v| v * 1000).collect();
        let mut dst = vec![0u16; 24];
        copy(
            &ArrayView::new(&src, shape)?,
            &mut ArrayViewMut::new(&mut dst, shape)?,
            ExecutionStrategy::ParallelElements,
        )?;
        assert_eq!(dst, src);
        Ok(())
    }

    #[test]
    fn shape_mismatch_is_rejected() -> Result<(), ImgprocError> {
        let src = [0u8; 6];
        let mut dst = [0u8; 6];
        let src_shape = NdShape::new(&[3, 2])?;
        let dst_shape = NdShape::new(&[2, 3])?;
        let res = invert(
            &ArrayView::new(&src, src_shape)?,
            &mut ArrayViewMut::new(&mut dst, dst_shape)?,
            ExecutionStrategy::Serial,
        );
        assert_eq!(
            res,
            Err(ImgprocError::SizeMismatch {
                input: src_shape,
                output: dst_shape
            })
        );
        Ok(())
    }
}
