use dipnd_tensor::{ArrayView, ArrayViewMut, NdShape, WindowView};

use crate::{
    error::{ensure_same_shape, ImgprocError},
    parallel::{self, ExecutionStrategy},
    pixel::Pixel,
    window::{ensure_window_fits, for_each_tap, warn_if_empty},
};

/// Erode a single element: the minimum over the active taps of `window`.
///
/// Starts from [`Pixel::MAX`], which is also the result when no tap is active.
#[inline]
pub fn erode_at<T: Pixel>(input: &[T], shape: &NdShape, window: &WindowView, index: usize) -> T {
    let mut acc = T::MAX;
    for_each_tap(index, shape, window, |i, _| {
        let v = input[i];
        if v < acc {
            acc = v;
        }
    });
    acc
}

/// Erode an N-dimensional array with a structuring element.
///
/// Every output element is the minimum of the input samples under the active
/// taps of `window` centered on it, with clamp-to-edge boundaries. Weight
/// magnitudes are ignored.
///
/// # Arguments
///
/// * `src` - The input array.
/// * `dst` - The output array, with the same shape as `src`.
/// * `window` - The structuring element, of rank at most `src.dims()`.
/// * `strategy` - The execution strategy.
///
/// # Errors
///
/// Returns an error if the arrays differ in shape or the window has too many axes.
pub fn erode<T: Pixel>(
    src: &ArrayView<T>,
    dst: &mut ArrayViewMut<T>,
    window: &WindowView,
    strategy: ExecutionStrategy,
) -> Result<(), ImgprocError> {
    ensure_same_shape(src.shape(), dst.shape())?;
    ensure_window_fits(window, src.shape())?;
    warn_if_empty(window, "erode");

    let shape = *src.shape();
    let input = src.as_slice();
    parallel::fill_indexed(dst.as_slice_mut(), strategy, |i| {
        erode_at(input, &shape, window, i)
    })
}
