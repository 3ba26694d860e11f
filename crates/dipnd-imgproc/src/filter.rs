use dipnd_tensor::{ArrayView, ArrayViewMut, NdShape, WindowView};

use crate::{
    error::{ensure_same_shape, ImgprocError},
    parallel::{self, ExecutionStrategy},
    pixel::Pixel,
    window::{ensure_window_fits, for_each_tap, warn_if_empty},
};

/// Convolve a single element: the weighted sum over the active taps of `window`.
///
/// The sum is accumulated in `f32` and converted with [`Pixel::from_f32`].
#[inline]
pub fn convolve_at<T: Pixel>(
    input: &[T],
    shape: &NdShape,
    window: &WindowView,
    index: usize,
) -> T {
    let weights = window.data();
    let mut acc = 0.0f32;
    for_each_tap(index, shape, window, |i, k| {
        acc += input[i].to_f32() * weights[k];
    });
    T::from_f32(acc)
}

/// Convolve an N-dimensional array with a kernel.
///
/// Every output element is the weighted sum of the input samples under the
/// kernel centered on it, with clamp-to-edge boundaries. For integer samples
/// the sum is truncated and saturated.
///
/// # Arguments
///
/// * `src` - The input array.
/// * `dst` - The output array, with the same shape as `src`.
/// * `window` - The convolution kernel, of rank at most `src.dims()`.
/// * `strategy` - The execution strategy.
///
/// # Errors
///
/// Returns an error if the arrays differ in shape or the kernel has too many axes.
pub fn convolve<T: Pixel>(
    src: &ArrayView<T>,
    dst: &mut ArrayViewMut<T>,
    window: &WindowView,
    strategy: ExecutionStrategy,
) -> Result<(), ImgprocError> {
    ensure_same_shape(src.shape(), dst.shape())?;
    ensure_window_fits(window, src.shape())?;
    warn_if_empty(window, "convolve");

    let shape = *src.shape();
    let input = src.as_slice();
    parallel::fill_indexed(dst.as_slice_mut(), strategy, |i| {
        convolve_at(input, &shape, window, i)
    })
}
