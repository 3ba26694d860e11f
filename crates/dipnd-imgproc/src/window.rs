use dipnd_tensor::{NdShape, WindowView};

use crate::error::ImgprocError;

/// Visit every active tap of `window` centered on the element `center_index`.
///
/// For each flat window index `k` with a nonzero weight, the window coordinate
/// is shifted by `-(extent - 1) / 2` on every window axis relative to the center
/// coordinate, clamped into `[0, extent - 1]` of the image, and recombined into
/// a flat image index. `visit` receives `(image_index, k)`.
///
/// Image axes beyond the window's rank are held at the center coordinate, so a
/// lower-rank window is broadcast across the outer axes of the image.
///
/// Nothing is visited when the window has rank 0, has no active taps, or has
/// more axes than the image. The caller guarantees `center_index < image.size()`.
///
/// # Arguments
///
/// * `center_index` - The flat index of the output element.
/// * `image` - The shape of the image being read.
/// * `window` - The structuring element or convolution kernel.
/// * `visit` - Called once per active tap.
///
/// # Examples
///
/// ```
/// use dipnd_imgproc::window::for_each_tap;
/// use dipnd_tensor::{NdShape, WindowView};
///
/// let image = NdShape::new(&[5]).unwrap();
/// let weights = [1.0, 1.0, 1.0];
/// let window = WindowView::new(&weights, NdShape::window(&[3]).unwrap()).unwrap();
///
/// let mut taps = Vec::new();
/// for_each_tap(0, &image, &window, |index, _| taps.push(index));
/// assert_eq!(taps, vec![0, 0, 1]);
/// ```
#[inline]
pub fn for_each_tap<F>(center_index: usize, image: &NdShape, window: &WindowView, mut visit: F)
where
    F: FnMut(usize, usize),
{
    let wshape = window.shape();
    let wdims = wshape.dims();
    if wdims == 0 || wdims > image.dims() {
        return;
    }

    let center = image.linear_to_coord(center_index);

    // the outer axes do not move with the window
    let fixed: usize = (wdims + 1..=image.dims())
        .map(|axis| center[axis] * image.stride(axis))
        .sum();

    for (k, &weight) in window.data().iter().enumerate() {
        if weight == 0.0 {
            continue;
        }
        let wcoord = wshape.linear_to_coord(k);
        let mut index = fixed;
        for axis in 1..=wdims {
            let half = (wshape.extent(axis) - 1) / 2;
            let pos = center[axis] as isize + wcoord[axis] as isize - half as isize;
            let clamped = pos.clamp(0, image.extent(axis) as isize - 1) as usize;
            index += clamped * image.stride(axis);
        }
        visit(index, k);
    }
}

/// Reject windows that vary along more axes than the image has.
pub(crate) fn ensure_window_fits(window: &WindowView, image: &NdShape) -> Result<(), ImgprocError> {
    if window.dims() > image.dims() {
        return Err(ImgprocError::WindowRankExceedsImage {
            window: window.dims(),
            image: image.dims(),
        });
    }
    Ok(())
}

/// Log when a window will only ever yield the reduction identity.
pub(crate) fn warn_if_empty(window: &WindowView, op: &str) {
    if window.active_taps() == 0 {
        log::warn!(
            "{op}: window {} has no active taps, output is the reduction identity",
            window.shape()
        );
    }
}
