use dipnd_tensor::{ArrayView, ArrayViewMut, WindowView};

use crate::{
    core, filter, morphology,
    error::ImgprocError,
    parallel::ExecutionStrategy,
    pixel::Pixel,
};

/// An operator that maps every sample independently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElementwiseOp<T> {
    /// `dst[i] = src[i]`
    Copy,
    /// `dst[i] = FULL_SCALE - src[i]`
    Invert,
    /// `dst[i] = high` if `src[i] > threshold`, else zero
    Threshold {
        /// Samples strictly above this value are lit.
        threshold: T,
        /// Value of a lit sample.
        high: T,
    },
}

/// An operator that reduces the neighbourhood under a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowOp {
    /// Minimum over the active taps.
    Erode,
    /// Weighted sum over the active taps.
    Convolve,
}

impl WindowOp {
    /// Short name of the operator, as used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            WindowOp::Erode => "erode",
            WindowOp::Convolve => "convolve",
        }
    }
}

/// Apply an elementwise operator.
///
/// # Errors
///
/// Returns an error if the arrays differ in shape.
pub fn apply_elementwise<T: Pixel>(
    op: ElementwiseOp<T>,
    src: &ArrayView<T>,
    dst: &mut ArrayViewMut<T>,
    strategy: ExecutionStrategy,
) -> Result<(), ImgprocError> {
    match op {
        ElementwiseOp::Copy => core::copy(src, dst, strategy),
        ElementwiseOp::Invert => core::invert(src, dst, strategy),
        ElementwiseOp::Threshold { threshold, high } => {
            core::threshold(src, dst, threshold, high, strategy)
        }
    }
}

/// Apply a window operator with a whole N-dimensional window.
///
/// # Errors
///
/// Returns an error if the arrays differ in shape or the window has more axes
/// than the image.
pub fn apply_window<T: Pixel>(
    op: WindowOp,
    src: &ArrayView<T>,
    dst: &mut ArrayViewMut<T>,
    window: &WindowView,
    strategy: ExecutionStrategy,
) -> Result<(), ImgprocError> {
    match op {
        WindowOp::Erode => morphology::erode(src, dst, window, strategy),
        WindowOp::Convolve => filter::convolve(src, dst, window, strategy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strel::Window;
    use dipnd_tensor::NdShape;

    #[test]
    fn elementwise_dispatch() -> Result<(), ImgprocError> {
        let shape = NdShape::new(&[3])?;
        let src = [0u8, 128, 200];
        let cases = [
            (ElementwiseOp::Copy, [0u8, 128, 200]),
            (ElementwiseOp::Invert, [255, 127, 55]),
            (
                ElementwiseOp::Threshold {
                    threshold: 128,
                    high: 255,
                },
                [0, 0, 255],
            ),
        ];
        for (op, expected) in cases {
            let mut dst = [0u8; 3];
            apply_elementwise(
                op,
                &ArrayView::new(&src, shape)?,
                &mut ArrayViewMut::new(&mut dst, shape)?,
                ExecutionStrategy::Serial,
            )?;
            assert_eq!(dst, expected, "{op:?}");
        }
        Ok(())
    }

    #[test]
    fn window_dispatch() -> Result<(), ImgprocError> {
        let shape = NdShape::new(&[3])?;
        let src = [10u8, 200, 10];
        let line = Window::cube_line()?;

        let mut eroded = [0u8; 3];
        apply_window(
            WindowOp::Erode,
            &ArrayView::new(&src, shape)?,
            &mut ArrayViewMut::new(&mut eroded, shape)?,
            &line.view(),
            ExecutionStrategy::Serial,
        )?;
        assert_eq!(eroded, [10, 10, 10]);

        let mut summed = [0u8; 3];
        apply_window(
            WindowOp::Convolve,
            &ArrayView::new(&src, shape)?,
            &mut ArrayViewMut::new(&mut summed, shape)?,
            &line.view(),
            ExecutionStrategy::Serial,
        )?;
        assert_eq!(summed, [220, 220, 220]);
        Ok(())
    }
}
