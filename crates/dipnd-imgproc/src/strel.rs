use dipnd_tensor::{HostTensor, NdShape, TensorError, WindowView, MAX_DIMS};

use crate::error::ImgprocError;

/// Extent of the structuring elements along every axis.
pub const STREL_EXTENT: usize = 3;

/// An owned structuring element or convolution kernel.
///
/// Weights are stored in the same layout as images: axis 1 is contiguous. A
/// zero weight marks an inactive tap.
#[derive(Debug, Clone)]
pub struct Window {
    weights: HostTensor<f32>,
}

impl Window {
    /// Create a window from weights and a shape.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape has no axes or `weights` does not hold one
    /// weight per tap.
    pub fn new(weights: Vec<f32>, shape: NdShape) -> Result<Self, ImgprocError> {
        Ok(Self {
            weights: HostTensor::from_shape_vec(shape, weights)?,
        })
    }

    fn from_fn(dims: usize, f: impl Fn(&NdShape, usize) -> f32) -> Result<Self, ImgprocError> {
        let extents = [STREL_EXTENT; MAX_DIMS];
        let extents = extents
            .get(..dims)
            .ok_or(TensorError::UnsupportedDimensions(dims))?;
        let shape = NdShape::window(extents)?;
        let weights = (0..shape.size()).map(|k| f(&shape, k)).collect();
        Self::new(weights, shape)
    }

    /// A 3^n cross: the center and its direct neighbours along every axis.
    ///
    /// # Errors
    ///
    /// Returns an error if `dims` is not a supported number of axes.
    pub fn cross(dims: usize) -> Result<Self, ImgprocError> {
        Self::from_fn(dims, |shape, k| {
            let coord = shape.linear_to_coord(k);
            let distance: usize = (1..=dims).map(|axis| coord[axis].abs_diff(1)).sum();
            if distance <= 1 {
                1.0
            } else {
                0.0
            }
        })
    }

    /// A full 3^n cube of unit weights.
    ///
    /// # Errors
    ///
    /// Returns an error if `dims` is not a supported number of axes.
    pub fn cube(dims: usize) -> Result<Self, ImgprocError> {
        Self::from_fn(dims, |_, _| 1.0)
    }

    /// A 3^n box filter whose weights sum to one.
    ///
    /// # Errors
    ///
    /// Returns an error if `dims` is not a supported number of axes.
    pub fn mean(dims: usize) -> Result<Self, ImgprocError> {
        Self::from_fn(dims, |shape, _| 1.0 / shape.size() as f32)
    }

    /// A one-dimensional window, the per-axis kernel of a separable operation.
    ///
    /// # Errors
    ///
    /// Returns an error if `weights` is empty.
    pub fn line(weights: &[f32]) -> Result<Self, ImgprocError> {
        Self::new(weights.to_vec(), NdShape::window(&[weights.len()])?)
    }

    /// The line `[1, 1, 1]`, separable factor of [`Window::cube`].
    pub fn cube_line() -> Result<Self, ImgprocError> {
        Self::line(&[1.0; STREL_EXTENT])
    }

    /// The line `[1/3, 1/3, 1/3]`, separable factor of [`Window::mean`].
    pub fn mean_line() -> Result<Self, ImgprocError> {
        Self::line(&[1.0 / STREL_EXTENT as f32; STREL_EXTENT])
    }

    /// Borrow the window as a [`WindowView`].
    pub fn view(&self) -> WindowView<'_> {
        WindowView::from(self.weights.view())
    }

    /// The shape of the window.
    pub fn shape(&self) -> &NdShape {
        self.weights.shape()
    }

    /// The weights in flat order.
    pub fn weights(&self) -> &[f32] {
        self.weights.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn cross_2d() -> Result<(), ImgprocError> {
        let cross = Window::cross(2)?;
        #[rustfmt::skip]
        let expected: [f32; 9] = [
            0.0, 1.0, 0.0,
            1.0, 1.0, 1.0,
            0.0, 1.0, 0.0,
        ];
        assert_eq!(cross.weights(), &expected);
        Ok(())
    }

    #[test]
    fn cross_active_taps() -> Result<(), ImgprocError> {
        for dims in 1..=5 {
            let cross = Window::cross(dims)?;
            assert_eq!(cross.view().active_taps(), 2 * dims + 1);
            assert_eq!(cross.shape().dims(), dims);
        }
        Ok(())
    }

    #[test]
    fn cube_and_mean() -> Result<(), ImgprocError> {
        let cube = Window::cube(3)?;
        assert_eq!(cube.view().active_taps(), 27);

        let mean = Window::mean(3)?;
        let total: f32 = mean.weights().iter().sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-6);
        assert_relative_eq!(mean.weights()[0], 1.0 / 27.0);
        Ok(())
    }

    #[test]
    fn lines() -> Result<(), ImgprocError> {
        assert_eq!(Window::cube_line()?.weights(), &[1.0, 1.0, 1.0]);
        assert_eq!(Window::mean_line()?.shape().extents(), &[3]);
        assert_eq!(Window::line(&[0.25, 0.5, 0.25])?.shape().dims(), 1);
        Ok(())
    }

    #[test]
    fn invalid_dims() {
        assert_eq!(
            Window::cube(6).err(),
            Some(ImgprocError::Tensor(TensorError::UnsupportedDimensions(6)))
        );
        assert!(Window::cross(0).is_err());
        assert!(Window::line(&[]).is_err());
    }
}
