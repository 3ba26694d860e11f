use num_traits::Zero;

/// A sample type the kernels can operate on.
///
/// Convolution accumulates in `f32` and converts back with [`Pixel::from_f32`],
/// which truncates toward zero and saturates at the representable range.
pub trait Pixel: Copy + Default + PartialOrd + Zero + Send + Sync + 'static {
    /// The largest representable value, the identity of the minimum reduction.
    const MAX: Self;

    /// The value a fully lit sample has; invert subtracts from it.
    const FULL_SCALE: Self;

    /// Convert the sample to `f32`.
    fn to_f32(self) -> f32;

    /// Convert an `f32` back to a sample.
    fn from_f32(val: f32) -> Self;

    /// Reflect the sample around the middle of the range.
    fn invert(self) -> Self;
}

macro_rules! impl_integer_pixel {
    ($($t:ty),*) => {
        $(
            impl Pixel for $t {
                const MAX: Self = <$t>::MAX;
                const FULL_SCALE: Self = <$t>::MAX;

                #[inline]
                fn to_f32(self) -> f32 {
                    self as f32
                }

                #[inline]
                fn from_f32(val: f32) -> Self {
                    val.clamp(0.0, <$t>::MAX as f32) as $t
                }

                #[inline]
                fn invert(self) -> Self {
                    Self::FULL_SCALE - self
                }
            }
        )*
    };
}

impl_integer_pixel!(u8, u16);

impl Pixel for f32 {
    const MAX: Self = f32::MAX;
    const FULL_SCALE: Self = 1.0;

    #[inline]
    fn to_f32(self) -> f32 {
        self
    }

    #[inline]
    fn from_f32(val: f32) -> Self {
        val
    }

    #[inline]
    fn invert(self) -> Self {
        Self::FULL_SCALE - self
    }
}
