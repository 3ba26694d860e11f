#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use dipnd_tensor as tensor;

#[doc(inline)]
pub use dipnd_imgproc as imgproc;

#[doc(inline)]
pub use dipnd_io as io;

#[doc(inline)]
pub use dipnd_bench as bench;
