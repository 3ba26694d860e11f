use std::{fs::File, path::Path};

use dipnd_tensor::{HostTensor, NdShape};
use png::{BitDepth, ColorType, Decoder, Encoder};

use crate::error::IoError;

/// Read a PNG image as an 8-bit grayscale frame.
///
/// # Arguments
///
/// * `file_path` - The path to the PNG image.
///
/// # Returns
///
/// A two-axis array of shape `[width, height]`.
pub fn read_image_png_mono8(file_path: impl AsRef<Path>) -> Result<HostTensor<u8>, IoError> {
    // verify the file exists
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    // verify the file extension
    if file_path
        .extension()
        .map_or(true, |ext| !ext.eq_ignore_ascii_case("png"))
    {
        return Err(IoError::InvalidFileExtension(file_path.to_path_buf()));
    }

    let file = File::open(file_path)?;
    let mut reader = Decoder::new(file)
        .read_info()
        .map_err(|e| IoError::PngDecodeError(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::PngDecodeError(e.to_string()))?;

    if info.color_type != ColorType::Grayscale || info.bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedPixelFormat {
            path: file_path.to_path_buf(),
            format: format!("{:?} {:?}", info.color_type, info.bit_depth),
        });
    }
    buf.truncate(info.buffer_size());

    let shape = NdShape::new(&[info.width as usize, info.height as usize])?;
    Ok(HostTensor::from_shape_vec(shape, buf)?)
}

/// Write an 8-bit grayscale frame as a PNG image.
///
/// # Arguments
///
/// - `file_path` - The path to the PNG image.
/// - `frame` - A two-axis array of shape `[width, height]`.
pub fn write_image_png_gray8(
    file_path: impl AsRef<Path>,
    frame: &HostTensor<u8>,
) -> Result<(), IoError> {
    let file = File::create(file_path)?;

    let mut encoder = Encoder::new(
        file,
        frame.shape().extent(1) as u32,
        frame.shape().extent(2) as u32,
    );
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
    writer
        .write_image_data(frame.as_slice())
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
    Ok(())
}
