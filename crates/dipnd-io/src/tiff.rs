use std::{fs, path::Path};

use dipnd_tensor::{HostTensor, NdShape};
use tiff::{
    decoder::DecodingResult,
    encoder::{colortype, TiffEncoder},
};

use crate::error::IoError;

/// Read a TIFF image as an 8-bit grayscale frame.
///
/// # Arguments
///
/// * `file_path` - The path to the TIFF image.
///
/// # Returns
///
/// A two-axis array of shape `[width, height]`.
pub fn read_image_tiff_mono8(file_path: impl AsRef<Path>) -> Result<HostTensor<u8>, IoError> {
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    if file_path.extension().map_or(true, |ext| {
        !ext.eq_ignore_ascii_case("tiff") && !ext.eq_ignore_ascii_case("tif")
    }) {
        return Err(IoError::InvalidFileExtension(file_path.to_path_buf()));
    }

    let tiff_data = fs::File::open(file_path)?;
    let mut decoder = tiff::decoder::Decoder::new(tiff_data)?;

    let colortype = decoder.colortype()?;
    if colortype != tiff::ColorType::Gray(8) {
        return Err(IoError::UnsupportedPixelFormat {
            path: file_path.to_path_buf(),
            format: format!("{colortype:?}"),
        });
    }

    let (width, height) = decoder.dimensions()?;
    let data = match decoder.read_image()? {
        DecodingResult::U8(data) => data,
        _ => {
            return Err(IoError::TiffError(tiff::TiffError::UnsupportedError(
                tiff::TiffUnsupportedError::UnknownInterpretation,
            )))
        }
    };

    let shape = NdShape::new(&[width as usize, height as usize])?;
    Ok(HostTensor::from_shape_vec(shape, data)?)
}

/// Write an 8-bit grayscale frame as a TIFF image.
///
/// # Arguments
///
/// * `file_path` - The path to the TIFF image.
/// * `frame` - A two-axis array of shape `[width, height]`.
pub fn write_image_tiff_mono8(
    file_path: impl AsRef<Path>,
    frame: &HostTensor<u8>,
) -> Result<(), IoError> {
    let file = fs::File::create(file_path)?;

    let mut encoder = TiffEncoder::new(file)?;
    encoder.write_image::<colortype::Gray8>(
        frame.shape().extent(1) as u32,
        frame.shape().extent(2) as u32,
        frame.as_slice(),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_write_read_tiff_mono8() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("frame.tif");

        let shape = NdShape::new(&[3, 4])?;
        let data: Vec<u8> = (0..12).map(|v| v * 20).collect();
        let frame = HostTensor::from_shape_vec(shape, data.clone())?;
        write_image_tiff_mono8(&file_path, &frame)?;

        let back = read_image_tiff_mono8(&file_path)?;
        assert_eq!(back.shape().extents(), &[3, 4]);
        assert_eq!(back.as_slice(), data.as_slice());
        Ok(())
    }

    #[test]
    fn missing_file() {
        let res = read_image_tiff_mono8("does/not/exist.tif");
        assert!(matches!(res, Err(IoError::FileDoesNotExist(_))));
    }

    #[test]
    fn wrong_extension() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("frame.bmp");
        fs::write(&file_path, [0u8; 4])?;
        let res = read_image_tiff_mono8(&file_path);
        assert!(matches!(res, Err(IoError::InvalidFileExtension(_))));
        Ok(())
    }
}
