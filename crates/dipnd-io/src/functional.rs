use std::path::Path;

use dipnd_tensor::HostTensor;

use crate::{error::IoError, png::read_image_png_mono8, tiff::read_image_tiff_mono8};

/// Read an 8-bit grayscale frame, picking the codec from the file extension.
///
/// TIFF (`.tif`, `.tiff`) and PNG (`.png`) are supported.
///
/// # Arguments
///
/// * `file_path` - The path to the image.
///
/// # Returns
///
/// A two-axis array of shape `[width, height]`.
pub fn read_image_any_mono8(file_path: impl AsRef<Path>) -> Result<HostTensor<u8>, IoError> {
    let file_path = file_path.as_ref();
    let extension = file_path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase());

    match extension.as_deref() {
        Some("tif") | Some("tiff") => read_image_tiff_mono8(file_path),
        Some("png") => read_image_png_mono8(file_path),
        _ => Err(IoError::InvalidFileExtension(file_path.to_path_buf())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{png::write_image_png_gray8, tiff::write_image_tiff_mono8};
    use dipnd_tensor::NdShape;

    #[test]
    fn read_any_dispatches_on_extension() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let frame = HostTensor::from_shape_vec(NdShape::new(&[2, 2])?, vec![1u8, 2, 3, 4])?;

        let tif = tmp_dir.path().join("a.TIF");
        write_image_tiff_mono8(&tif, &frame)?;
        assert_eq!(read_image_any_mono8(&tif)?.as_slice(), &[1, 2, 3, 4]);

        let png = tmp_dir.path().join("a.png");
        write_image_png_gray8(&png, &frame)?;
        assert_eq!(read_image_any_mono8(&png)?.as_slice(), &[1, 2, 3, 4]);

        let res = read_image_any_mono8(tmp_dir.path().join("a.jpg"));
        assert!(matches!(res, Err(IoError::InvalidFileExtension(_))));
        Ok(())
    }
}
