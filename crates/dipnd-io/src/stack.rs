use std::path::{Path, PathBuf};

use dipnd_tensor::{HostTensor, NdShape};

use crate::{
    error::IoError, functional::read_image_any_mono8, pattern::format_index,
    tiff::write_image_tiff_mono8,
};

/// Frame geometry of a loaded stack.
///
/// Recorded at load time so that a stack processed under another N-D shape can
/// still be written back frame by frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackLayout {
    /// Width of every frame
    pub width: usize,
    /// Height of every frame
    pub height: usize,
    /// Number of frames
    pub frames: usize,
}

impl StackLayout {
    /// Number of samples in one frame.
    pub fn frame_len(&self) -> usize {
        self.width * self.height
    }

    /// Number of samples in the whole stack.
    pub fn len(&self) -> usize {
        self.frame_len() * self.frames
    }

    /// Whether the stack holds no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Load frames `first..=last` of a numbered image sequence into one array.
///
/// Every frame must be 8-bit grayscale with the size of the first one. Frames
/// are concatenated in order. Without a geometry the array has shape
/// `[width, height, frames]`; otherwise it has the given extents, whose product
/// must equal the number of samples loaded.
///
/// # Arguments
///
/// * `pattern` - A file name pattern with one integer specifier, see [`format_index`].
/// * `first` - Index of the first frame.
/// * `last` - Index of the last frame, inclusive.
/// * `geometry` - Optional extents overriding the default shape.
///
/// # Returns
///
/// The array in host memory and the frame geometry.
pub fn load_stack(
    pattern: &str,
    first: usize,
    last: usize,
    geometry: Option<&[usize]>,
) -> Result<(HostTensor<u8>, StackLayout), IoError> {
    if last < first {
        return Err(IoError::EmptyRange { first, last });
    }

    let mut data = Vec::new();
    let mut frame_size = None;

    for index in first..=last {
        let path = PathBuf::from(format_index(pattern, index)?);
        let frame = read_image_any_mono8(&path)?;
        let size = (frame.shape().extent(1), frame.shape().extent(2));

        match frame_size {
            None => {
                frame_size = Some(size);
                data.reserve(frame.numel() * (last - first + 1));
            }
            Some(expected) if expected != size => {
                return Err(IoError::FrameSizeMismatch {
                    path,
                    expected,
                    actual: size,
                });
            }
            Some(_) => {}
        }
        data.extend_from_slice(frame.as_slice());
    }

    let (width, height) = frame_size.unwrap_or_default();
    let layout = StackLayout {
        width,
        height,
        frames: last - first + 1,
    };

    let shape = match geometry {
        None => NdShape::new(&[width, height, layout.frames])?,
        Some(extents) => {
            let expected: usize = extents.iter().product();
            if expected != data.len() {
                return Err(IoError::GeometryMismatch {
                    geometry: extents.to_vec(),
                    expected,
                    actual: data.len(),
                });
            }
            NdShape::new(extents)?
        }
    };

    log::info!(
        "loaded {} frames of {}x{} from '{}' as {}",
        layout.frames,
        width,
        height,
        pattern,
        shape
    );

    Ok((HostTensor::from_shape_vec(shape, data)?, layout))
}

/// Save an array frame by frame as `dir/operator/%05d.tif`.
///
/// Frames are cut according to `layout` whatever the N-D shape of `stack`, and
/// numbered from `first`.
///
/// # Arguments
///
/// * `dir` - The output folder.
/// * `operator` - The name of the sub-folder, usually the operator name.
/// * `stack` - The array to save.
/// * `layout` - The frame geometry recorded by [`load_stack`].
/// * `first` - Index of the first frame.
///
/// # Returns
///
/// The folder the frames were written to.
pub fn save_stack(
    dir: impl AsRef<Path>,
    operator: &str,
    stack: &HostTensor<u8>,
    layout: &StackLayout,
    first: usize,
) -> Result<PathBuf, IoError> {
    if stack.numel() != layout.len() {
        return Err(dipnd_tensor::TensorError::invalid_shape(layout.len(), stack.numel()).into());
    }

    let out_dir = dir.as_ref().join(operator);
    std::fs::create_dir_all(&out_dir)?;

    let frame_shape = NdShape::new(&[layout.width, layout.height])?;
    for (i, samples) in stack.as_slice().chunks_exact(layout.frame_len()).enumerate() {
        let frame = HostTensor::from_shape_vec(frame_shape, samples.to_vec())?;
        write_image_tiff_mono8(out_dir.join(format!("{:05}.tif", first + i)), &frame)?;
    }

    log::info!(
        "saved {} frames of {}x{} to {}",
        layout.frames,
        layout.width,
        layout.height,
        out_dir.display()
    );

    Ok(out_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::png::write_image_png_gray8;

    fn write_frames(dir: &Path, count: usize, width: usize, height: usize) -> Result<(), IoError> {
        let shape = NdShape::new(&[width, height])?;
        for i in 0..count {
            let data = (0..width * height).map(|v| (v + 10 * i) as u8).collect();
            let frame = HostTensor::from_shape_vec(shape, data)?;
            write_image_tiff_mono8(dir.join(format!("in_{:03}.tif", i + 3)), &frame)?;
        }
        Ok(())
    }

    #[test]
    fn load_default_geometry() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        write_frames(tmp_dir.path(), 3, 4, 2)?;

        let pattern = tmp_dir.path().join("in_%03d.tif");
        let (stack, layout) = load_stack(&pattern.to_string_lossy(), 3, 5, None)?;

        assert_eq!(
            layout,
            StackLayout {
                width: 4,
                height: 2,
                frames: 3
            }
        );
        assert_eq!(stack.shape().extents(), &[4, 2, 3]);
        assert_eq!(stack.as_slice()[8], 10);
        assert_eq!(stack.as_slice()[23], 27);
        Ok(())
    }

    #[test]
    fn load_with_geometry_override() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        write_frames(tmp_dir.path(), 2, 4, 3)?;
        let pattern = tmp_dir.path().join("in_%03d.tif");
        let pattern = pattern.to_string_lossy();

        let (flat, _) = load_stack(&pattern, 3, 4, Some(&[24]))?;
        assert_eq!(flat.dims(), 1);

        let res = load_stack(&pattern, 3, 4, Some(&[5, 5]));
        assert!(matches!(
            res,
            Err(IoError::GeometryMismatch {
                expected: 25,
                actual: 24,
                ..
            })
        ));
        Ok(())
    }

    #[test]
    fn load_rejects_mixed_sizes() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        write_frames(tmp_dir.path(), 1, 4, 2)?;
        let other = HostTensor::from_shape_vec(NdShape::new(&[2, 2])?, vec![0u8; 4])?;
        write_image_tiff_mono8(tmp_dir.path().join("in_004.tif"), &other)?;

        let pattern = tmp_dir.path().join("in_%03d.tif");
        let res = load_stack(&pattern.to_string_lossy(), 3, 4, None);
        assert!(matches!(
            res,
            Err(IoError::FrameSizeMismatch {
                expected: (4, 2),
                actual: (2, 2),
                ..
            })
        ));
        Ok(())
    }

    #[test]
    fn load_png_sequence() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let frame = HostTensor::from_shape_vec(NdShape::new(&[3, 1])?, vec![7u8, 8, 9])?;
        write_image_png_gray8(tmp_dir.path().join("p0.png"), &frame)?;
        write_image_png_gray8(tmp_dir.path().join("p1.png"), &frame)?;

        let pattern = tmp_dir.path().join("p%d.png");
        let (stack, layout) = load_stack(&pattern.to_string_lossy(), 0, 1, None)?;
        assert_eq!(layout.frames, 2);
        assert_eq!(stack.as_slice(), &[7, 8, 9, 7, 8, 9]);
        Ok(())
    }

    #[test]
    fn load_rejects_empty_range() {
        let res = load_stack("%d.tif", 5, 4, None);
        assert!(matches!(res, Err(IoError::EmptyRange { first: 5, last: 4 })));
    }

    #[test]
    fn save_uses_frame_geometry() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let layout = StackLayout {
            width: 3,
            height: 2,
            frames: 2,
        };
        let data: Vec<u8> = (0..12).collect();
        // processed as a flat 1-D array
        let stack = HostTensor::from_shape_vec(NdShape::new(&[12])?, data)?;

        let out_dir = save_stack(tmp_dir.path(), "invert", &stack, &layout, 7)?;
        assert_eq!(out_dir, tmp_dir.path().join("invert"));

        let first = crate::tiff::read_image_tiff_mono8(out_dir.join("00007.tif"))?;
        let second = crate::tiff::read_image_tiff_mono8(out_dir.join("00008.tif"))?;
        assert_eq!(first.shape().extents(), &[3, 2]);
        assert_eq!(first.as_slice(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(second.as_slice(), &[6, 7, 8, 9, 10, 11]);
        Ok(())
    }

    #[test]
    fn save_rejects_wrong_size() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let layout = StackLayout {
            width: 3,
            height: 2,
            frames: 2,
        };
        let stack = HostTensor::from_shape_vec(NdShape::new(&[5])?, vec![0u8; 5])?;
        let res = save_stack(tmp_dir.path(), "copy", &stack, &layout, 0);
        assert!(matches!(res, Err(IoError::TensorError(_))));
        Ok(())
    }
}
