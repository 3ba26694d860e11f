use dipnd::imgproc::{
    apply_elementwise, apply_separable, apply_window, ElementwiseOp, ExecutionStrategy, Window,
    WindowOp,
};
use dipnd::tensor::{ComputeTensor, HostTensor, NdShape};

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn host(extents: &[usize], data: Vec<u8>) -> Result<HostTensor<u8>, Box<dyn std::error::Error>> {
    Ok(HostTensor::from_shape_vec(NdShape::new(extents)?, data)?)
}

#[test]
fn erode_line_of_three() -> TestResult {
    let src = host(&[3], vec![10, 200, 10])?;
    let mut dst = HostTensor::from_shape_val(*src.shape(), 0u8)?;
    let window = Window::cube(1)?;

    apply_window(
        WindowOp::Erode,
        &src.view(),
        &mut dst.view_mut(),
        &window.view(),
        ExecutionStrategy::Serial,
    )?;

    assert_eq!(dst.as_slice(), &[10, 10, 10]);
    Ok(())
}

#[test]
fn invert_and_threshold_u8() -> TestResult {
    let src = host(&[3], vec![0, 255, 128])?;
    let mut dst = HostTensor::from_shape_val(*src.shape(), 0u8)?;
    apply_elementwise(
        ElementwiseOp::Invert,
        &src.view(),
        &mut dst.view_mut(),
        ExecutionStrategy::ParallelElements,
    )?;
    assert_eq!(dst.as_slice(), &[255, 0, 127]);

    let src = host(&[3], vec![0, 128, 200])?;
    apply_elementwise(
        ElementwiseOp::Threshold {
            threshold: 128,
            high: 255,
        },
        &src.view(),
        &mut dst.view_mut(),
        ExecutionStrategy::Fixed(2),
    )?;
    assert_eq!(dst.as_slice(), &[0, 0, 255]);
    Ok(())
}

fn ramp(extents: &[usize]) -> Result<ComputeTensor<u8>, Box<dyn std::error::Error>> {
    let size = extents.iter().product::<usize>();
    let data = (0..size).map(|i| ((i * 53 + 7) % 256) as u8).collect();
    Ok(host(extents, data)?.to_device()?)
}

fn separable_matches_full_window(extents: &[usize]) -> TestResult {
    let src = ramp(extents)?;
    let dims = src.dims();
    let mut aux = ComputeTensor::from_shape_val(*src.shape(), 0u8)?;
    let mut split = ComputeTensor::from_shape_val(*src.shape(), 0u8)?;
    let mut full = ComputeTensor::from_shape_val(*src.shape(), 0u8)?;

    apply_separable(
        WindowOp::Erode,
        &src.view(),
        &mut aux.view_mut(),
        &mut split.view_mut(),
        &Window::cube_line()?.view(),
        dims,
        ExecutionStrategy::ParallelElements,
    )?;
    apply_window(
        WindowOp::Erode,
        &src.view(),
        &mut full.view_mut(),
        &Window::cube(dims)?.view(),
        ExecutionStrategy::ParallelElements,
    )?;

    let split: HostTensor<u8> = split.to_device()?;
    let full: HostTensor<u8> = full.to_device()?;
    assert_eq!(split.as_slice(), full.as_slice());
    Ok(())
}

#[test]
fn separable_erosion_even_pass_count() -> TestResult {
    separable_matches_full_window(&[7, 5])
}

#[test]
fn separable_erosion_odd_pass_count() -> TestResult {
    separable_matches_full_window(&[6, 4, 3])
}
