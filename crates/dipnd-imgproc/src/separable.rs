use dipnd_tensor::{ArrayView, ArrayViewMut, NdShape, WindowView, MAX_DIMS};

use crate::{
    core,
    error::{ensure_same_shape, ImgprocError},
    ops::{apply_window, WindowOp},
    parallel::ExecutionStrategy,
    pixel::Pixel,
};

/// Which buffer a pass reads and which one it writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassRoute {
    /// Source to output, the only pass of a one-axis run.
    SourceToOutput,
    /// Source to auxiliary, the first pass of a multi-axis run.
    SourceToAux,
    /// Output to auxiliary.
    OutputToAux,
    /// Auxiliary to output.
    AuxToOutput,
}

/// One 1-D pass of a separable operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pass {
    /// The axis the line window is laid along.
    pub axis: usize,
    /// The buffers the pass reads and writes.
    pub route: PassRoute,
}

/// What has to happen after the last pass so the result sits in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixUp {
    /// The last pass already wrote the output.
    None,
    /// The last pass wrote the auxiliary buffer, which is copied to the output.
    CopyAuxToOutput,
}

/// The pass schedule of a separable operation over `N` axes.
///
/// Pass 1 reads the source. After that, passes alternate between the auxiliary
/// and output buffers: pass `d` writes the auxiliary buffer when `d` is odd and
/// the output when `d` is even. When `N` is odd the result therefore ends up in
/// the auxiliary buffer and one copy moves it to the output. A single-axis run
/// writes the output directly.
///
/// # Examples
///
/// ```
/// use dipnd_imgproc::separable::{FixUp, PassRoute, SeparablePlan};
///
/// let plan = SeparablePlan::new(3).unwrap();
/// let routes: Vec<_> = plan.passes().iter().map(|p| p.route).collect();
/// assert_eq!(
///     routes,
///     vec![PassRoute::SourceToAux, PassRoute::AuxToOutput, PassRoute::OutputToAux]
/// );
/// assert_eq!(plan.fix_up(), FixUp::CopyAuxToOutput);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeparablePlan {
    passes: Vec<Pass>,
    fix_up: FixUp,
}

impl SeparablePlan {
    /// Build the schedule for `dims` passes, one per axis `1..=dims`.
    ///
    /// # Errors
    ///
    /// Returns an error if `dims` is zero or larger than [`MAX_DIMS`].
    pub fn new(dims: usize) -> Result<Self, ImgprocError> {
        if dims == 0 || dims > MAX_DIMS {
            return Err(ImgprocError::InvalidPassCount(dims));
        }

        if dims == 1 {
            return Ok(Self {
                passes: vec![Pass {
                    axis: 1,
                    route: PassRoute::SourceToOutput,
                }],
                fix_up: FixUp::None,
            });
        }

        let passes = (1..=dims)
            .map(|axis| {
                let route = match axis {
                    1 => PassRoute::SourceToAux,
                    d if d % 2 == 0 => PassRoute::AuxToOutput,
                    _ => PassRoute::OutputToAux,
                };
                Pass { axis, route }
            })
            .collect();

        let fix_up = if dims % 2 == 1 {
            FixUp::CopyAuxToOutput
        } else {
            FixUp::None
        };

        Ok(Self { passes, fix_up })
    }

    /// The passes in execution order.
    pub fn passes(&self) -> &[Pass] {
        &self.passes
    }

    /// The step that moves the result into the output.
    pub fn fix_up(&self) -> FixUp {
        self.fix_up
    }
}

/// Apply a window operator as a sequence of 1-D passes, one per axis.
///
/// The same line of weights is laid along axes `1..=dims` in turn, each pass
/// consuming the previous pass's result. `aux` is scratch space; on return the
/// result is in `dst` whatever the parity of `dims`. Every pass completes
/// before the next one starts.
///
/// # Arguments
///
/// * `op` - The window operator.
/// * `src` - The input array.
/// * `aux` - The auxiliary buffer, with the same shape as `src`.
/// * `dst` - The output array, with the same shape as `src`.
/// * `line` - The one-dimensional per-axis window.
/// * `dims` - The number of axes to run a pass along.
/// * `strategy` - The execution strategy of every pass.
///
/// # Errors
///
/// Returns an error if the buffers differ in shape, `line` is not
/// one-dimensional, or `dims` is zero or exceeds the image rank.
pub fn apply_separable<T: Pixel>(
    op: WindowOp,
    src: &ArrayView<T>,
    aux: &mut ArrayViewMut<T>,
    dst: &mut ArrayViewMut<T>,
    line: &WindowView,
    dims: usize,
    strategy: ExecutionStrategy,
) -> Result<(), ImgprocError> {
    ensure_same_shape(src.shape(), aux.shape())?;
    ensure_same_shape(src.shape(), dst.shape())?;
    if line.dims() != 1 {
        return Err(ImgprocError::NotALine(line.dims()));
    }
    if dims > src.dims() {
        return Err(ImgprocError::WindowRankExceedsImage {
            window: dims,
            image: src.dims(),
        });
    }

    let plan = SeparablePlan::new(dims)?;
    let taps = line.shape().size();

    for pass in plan.passes() {
        let window = line.with_shape(NdShape::line(pass.axis, taps)?)?;
        log::debug!(
            "{}: pass along axis {}/{} ({:?})",
            op.name(),
            pass.axis,
            dims,
            pass.route
        );
        match pass.route {
            PassRoute::SourceToOutput => apply_window(op, src, dst, &window, strategy)?,
            PassRoute::SourceToAux => apply_window(op, src, aux, &window, strategy)?,
            PassRoute::OutputToAux => apply_window(op, &dst.as_view(), aux, &window, strategy)?,
            PassRoute::AuxToOutput => apply_window(op, &aux.as_view(), dst, &window, strategy)?,
        }
    }

    if plan.fix_up() == FixUp::CopyAuxToOutput {
        log::debug!("{}: copy auxiliary buffer to output", op.name());
        core::copy(&aux.as_view(), dst, strategy)?;
    }

    Ok(())
}
