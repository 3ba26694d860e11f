use dipnd_imgproc::{
    apply_elementwise, apply_separable, apply_window, ElementwiseOp, ExecutionStrategy,
    ImgprocError, Pixel, Window, WindowOp,
};
use rayon::ThreadPool;
use dipnd_tensor::{ComputeTensor, HostTensor};

use crate::{
    builder::{BenchmarkBuilder, BenchmarkSpec},
    error::BenchError,
};

/// Receives a host copy of an operator's output together with the operator name.
pub type SampleSink<'a> = Box<dyn FnMut(&HostTensor<u8>, &str) -> Result<(), BenchError> + 'a>;

/// Buffers and structuring elements shared by the operators of the standard suite.
///
/// The input, auxiliary and output buffers live in compute memory; the host
/// buffers are only touched by the transfer operators and by sample saving.
///
/// A [`ExecutionStrategy::Fixed`] strategy gets its thread pool once, here;
/// every kernel then fans out inside that pool so the timings do not include
/// spawning threads.
pub struct SuiteState<'a> {
    host_input: HostTensor<u8>,
    host_output: HostTensor<u8>,
    input: ComputeTensor<u8>,
    aux: ComputeTensor<u8>,
    output: ComputeTensor<u8>,
    cross: Window,
    cube: Window,
    mean: Window,
    cube_line: Window,
    mean_line: Window,
    strategy: ExecutionStrategy,
    pool: Option<ThreadPool>,
    threshold: u8,
    sink: Option<SampleSink<'a>>,
}

impl<'a> SuiteState<'a> {
    /// Upload `image` and build the structuring elements for its rank.
    ///
    /// # Arguments
    ///
    /// * `image` - The stack to process, in host memory.
    /// * `strategy` - The execution strategy of every kernel.
    /// * `threshold` - The threshold of the threshold operator.
    /// * `sink` - Where samples of the outputs go; `None` to skip saving.
    pub fn new(
        image: HostTensor<u8>,
        strategy: ExecutionStrategy,
        threshold: u8,
        sink: Option<SampleSink<'a>>,
    ) -> Result<Self, BenchError> {
        let (pool, kernel_strategy) = match strategy {
            ExecutionStrategy::Fixed(0) => return Err(ImgprocError::InvalidThreadCount(0).into()),
            ExecutionStrategy::Fixed(n) => {
                let pool = rayon::ThreadPoolBuilder::new().num_threads(n).build()?;
                (Some(pool), ExecutionStrategy::ParallelElements)
            }
            other => (None, other),
        };
        let dims = image.dims();
        let input: ComputeTensor<u8> = image.to_device()?;
        let aux = ComputeTensor::from_shape_val(*image.shape(), 0)?;
        let output = ComputeTensor::from_shape_val(*image.shape(), 0)?;
        let host_output = HostTensor::from_shape_val(*image.shape(), 0)?;

        log::info!(
            "suite on {} ({} samples) with {} strategy",
            *image.shape(),
            image.numel(),
            strategy
        );

        Ok(Self {
            host_input: image,
            host_output,
            input,
            aux,
            output,
            cross: Window::cross(dims)?,
            cube: Window::cube(dims)?,
            mean: Window::mean(dims)?,
            cube_line: Window::cube_line()?,
            mean_line: Window::mean_line()?,
            strategy: kernel_strategy,
            pool,
            threshold,
            sink,
        })
    }

    /// The compute buffer the operators write to.
    pub fn output(&self) -> &ComputeTensor<u8> {
        &self.output
    }

    /// Number of threads of the suite's own pool, `None` when the kernels use
    /// the global pool or run serially.
    pub fn pool_threads(&self) -> Option<usize> {
        self.pool.as_ref().map(ThreadPool::current_num_threads)
    }

    fn window(&mut self, op: WindowOp, which: Strel) -> Result<(), BenchError> {
        let window = match which {
            Strel::Cross => &self.cross,
            Strel::Cube => &self.cube,
            Strel::Mean => &self.mean,
        };
        let (src, mut dst, window) = (self.input.view(), self.output.view_mut(), window.view());
        let strategy = self.strategy;
        in_pool(self.pool.as_ref(), || {
            apply_window(op, &src, &mut dst, &window, strategy)
        })?;
        Ok(())
    }

    fn separable(&mut self, op: WindowOp) -> Result<(), BenchError> {
        let line = match op {
            WindowOp::Erode => &self.cube_line,
            WindowOp::Convolve => &self.mean_line,
        };
        let src = self.input.view();
        let mut aux = self.aux.view_mut();
        let mut dst = self.output.view_mut();
        let (line, dims, strategy) = (line.view(), src.dims(), self.strategy);
        in_pool(self.pool.as_ref(), || {
            apply_separable(op, &src, &mut aux, &mut dst, &line, dims, strategy)
        })?;
        Ok(())
    }

    fn elementwise(&mut self, op: ElementwiseOp<u8>) -> Result<(), BenchError> {
        let (src, mut dst, strategy) = (self.input.view(), self.output.view_mut(), self.strategy);
        in_pool(self.pool.as_ref(), || apply_elementwise(op, &src, &mut dst, strategy))?;
        Ok(())
    }
}

/// Run `f` inside `pool` when there is one, on the calling thread otherwise.
fn in_pool<R: Send>(pool: Option<&ThreadPool>, f: impl FnOnce() -> R + Send) -> R {
    match pool {
        Some(pool) => pool.install(f),
        None => f(),
    }
}

#[derive(Clone, Copy)]
enum Strel {
    Cross,
    Cube,
    Mean,
}

/// Download the output buffer and hand it to the sample sink.
fn save_sample(state: &mut SuiteState<'_>, name: &str) -> Result<(), BenchError> {
    let Some(sink) = state.sink.as_mut() else {
        return Ok(());
    };
    state.output.copy_into(&mut state.host_output)?;
    sink(&state.host_output, name)
}

/// Names of the standard operators, in run order.
pub const STANDARD_OPERATORS: [&str; 10] = [
    "upload",
    "download",
    "copy",
    "invert",
    "threshold",
    "erode-cross",
    "erode-cube",
    "split-erode-cube",
    "convolve",
    "split-convolve",
];

/// Build the standard operator suite.
///
/// `upload` and `download` time the host/compute transfers of the input; every
/// other operator reads the compute input, writes the compute output and saves
/// a sample afterwards.
pub fn standard_suite<'a, 's>() -> BenchmarkBuilder<'a, SuiteState<'s>> {
    let mut builder = BenchmarkBuilder::new();
    builder
        .attach(BenchmarkSpec::new("upload", |s: &mut SuiteState<'s>| {
            s.host_input.copy_into(&mut s.input)?;
            Ok(())
        }))
        .attach(BenchmarkSpec::new("download", |s: &mut SuiteState<'s>| {
            s.input.copy_into(&mut s.host_output)?;
            Ok(())
        }))
        .attach(
            BenchmarkSpec::new("copy", |s: &mut SuiteState<'s>| {
                s.elementwise(ElementwiseOp::Copy)
            })
            .with_post(save_sample),
        )
        .attach(
            BenchmarkSpec::new("invert", |s: &mut SuiteState<'s>| {
                s.elementwise(ElementwiseOp::Invert)
            })
            .with_post(save_sample),
        )
        .attach(
            BenchmarkSpec::new("threshold", |s: &mut SuiteState<'s>| {
                let threshold = s.threshold;
                s.elementwise(ElementwiseOp::Threshold {
                    threshold,
                    high: u8::FULL_SCALE,
                })
            })
            .with_post(save_sample),
        )
        .attach(
            BenchmarkSpec::new("erode-cross", |s: &mut SuiteState<'s>| {
                s.window(WindowOp::Erode, Strel::Cross)
            })
            .with_post(save_sample),
        )
        .attach(
            BenchmarkSpec::new("erode-cube", |s: &mut SuiteState<'s>| {
                s.window(WindowOp::Erode, Strel::Cube)
            })
            .with_post(save_sample),
        )
        .attach(
            BenchmarkSpec::new("split-erode-cube", |s: &mut SuiteState<'s>| {
                s.separable(WindowOp::Erode)
            })
            .with_post(save_sample),
        )
        .attach(
            BenchmarkSpec::new("convolve", |s: &mut SuiteState<'s>| {
                s.window(WindowOp::Convolve, Strel::Mean)
            })
            .with_post(save_sample),
        )
        .attach(
            BenchmarkSpec::new("split-convolve", |s: &mut SuiteState<'s>| {
                s.separable(WindowOp::Convolve)
            })
            .with_post(save_sample),
        );
    builder
}
