use std::path::PathBuf;

use argh::FromArgs;
use dipnd_imgproc::ExecutionStrategy;
use dipnd_tensor::MAX_DIMS;

use crate::error::BenchError;

/// Reads a stack of image files, benchmarks a set of operators on it and saves
/// the results.
///
/// Both the input pattern and the saved files use a printf-like integer
/// specifier (%d) replaced by the indices from index 0 to index n. Dimension
/// sizes given after the output folder override the geometry of the stack.
#[derive(Debug, FromArgs)]
pub struct BenchArgs {
    /// input file pattern, e.g. "frames/%03d.tif"
    #[argh(positional)]
    pub input: String,

    /// index of the first frame
    #[argh(positional)]
    pub first: usize,

    /// index of the last frame, inclusive
    #[argh(positional)]
    pub last: usize,

    /// number of rounds the mean is computed over
    #[argh(positional)]
    pub rounds: usize,

    /// folder the samples are saved to
    #[argh(positional)]
    pub output: PathBuf,

    /// optional geometry d1 .. dN of the stack
    #[argh(positional)]
    pub geometry: Vec<usize>,

    /// execution strategy: serial, parallel or fixed:<threads>
    #[argh(
        option,
        short = 's',
        default = "ExecutionStrategy::ParallelElements",
        from_str_fn(parse_strategy)
    )]
    pub strategy: ExecutionStrategy,

    /// size of the global thread pool, 0 for the default
    #[argh(option, short = 't', default = "0")]
    pub threads: usize,

    /// skip saving a sample of every operator's output
    #[argh(switch)]
    pub no_save: bool,

    /// threshold of the threshold operator
    #[argh(option, default = "128")]
    pub threshold: u8,
}

fn parse_strategy(value: &str) -> Result<ExecutionStrategy, String> {
    value.parse().map_err(|e| format!("{e}"))
}

/// Validated run configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    /// Input file pattern.
    pub input: String,
    /// Index of the first frame.
    pub first: usize,
    /// Index of the last frame, inclusive.
    pub last: usize,
    /// Rounds the mean is computed over; no mean when at most one.
    pub rounds: usize,
    /// Folder the samples are saved to.
    pub output: PathBuf,
    /// Geometry override, `None` for `[width, height, frames]`.
    pub geometry: Option<Vec<usize>>,
    /// Execution strategy of every kernel.
    pub strategy: ExecutionStrategy,
    /// Size of the global thread pool, `None` for the rayon default.
    pub threads: Option<usize>,
    /// Whether a sample of every operator's output is saved.
    pub save: bool,
    /// Threshold of the threshold operator.
    pub threshold: u8,
}

impl TryFrom<BenchArgs> for BenchConfig {
    type Error = BenchError;

    fn try_from(args: BenchArgs) -> Result<Self, Self::Error> {
        if args.last < args.first {
            return Err(BenchError::InvalidArgument(format!(
                "index n ({}) is smaller than index 0 ({})",
                args.last, args.first
            )));
        }

        if args.geometry.len() > MAX_DIMS {
            return Err(BenchError::InvalidArgument(format!(
                "geometry has {} axes, at most {MAX_DIMS} are supported",
                args.geometry.len()
            )));
        }

        if args.geometry.contains(&0) {
            return Err(BenchError::InvalidArgument(format!(
                "geometry {:?} has an empty axis",
                args.geometry
            )));
        }

        Ok(Self {
            input: args.input,
            first: args.first,
            last: args.last,
            rounds: args.rounds,
            output: args.output,
            geometry: (!args.geometry.is_empty()).then_some(args.geometry),
            strategy: args.strategy,
            threads: (args.threads > 0).then_some(args.threads),
            save: !args.no_save,
            threshold: args.threshold,
        })
    }
}
