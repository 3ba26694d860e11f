use std::{
    io::Write,
    time::{Duration, Instant},
};

use crate::error::BenchError;

/// The timed body of a benchmark, run against the shared state `S`.
pub type BenchFn<'a, S> = Box<dyn FnMut(&mut S) -> Result<(), BenchError> + 'a>;

/// Called with the operator name once its timed runs are over.
pub type PostFn<'a, S> = Box<dyn FnMut(&mut S, &str) -> Result<(), BenchError> + 'a>;

/// A named operator to time.
pub struct BenchmarkSpec<'a, S> {
    /// Name of the operator, the first CSV column.
    pub name: String,
    /// The timed body.
    pub func: BenchFn<'a, S>,
    /// Optional step run after timing, e.g. to save a sample of the output.
    pub post: Option<PostFn<'a, S>>,
}

impl<'a, S> BenchmarkSpec<'a, S> {
    /// Create a spec without a post step.
    pub fn new(
        name: impl Into<String>,
        func: impl FnMut(&mut S) -> Result<(), BenchError> + 'a,
    ) -> Self {
        Self {
            name: name.into(),
            func: Box::new(func),
            post: None,
        }
    }

    /// Attach a post step.
    pub fn with_post(mut self, post: impl FnMut(&mut S, &str) -> Result<(), BenchError> + 'a) -> Self {
        self.post = Some(Box::new(post));
        self
    }
}

/// Timings of one operator.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkResult {
    /// Name of the operator.
    pub name: String,
    /// Duration of the first run.
    pub once: Duration,
    /// Mean duration over the following rounds, when more than one round was asked.
    pub mean: Option<Duration>,
}

/// Runs a list of operators and reports their timings as CSV.
///
/// The report starts with the header `operator,once` (plus `,mean` when
/// `rounds > 1`) followed by one row per operator, durations in seconds.
///
/// # Examples
///
/// ```
/// use dipnd_bench::builder::{BenchmarkBuilder, BenchmarkSpec};
///
/// let mut counter = 0usize;
/// let mut builder = BenchmarkBuilder::new();
/// builder.attach(BenchmarkSpec::new("count", |c: &mut usize| {
///     *c += 1;
///     Ok(())
/// }));
///
/// let mut report = Vec::new();
/// builder.run(&mut counter, 3, &mut report).unwrap();
/// assert_eq!(counter, 4);
/// assert!(String::from_utf8(report).unwrap().starts_with("operator,once,mean\n"));
/// ```
pub struct BenchmarkBuilder<'a, S> {
    specs: Vec<BenchmarkSpec<'a, S>>,
}

impl<S> Default for BenchmarkBuilder<'_, S> {
    fn default() -> Self {
        Self { specs: Vec::new() }
    }
}

impl<'a, S> BenchmarkBuilder<'a, S> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an operator; operators run in attachment order.
    pub fn attach(&mut self, spec: BenchmarkSpec<'a, S>) -> &mut Self {
        self.specs.push(spec);
        self
    }

    /// Names of the attached operators, in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.specs.iter().map(|spec| spec.name.as_str())
    }

    /// Time every operator and write the CSV report to `out`.
    ///
    /// Each operator is run once and timed; when `rounds > 1` it is then run
    /// `rounds` more times and the mean is reported. The post step runs after
    /// the timings of its operator have been written.
    ///
    /// # Errors
    ///
    /// Stops at the first failing operator or post step, or if the report cannot be written.
    pub fn run(
        &mut self,
        state: &mut S,
        rounds: usize,
        out: &mut impl Write,
    ) -> Result<Vec<BenchmarkResult>, BenchError> {
        writeln!(out, "operator,once{}", if rounds <= 1 { "" } else { ",mean" })?;

        let mut results = Vec::with_capacity(self.specs.len());
        for spec in self.specs.iter_mut() {
            let result = perform_benchmark(spec, state, rounds)?;

            write!(out, "{},{}", result.name, result.once.as_secs_f64())?;
            match result.mean {
                Some(mean) => writeln!(out, ",{}", mean.as_secs_f64())?,
                None => writeln!(out)?,
            }
            out.flush()?;

            if let Some(post) = spec.post.as_mut() {
                post(state, &spec.name)?;
            }
            results.push(result);
        }
        Ok(results)
    }
}

fn perform_benchmark<S>(
    spec: &mut BenchmarkSpec<'_, S>,
    state: &mut S,
    rounds: usize,
) -> Result<BenchmarkResult, BenchError> {
    let start = Instant::now();
    (spec.func)(state)?;
    let once = start.elapsed();

    let mean = if rounds > 1 {
        let start = Instant::now();
        for _ in 0..rounds {
            (spec.func)(state)?;
        }
        Some(mean_duration(start.elapsed(), rounds))
    } else {
        None
    };

    log::debug!("{}: once {:?}, mean {:?}", spec.name, once, mean);

    Ok(BenchmarkResult {
        name: spec.name.clone(),
        once,
        mean,
    })
}

/// Average of `rounds` runs that took `total` together.
fn mean_duration(total: Duration, rounds: usize) -> Duration {
    if rounds == 0 {
        return total;
    }
    total.div_f64(rounds as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Calls {
        runs: Vec<String>,
        posts: Vec<String>,
    }

    fn builder<'a>() -> BenchmarkBuilder<'a, Calls> {
        let mut builder = BenchmarkBuilder::new();
        builder
            .attach(BenchmarkSpec::new("first", |c: &mut Calls| {
                c.runs.push("first".into());
                Ok(())
            }))
            .attach(
                BenchmarkSpec::new("second", |c: &mut Calls| {
                    c.runs.push("second".into());
                    Ok(())
                })
                .with_post(|c: &mut Calls, name: &str| {
                    c.posts.push(name.to_string());
                    Ok(())
                }),
            );
        builder
    }

    fn rows(report: &[u8]) -> Vec<Vec<String>> {
        String::from_utf8_lossy(report)
            .lines()
            .map(|l| l.split(',').map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn single_round_has_no_mean_column() -> Result<(), BenchError> {
        let mut calls = Calls::default();
        let mut report = Vec::new();
        let results = builder().run(&mut calls, 1, &mut report)?;

        let rows = rows(&report);
        assert_eq!(rows[0], vec!["operator", "once"]);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1][0], "first");
        assert_eq!(rows[2].len(), 2);
        assert!(rows[2][1].parse::<f64>().is_ok());

        assert_eq!(calls.runs, vec!["first", "second"]);
        assert_eq!(calls.posts, vec!["second"]);
        assert!(results.iter().all(|r| r.mean.is_none()));
        Ok(())
    }

    #[test]
    fn several_rounds_add_mean_column() -> Result<(), BenchError> {
        let mut calls = Calls::default();
        let mut report = Vec::new();
        let results = builder().run(&mut calls, 4, &mut report)?;

        let rows = rows(&report);
        assert_eq!(rows[0], vec!["operator", "once", "mean"]);
        for row in &rows[1..] {
            assert_eq!(row.len(), 3);
            assert!(row[2].parse::<f64>().is_ok());
        }
        // one timed run plus four rounds each
        assert_eq!(calls.runs.len(), 10);
        assert_eq!(calls.posts.len(), 1);
        assert!(results.iter().all(|r| r.mean.is_some()));
        Ok(())
    }

    #[test]
    fn zero_rounds_behaves_like_one() -> Result<(), BenchError> {
        let mut calls = Calls::default();
        let mut report = Vec::new();
        builder().run(&mut calls, 0, &mut report)?;
        assert_eq!(rows(&report)[0], vec!["operator", "once"]);
        assert_eq!(calls.runs.len(), 2);
        Ok(())
    }

    #[test]
    fn failure_stops_the_run() {
        let mut builder = builder();
        builder.attach(BenchmarkSpec::new("broken", |_: &mut Calls| {
            Err(BenchError::InvalidArgument("boom".into()))
        }));
        let mut calls = Calls::default();
        let mut report = Vec::new();
        assert!(builder.run(&mut calls, 1, &mut report).is_err());
        assert_eq!(calls.runs.len(), 2);
        assert_eq!(builder.names().collect::<Vec<_>>(), vec!["first", "second", "broken"]);
    }

    #[test]
    fn mean_of_many_rounds() {
        assert_eq!(mean_duration(Duration::from_secs(12), 4), Duration::from_secs(3));
        assert_eq!(mean_duration(Duration::from_secs(5), 0), Duration::from_secs(5));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn mean_past_u32_rounds() {
        let rounds = 1usize << 32;
        assert_eq!(mean_duration(Duration::from_secs(1 << 32), rounds), Duration::from_secs(1));
        assert_eq!(
            mean_duration(Duration::from_secs(1 << 33), rounds + rounds),
            Duration::from_secs(1)
        );
    }
}
