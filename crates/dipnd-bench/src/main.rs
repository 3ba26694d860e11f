use std::io::Write;

use dipnd_bench::{standard_suite, BenchArgs, BenchConfig, BenchError, SampleSink, SuiteState};
use dipnd_io::{load_stack, save_stack};
use dipnd_tensor::{Compute, DeviceMarker, HostTensor};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: BenchArgs = argh::from_env();
    let config = BenchConfig::try_from(args)?;

    if let Some(threads) = config.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(BenchError::from)?;
    }

    log::info!(
        "platform: {} {}, {} worker threads",
        std::env::consts::OS,
        std::env::consts::ARCH,
        rayon::current_num_threads()
    );
    log::info!("device: {}", Compute::device_info());

    let (image, layout) = load_stack(
        &config.input,
        config.first,
        config.last,
        config.geometry.as_deref(),
    )?;

    let sink = if config.save {
        let output = config.output.clone();
        let first = config.first;
        let save: SampleSink = Box::new(
            move |sample: &HostTensor<u8>, name: &str| -> Result<(), BenchError> {
                save_stack(&output, name, sample, &layout, first)?;
                Ok(())
            },
        );
        Some(save)
    } else {
        None
    };

    let mut state = SuiteState::new(image, config.strategy, config.threshold, sink)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    standard_suite().run(&mut state, config.rounds, &mut out)?;
    out.flush()?;

    Ok(())
}
