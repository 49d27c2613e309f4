use std::{
    path::PathBuf,
    process::ExitCode,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc,
    },
    thread,
    time::{Duration, Instant},
};

use clap::Parser;
use thermal_load::{
    DEFAULT_ONSET_MARGIN, DEFAULT_SYSFS_ROOT, Sampler, SamplerBuilder, SourceKind, monitor,
    safe_mpsc,
};

/// Report host thermal load (0 = no throttling, 100 = fully throttled)
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Source to read: auto, cooling or components
    #[arg(short, long, default_value_t = SourceKind::Auto)]
    source: SourceKind,
    /// Directory holding cooling_device* entries
    #[arg(long, default_value = DEFAULT_SYSFS_ROOT)]
    sysfs_root: PathBuf,
    /// Degrees below critical at which a sensor starts reporting load
    #[arg(long, default_value_t = DEFAULT_ONSET_MARGIN)]
    onset_margin: f32,
    /// Milliseconds between samples
    #[arg(short, long, default_value_t = 1000)]
    interval_ms: u64,
    /// Number of samples to print
    #[arg(short, long, default_value_t = 1)]
    count: u32,
    /// Print every change until interrupted
    #[arg(short, long, default_value_t = false)]
    watch: bool,
}

fn main() -> ExitCode {
    // Initialize the logger
    env_logger::init();
    // Parse command line arguments
    let args = Args::parse();
    log::debug!("Arguments: {args:#?}");
    let sampler = match SamplerBuilder::default()
        .with_source(args.source)
        .with_sysfs_root(&args.sysfs_root)
        .with_onset_margin(args.onset_margin)
        .build()
    {
        Ok(sampler) => sampler,
        Err(e) => {
            log::error!("[THM] {e}");
            return ExitCode::FAILURE;
        }
    };
    let interval = Duration::from_millis(args.interval_ms);
    if args.watch {
        watch(sampler, interval)
    } else {
        print_samples(&sampler, interval, args.count)
    }
}

fn print_samples(sampler: &Sampler, interval: Duration, count: u32) -> ExitCode {
    let mut failed = false;
    for idx in 0..count {
        let start = Instant::now();
        match sampler.sample() {
            Ok(load) => println!("{}", load.percent()),
            Err(e) => {
                log::error!("[THM] {e}");
                failed = true;
            }
        }
        let elapsed = start.elapsed();
        if idx + 1 < count && elapsed < interval {
            thread::sleep(interval - elapsed);
        }
    }
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn watch(sampler: Sampler, interval: Duration) -> ExitCode {
    // Synchronizer
    let running = Arc::new(AtomicBool::new(true));
    // Handle Ctrl+C to stop gracefully
    {
        let running = running.clone();
        if let Err(e) = ctrlc::set_handler(move || {
            log::info!("Received Ctrl+C, stopping...");
            running.store(false, Ordering::Relaxed);
        }) {
            log::error!("Error setting Ctrl-C handler: {e}");
            return ExitCode::FAILURE;
        }
    }
    let (tx, rx) = safe_mpsc::channel();
    let hdl = {
        let running = running.clone();
        let sampler = Arc::new(sampler);
        thread::spawn(move || monitor::monitor_thread(sampler, interval, running, tx))
    };
    while running.load(Ordering::Relaxed) {
        match rx.recv_timeout(Duration::from_millis(250)) {
            Ok(event) => match event.previous {
                Some(prev) => println!("{} -> {}", prev.percent(), event.load.percent()),
                None => println!("{}", event.load.percent()),
            },
            Err(mpsc::RecvTimeoutError::Timeout) => continue,
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }
    running.store(false, Ordering::Relaxed);
    if hdl.join().is_err() {
        log::error!("[MON] Monitor thread panicked");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
