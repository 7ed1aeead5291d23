mod app;

use app::build_cli;
use console::style;
use log::{info, warn};
use std::path::Path;
use std::time::Instant;
use triangle_sweep_lib::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = match build_cli().get_matches_safe() {
        Ok(matches) => matches,
        Err(e) => {
            // Usage, help and version requests are not failures.
            println!("{}", e.message);
            return Ok(());
        }
    };

    init_logger(matches.occurrences_of("verbosity"));

    let run_seed = matches
        .value_of("seed")
        .map(str::parse::<u64>)
        .transpose()?;
    let script_file = matches
        .value_of("script_file")
        .ok_or("Missing the sweep configuration")?;
    let config = SweepConfiguration::from_file(Path::new(script_file))?;
    info!(
        "Sweeping {} graphs under {} conditions each",
        config.input_files.len(),
        SweepPlan::new(&config).conditions_per_graph()
    );

    let cache = if config.snapshot_cache {
        match config.cache_dir.clone().or_else(SnapshotCache::default_dir) {
            Some(dir) => {
                info!("Using the snapshot cache in {:?}", dir);
                Some(SnapshotCache::new(dir))
            }
            None => {
                warn!("No cache directory available, snapshots are disabled");
                None
            }
        }
    } else {
        None
    };

    let loader = FileGraphLoader::new(config.graph_format, cache);
    let dispatcher = KernelDispatcher::new(Reporter::new(config.output_dir.clone()));
    let mut controller = SweepController::new(&config, loader, dispatcher, run_seed)
        .with_progress(matches.is_present("progress"));

    let now = Instant::now();
    let summary = controller.run()?;
    println!(
        "{} {} trials on {} graphs in {:.2} s (run seed {})",
        style("Sweep finished.").green(),
        summary.dispatched,
        summary.graphs,
        now.elapsed().as_secs_f32(),
        controller.run_seed()
    );
    if !summary.skipped.is_empty() {
        warn!("Skipped {} conditions with unknown algorithms", summary.skipped.len());
    }

    Ok(())
}

/// `RUST_LOG` wins over the verbosity flag.
fn init_logger(verbosity: u64) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
