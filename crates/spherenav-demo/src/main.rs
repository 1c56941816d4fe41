//! Demo binary that walks through the spherical coordinate layer.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p spherenav-demo`.
//! Run with `cargo run -p spherenav-demo -- --radius 6371 --max-patch-angle 5` for a larger sphere.

mod patch_demos;

use std::process::ExitCode;

use clap::Parser;
use spherenav_config::{CliArgs, Config};
use tracing::{error, info};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = args.config.clone().unwrap_or_else(|| {
        dirs::config_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("spherenav")
    });

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    spherenav_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    if let Err(e) = config.validate() {
        error!("Refusing to run with {e}");
        return ExitCode::FAILURE;
    }

    patch_demos::demonstrate_conversion();
    patch_demos::demonstrate_projection();
    patch_demos::demonstrate_projection_failures();

    match patch_demos::run_patch_pass(&config) {
        Ok(report) => {
            info!(
                "Patch pass: {} samples, flat bounds {:?}..{:?}, max roundtrip error {:.3e}",
                report.sample_count, report.flat_min, report.flat_max, report.max_roundtrip_error
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Patch pass failed: {e}");
            ExitCode::FAILURE
        }
    }
}
