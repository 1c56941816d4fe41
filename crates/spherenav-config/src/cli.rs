//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;
use spherenav_coords::PoleAxis;

use crate::Config;

/// spherenav command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "spherenav", about = "Spherical-world navmesh coordinate tools")]
pub struct CliArgs {
    /// Pole axis (x, y or z).
    #[arg(long)]
    pub pole_axis: Option<PoleAxis>,

    /// Sphere surface radius.
    #[arg(long)]
    pub radius: Option<f64>,

    /// Smallest radius the pipeline processes.
    #[arg(long)]
    pub min_radius: Option<f64>,

    /// Largest radius the pipeline processes.
    #[arg(long)]
    pub max_radius: Option<f64>,

    /// Patch half-angle in degrees.
    #[arg(long)]
    pub max_patch_angle: Option<f64>,

    /// Patch sample grid resolution per edge.
    #[arg(long)]
    pub samples_per_edge: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(axis) = args.pole_axis {
            self.world.pole_axis = axis;
        }
        if let Some(r) = args.radius {
            self.world.radius = r;
        }
        if let Some(r) = args.min_radius {
            self.world.min_radius = r;
        }
        if let Some(r) = args.max_radius {
            self.world.max_radius = r;
        }
        if let Some(angle) = args.max_patch_angle {
            self.patch.max_angle_deg = angle;
        }
        if let Some(n) = args.samples_per_edge {
            self.patch.samples_per_edge = n;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
