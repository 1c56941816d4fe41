//! Configuration for spherical navmesh generation.
//!
//! Settings persist to disk as RON, can be overridden from the command line
//! via clap, and are validated before use. The world section carries the
//! pole-axis convention and working radius range shared with the rest of the
//! geometry pipeline.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, PatchConfig, WorldConfig};
pub use error::ConfigError;
