//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use spherenav_coords::{PoleAxis, ProjectionError, TangentPlaneSpace};

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Sphere and axis settings shared with the geometry pipeline.
    pub world: WorldConfig,
    /// Patch partitioning settings.
    pub patch: PatchConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// World configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// Axis the polar angle is measured from.
    pub pole_axis: PoleAxis,
    /// Surface radius of the sphere in world units.
    pub radius: f64,
    /// Smallest distance from the center the pipeline expects to process.
    pub min_radius: f64,
    /// Largest distance from the center the pipeline expects to process.
    pub max_radius: f64,
}

/// Patch partitioning configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PatchConfig {
    /// Largest angle in degrees between a patch's reference point and any of
    /// its samples. Must stay below 90.
    pub max_angle_deg: f64,
    /// Sample grid resolution along one patch edge.
    pub samples_per_edge: u32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            pole_axis: PoleAxis::Y,
            radius: 1_000.0,
            min_radius: 900.0,
            max_radius: 1_200.0,
        }
    }
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            max_angle_deg: 10.0,
            samples_per_edge: 16,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl WorldConfig {
    /// Whether `radius` lies inside the working range (inclusive).
    #[must_use]
    pub fn contains_radius(&self, radius: f64) -> bool {
        (self.min_radius..=self.max_radius).contains(&radius)
    }
}

impl PatchConfig {
    /// Patch half-angle in radians.
    #[must_use]
    pub fn max_angle_rad(&self) -> f32 {
        self.max_angle_deg.to_radians() as f32
    }
}

// --- Validation / adapters ---

impl Config {
    /// Check that every setting is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.world;
        if !(w.min_radius.is_finite() && w.max_radius.is_finite() && w.radius.is_finite()) {
            return Err(ConfigError::Invalid("world radii must be finite".to_string()));
        }
        if w.min_radius <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "world.min_radius must be positive, got {}",
                w.min_radius
            )));
        }
        if w.min_radius > w.max_radius {
            return Err(ConfigError::Invalid(format!(
                "world.min_radius ({}) exceeds world.max_radius ({})",
                w.min_radius, w.max_radius
            )));
        }
        if !w.contains_radius(w.radius) {
            return Err(ConfigError::Invalid(format!(
                "world.radius ({}) is outside [{}, {}]",
                w.radius, w.min_radius, w.max_radius
            )));
        }

        let p = &self.patch;
        if !(p.max_angle_deg > 0.0 && p.max_angle_deg < 90.0) {
            return Err(ConfigError::Invalid(format!(
                "patch.max_angle_deg must be in (0, 90), got {}",
                p.max_angle_deg
            )));
        }
        if p.samples_per_edge < 2 {
            return Err(ConfigError::Invalid(format!(
                "patch.samples_per_edge must be at least 2, got {}",
                p.samples_per_edge
            )));
        }
        Ok(())
    }

    /// Build the tangent-plane space for a patch anchored at `reference`,
    /// using the configured pole axis and patch half-angle.
    pub fn tangent_space(&self, reference: Vec3) -> Result<TangentPlaneSpace, ProjectionError> {
        let distance = f64::from(reference.length());
        if !self.world.contains_radius(distance) {
            log::warn!(
                "Patch reference at distance {distance} lies outside the working range [{}, {}]",
                self.world.min_radius,
                self.world.max_radius
            );
        }
        Ok(
            TangentPlaneSpace::with_pole_axis(reference, self.world.pole_axis)?
                .with_max_angle(self.patch.max_angle_rad()),
        )
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            config.validate()?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
        new_config.validate()?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
