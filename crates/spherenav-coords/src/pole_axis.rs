//! Axis convention shared by the spherical converter and the tangent-plane projector.

use std::fmt;
use std::str::FromStr;

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// World axis the polar angle is measured from.
///
/// Each variant fixes an `(up, axis1, axis2)` triple. The polar angle is the
/// angle from `up`; the azimuth runs from `axis1` toward `axis2`.
///
/// | Variant | up | axis1 | axis2 |
/// |---------|----|-------|-------|
/// | `X`     | +X | +Y    | +Z    |
/// | `Y`     | +Y | +X    | +Z    |
/// | `Z`     | +Z | +X    | +Y    |
///
/// `Y` is the default because the flat-world pipeline treats Y as height.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PoleAxis {
    /// Pole along world X.
    X,
    /// Pole along world Y.
    #[default]
    Y,
    /// Pole along world Z.
    Z,
}

impl PoleAxis {
    /// All conventions, in declaration order.
    pub const ALL: [PoleAxis; 3] = [PoleAxis::X, PoleAxis::Y, PoleAxis::Z];

    /// Unit vector the polar angle is measured from.
    #[inline]
    #[must_use]
    pub fn up(self) -> DVec3 {
        match self {
            Self::X => DVec3::X,
            Self::Y => DVec3::Y,
            Self::Z => DVec3::Z,
        }
    }

    /// Unit vector at azimuth zero.
    #[inline]
    #[must_use]
    pub fn axis1(self) -> DVec3 {
        match self {
            Self::X => DVec3::Y,
            Self::Y | Self::Z => DVec3::X,
        }
    }

    /// Unit vector at azimuth `π/2`.
    #[inline]
    #[must_use]
    pub fn axis2(self) -> DVec3 {
        match self {
            Self::X | Self::Y => DVec3::Z,
            Self::Z => DVec3::Y,
        }
    }

    /// Split a world vector into its `(up, axis1, axis2)` components.
    #[inline]
    #[must_use]
    pub fn decompose(self, p: DVec3) -> (f64, f64, f64) {
        match self {
            Self::X => (p.x, p.y, p.z),
            Self::Y => (p.y, p.x, p.z),
            Self::Z => (p.z, p.x, p.y),
        }
    }

    /// Inverse of [`decompose`](Self::decompose).
    #[inline]
    #[must_use]
    pub fn compose(self, up: f64, axis1: f64, axis2: f64) -> DVec3 {
        match self {
            Self::X => DVec3::new(up, axis1, axis2),
            Self::Y => DVec3::new(axis1, up, axis2),
            Self::Z => DVec3::new(axis1, axis2, up),
        }
    }
}

impl fmt::Display for PoleAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        };
        f.write_str(name)
    }
}

/// Returned when a string does not name a pole axis.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown pole axis {0:?} (expected x, y or z)")]
pub struct ParsePoleAxisError(pub String);

impl FromStr for PoleAxis {
    type Err = ParsePoleAxisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            "z" => Ok(Self::Z),
            _ => Err(ParsePoleAxisError(s.to_string())),
        }
    }
}
