//! Coordinate-space adapters handed to flat-world pipeline stages.
//!
//! A mesh builder takes a `&dyn CoordinateSpace` instead of a "spherical"
//! flag: it feeds every input sample through [`CoordinateSpace::to_flat`],
//! runs unchanged, and places every output vertex with
//! [`CoordinateSpace::to_world`].

use glam::Vec3;
use tracing::debug;

use crate::{PlanarPoint, PoleAxis, ProjectionError, TangentFrame};

/// Project/unproject contract between world space and a flat, Y-up working space.
pub trait CoordinateSpace: Send + Sync {
    /// Map a world-space point into flat space.
    fn to_flat(&self, world: Vec3) -> Result<Vec3, ProjectionError>;

    /// Map a flat-space point back into world space.
    fn to_world(&self, flat: Vec3) -> Result<Vec3, ProjectionError>;

    /// Map a slice of world points into `out`, stopping at the first failure.
    ///
    /// `out` is cleared first. On error it holds the points converted so far.
    fn to_flat_batch(&self, points: &[Vec3], out: &mut Vec<Vec3>) -> Result<(), ProjectionError> {
        out.clear();
        out.reserve(points.len());
        for (index, &point) in points.iter().enumerate() {
            match self.to_flat(point) {
                Ok(flat) => out.push(flat),
                Err(e) => {
                    debug!(index, error = %e, "sample rejected by coordinate space");
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    /// Map a slice of flat points into `out`, stopping at the first failure.
    fn to_world_batch(&self, points: &[Vec3], out: &mut Vec<Vec3>) -> Result<(), ProjectionError> {
        out.clear();
        out.reserve(points.len());
        for (index, &point) in points.iter().enumerate() {
            match self.to_world(point) {
                Ok(world) => out.push(world),
                Err(e) => {
                    debug!(index, error = %e, "vertex could not be placed in world space");
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    /// Replace every flat vertex with its world position.
    ///
    /// Vertices before the failing one are already converted when this returns `Err`.
    fn to_world_in_place(&self, vertices: &mut [Vec3]) -> Result<(), ProjectionError> {
        for vertex in vertices.iter_mut() {
            *vertex = self.to_world(*vertex)?;
        }
        Ok(())
    }
}

/// Identity space for worlds that are already flat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlatSpace;

impl CoordinateSpace for FlatSpace {
    #[inline]
    fn to_flat(&self, world: Vec3) -> Result<Vec3, ProjectionError> {
        Ok(world)
    }

    #[inline]
    fn to_world(&self, flat: Vec3) -> Result<Vec3, ProjectionError> {
        Ok(flat)
    }
}

/// Flat space around one patch of a sphere centered at the world origin.
///
/// Flat coordinates are laid out as `(u, altitude, -v)`:
/// - `u`, `v` are the gnomonic tangent-plane coordinates of the sample's
///   direction (see [`TangentFrame`]);
/// - `altitude` is the sample's distance from the center minus the reference
///   radius, so terrain heights become heightfield heights.
///
/// Negating `v` keeps the flat axes right-handed, so polygon winding survives
/// the round trip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TangentPlaneSpace {
    frame: TangentFrame,
    max_angle: Option<f64>,
}

impl TangentPlaneSpace {
    /// Build a space anchored at `reference` with the default pole axis.
    pub fn new(reference: Vec3) -> Result<Self, ProjectionError> {
        Self::with_pole_axis(reference, PoleAxis::default())
    }

    /// Build a space anchored at `reference` using the given pole axis.
    pub fn with_pole_axis(reference: Vec3, axis: PoleAxis) -> Result<Self, ProjectionError> {
        let frame = TangentFrame::with_pole_axis(reference, axis)?;
        debug!(
            ?reference,
            radius = frame.radius(),
            %axis,
            "built tangent-plane space"
        );
        Ok(Self {
            frame,
            max_angle: None,
        })
    }

    /// Reject samples more than `max_angle` radians from the reference with
    /// [`ProjectionError::OutsidePatch`].
    #[must_use]
    pub fn with_max_angle(mut self, max_angle: f32) -> Self {
        self.max_angle = Some(f64::from(max_angle));
        self
    }

    /// The underlying tangent frame.
    #[must_use]
    pub fn frame(&self) -> &TangentFrame {
        &self.frame
    }

    /// Patch half-angle in radians, if one is set.
    #[must_use]
    pub fn max_angle(&self) -> Option<f32> {
        self.max_angle.map(|a| a as f32)
    }

    /// Planar coordinate of a sample, honoring the patch limit.
    pub fn project(&self, world: Vec3) -> Result<PlanarPoint, ProjectionError> {
        let (u, v) = self.checked_project(world)?;
        Ok(PlanarPoint::new(u as f32, v as f32))
    }

    fn checked_project(&self, world: Vec3) -> Result<(f64, f64), ProjectionError> {
        let p = world.as_dvec3();
        let planar = self.frame.project_f64(p)?;
        if let Some(limit) = self.max_angle {
            let angle = self.frame.angular_distance_f64(p);
            if angle > limit {
                return Err(ProjectionError::OutsidePatch { angle, limit });
            }
        }
        Ok(planar)
    }
}

impl CoordinateSpace for TangentPlaneSpace {
    fn to_flat(&self, world: Vec3) -> Result<Vec3, ProjectionError> {
        let (u, v) = self.checked_project(world)?;
        let altitude = world.as_dvec3().length() - self.frame.radius_f64();
        Ok(Vec3::new(u as f32, altitude as f32, -v as f32))
    }

    fn to_world(&self, flat: Vec3) -> Result<Vec3, ProjectionError> {
        if !flat.y.is_finite() {
            return Err(ProjectionError::NonFinite);
        }
        let dir = self
            .frame
            .unproject_direction(f64::from(flat.x), -f64::from(flat.z))?;
        let radius = self.frame.radius_f64();
        let altitude = f64::from(flat.y);
        let distance = radius + altitude;
        if distance < 0.0 {
            return Err(ProjectionError::BelowCenter { altitude, radius });
        }
        Ok((dir * distance).as_vec3())
    }
}
