//! Gnomonic projection onto the plane tangent to a sphere at a reference point.
//!
//! A sample `P` is pushed along the ray from the sphere center until it hits
//! the tangent plane at the reference point `R`, then expressed in the plane's
//! local `(e_u, e_v)` basis. The inverse walks the plane point back along the
//! same ray to the sphere of radius `|R|`.
//!
//! Planar distance from the frame origin is `|R|·tan(angle)`, so distortion
//! grows monotonically with angular distance from `R` and the mapping is only
//! defined on the hemisphere facing `R`.

use glam::{DVec3, Vec2, Vec3};

use crate::{PoleAxis, ProjectionError};

/// Squared length below which a candidate `e_u` is treated as parallel to the normal.
const PARALLEL_EPSILON_SQ: f64 = 1e-12;

/// A 2D coordinate in the tangent plane of one reference point.
///
/// Only meaningful together with the [`TangentFrame`] that produced it; never
/// compare planar points from different reference points.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PlanarPoint {
    /// Offset along the frame's `e_u` (toward the pole).
    pub u: f32,
    /// Offset along the frame's `e_v`.
    pub v: f32,
}

impl PlanarPoint {
    /// The frame origin, i.e. the reference point itself.
    pub const ZERO: Self = Self { u: 0.0, v: 0.0 };

    /// Construct a planar point.
    #[must_use]
    pub const fn new(u: f32, v: f32) -> Self {
        Self { u, v }
    }

    /// Distance from the frame origin.
    #[must_use]
    pub fn length(self) -> f32 {
        Vec2::from(self).length()
    }
}

impl From<PlanarPoint> for Vec2 {
    fn from(p: PlanarPoint) -> Self {
        Vec2::new(p.u, p.v)
    }
}

impl From<Vec2> for PlanarPoint {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

/// Orthonormal frame `(e_u, e_v, n)` at a validated reference point.
///
/// `n` is the outward unit normal. `e_u` is the pole axis projected into the
/// tangent plane; when the reference sits on the pole axis the convention's
/// `axis1` is projected instead. `e_v = n × e_u`.
///
/// Building a frame is cheap and allocation-free; a patch should build one
/// and reuse it for every sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TangentFrame {
    origin: DVec3,
    normal: DVec3,
    e_u: DVec3,
    e_v: DVec3,
    radius: f64,
    /// `dot(origin, normal)`, the plane's distance from the sphere center.
    plane_offset: f64,
}

impl TangentFrame {
    /// Build a frame with the default pole axis.
    pub fn new(reference: Vec3) -> Result<Self, ProjectionError> {
        Self::with_pole_axis(reference, PoleAxis::default())
    }

    /// Build a frame whose `e_u` follows the given pole axis.
    pub fn with_pole_axis(reference: Vec3, axis: PoleAxis) -> Result<Self, ProjectionError> {
        let invalid = ProjectionError::InvalidReference {
            x: reference.x,
            y: reference.y,
            z: reference.z,
        };
        if !reference.is_finite() {
            return Err(invalid);
        }

        let origin = reference.as_dvec3();
        let radius = origin.length();
        if radius == 0.0 {
            return Err(invalid);
        }

        let normal = origin / radius;
        let e_u = tangent_component(axis.up(), normal)
            .or_else(|| tangent_component(axis.axis1(), normal))
            .unwrap_or_else(|| axis.axis1());
        let e_v = normal.cross(e_u);

        Ok(Self {
            origin,
            normal,
            e_u,
            e_v,
            radius,
            plane_offset: origin.dot(normal),
        })
    }

    /// The reference point.
    #[must_use]
    pub fn origin(&self) -> Vec3 {
        self.origin.as_vec3()
    }

    /// Outward unit normal at the reference point.
    #[must_use]
    pub fn normal(&self) -> Vec3 {
        self.normal.as_vec3()
    }

    /// In-plane basis `(e_u, e_v)`.
    #[must_use]
    pub fn basis(&self) -> (Vec3, Vec3) {
        (self.e_u.as_vec3(), self.e_v.as_vec3())
    }

    /// Distance of the reference point from the sphere center.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.radius as f32
    }

    /// Angle in radians between the reference direction and `p`.
    #[must_use]
    pub fn angular_distance_to(&self, p: Vec3) -> f32 {
        angle_between(self.normal, p.as_dvec3()) as f32
    }

    /// Project a sphere point into this frame's tangent plane.
    ///
    /// Fails with [`ProjectionError::HemisphereViolation`] when the point is
    /// 90° or more from the reference, or so close to the horizon that its
    /// planar coordinate does not fit in an `f32`.
    pub fn project(&self, sphere_point: Vec3) -> Result<PlanarPoint, ProjectionError> {
        let (u, v) = self.project_f64(sphere_point.as_dvec3())?;
        Ok(PlanarPoint::new(u as f32, v as f32))
    }

    /// Map a planar point back onto the sphere of the reference radius.
    ///
    /// Any finite planar point is accepted; points beyond the patch that
    /// produced them extrapolate the plane with growing distortion.
    pub fn unproject(&self, planar: PlanarPoint) -> Result<Vec3, ProjectionError> {
        let dir = self.unproject_direction(f64::from(planar.u), f64::from(planar.v))?;
        Ok((dir * self.radius).as_vec3())
    }

    pub(crate) fn project_f64(&self, p: DVec3) -> Result<(f64, f64), ProjectionError> {
        if !p.is_finite() {
            return Err(ProjectionError::NonFinite);
        }
        let dot = p.dot(self.normal);
        if dot <= 0.0 {
            return Err(ProjectionError::HemisphereViolation { dot });
        }
        let t = self.plane_offset / dot;
        let offset = p * t - self.origin;
        let (u, v) = (offset.dot(self.e_u), offset.dot(self.e_v));
        // Near the horizon the plane point runs off to infinity once narrowed.
        if !(u as f32).is_finite() || !(v as f32).is_finite() {
            return Err(ProjectionError::HemisphereViolation { dot });
        }
        Ok((u, v))
    }

    /// Unit direction from the sphere center through the plane point `(u, v)`.
    pub(crate) fn unproject_direction(&self, u: f64, v: f64) -> Result<DVec3, ProjectionError> {
        if !u.is_finite() || !v.is_finite() {
            return Err(ProjectionError::NonFinite);
        }
        let on_plane = self.origin + u * self.e_u + v * self.e_v;
        // The plane never passes through the center, so the length is at least `radius`.
        Ok(on_plane / on_plane.length())
    }

    pub(crate) fn angular_distance_f64(&self, p: DVec3) -> f64 {
        angle_between(self.normal, p)
    }

    pub(crate) fn radius_f64(&self) -> f64 {
        self.radius
    }
}

/// Project `sphere_point` onto the plane tangent at `reference_point`.
///
/// Builds a [`TangentFrame`] with the default pole axis for this call only.
/// `sphere_to_planar(r, r)` is always `(0, 0)`.
pub fn sphere_to_planar(
    sphere_point: Vec3,
    reference_point: Vec3,
) -> Result<PlanarPoint, ProjectionError> {
    TangentFrame::new(reference_point)?.project(sphere_point)
}

/// Inverse of [`sphere_to_planar`]: place a planar point back on the sphere
/// of radius `|reference_point|`.
pub fn planar_to_sphere(
    planar_point: PlanarPoint,
    reference_point: Vec3,
) -> Result<Vec3, ProjectionError> {
    TangentFrame::new(reference_point)?.unproject(planar_point)
}

/// Angle in radians between the directions of `a` and `b`.
///
/// Returns `0` when either vector is zero.
#[must_use]
pub fn angular_distance(a: Vec3, b: Vec3) -> f32 {
    angle_between(a.as_dvec3(), b.as_dvec3()) as f32
}

fn angle_between(a: DVec3, b: DVec3) -> f64 {
    a.cross(b).length().atan2(a.dot(b))
}

/// Normalized component of `axis` orthogonal to `normal`, if it is not degenerate.
fn tangent_component(axis: DVec3, normal: DVec3) -> Option<DVec3> {
    let projected = axis - normal * normal.dot(axis);
    let len_sq = projected.length_squared();
    (len_sq > PARALLEL_EPSILON_SQ).then(|| projected / len_sq.sqrt())
}
