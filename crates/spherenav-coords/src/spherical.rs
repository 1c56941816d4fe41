//! Spherical ↔ Cartesian conversion about the world origin.
//!
//! Inputs and outputs are `f32` to match the meshing pipeline; every
//! intermediate is computed in `f64`.

use std::f64::consts::TAU;

use glam::{DVec3, Vec3};

use crate::PoleAxis;

/// A point given as radius, polar angle and azimuth.
///
/// - `radius` is the distance from the world origin, `>= 0`.
/// - `polar` is the angle from the pole axis, in `[0, π]`.
/// - `azimuth` is the angle around the pole axis, in `[0, 2π)`.
///
/// At `radius == 0` both angles are undefined, and at the poles the azimuth
/// is undefined. Conversions report `0.0` for an undefined angle; see
/// [`is_degenerate`](Self::is_degenerate).
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct SphericalCoord {
    /// Distance from the origin.
    pub radius: f32,
    /// Angle from the pole axis in radians.
    pub polar: f32,
    /// Angle around the pole axis in radians.
    pub azimuth: f32,
}

impl SphericalCoord {
    /// Construct a coordinate as given. No normalization is applied.
    #[must_use]
    pub fn new(radius: f32, polar: f32, azimuth: f32) -> Self {
        Self {
            radius,
            polar,
            azimuth,
        }
    }

    /// Convert to a Cartesian point using the given pole axis.
    #[must_use]
    pub fn to_cartesian(self, axis: PoleAxis) -> Vec3 {
        spherical_to_dvec3(
            f64::from(self.radius),
            f64::from(self.polar),
            f64::from(self.azimuth),
            axis,
        )
        .as_vec3()
    }

    /// Convert a Cartesian point using the given pole axis.
    #[must_use]
    pub fn from_cartesian(p: Vec3, axis: PoleAxis) -> Self {
        let (radius, polar, azimuth) = dvec3_to_spherical(p.as_dvec3(), axis);
        Self {
            radius: radius as f32,
            polar: polar as f32,
            azimuth: azimuth_to_f32(azimuth),
        }
    }

    /// `true` when the radius is zero or the point lies on the pole axis.
    ///
    /// Angles of a degenerate coordinate are convention values and must not
    /// be compared.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.radius == 0.0 || self.polar <= 0.0 || self.polar >= std::f32::consts::PI
    }
}

/// Convert `(radius, polar, azimuth)` to a Cartesian point with the default
/// ([`PoleAxis::Y`]) convention:
///
/// ```text
/// x = r·sin(polar)·cos(azimuth)
/// y = r·cos(polar)
/// z = r·sin(polar)·sin(azimuth)
/// ```
///
/// Any real input is accepted; `radius == 0` maps to the origin.
#[must_use]
pub fn spherical_to_cartesian(radius: f32, polar: f32, azimuth: f32) -> Vec3 {
    SphericalCoord::new(radius, polar, azimuth).to_cartesian(PoleAxis::default())
}

/// Convert a Cartesian point to spherical form with the default
/// ([`PoleAxis::Y`]) convention.
///
/// The origin yields `(0, 0, 0)`; a point on the pole axis yields azimuth `0`.
#[must_use]
pub fn cartesian_to_spherical(p: Vec3) -> SphericalCoord {
    SphericalCoord::from_cartesian(p, PoleAxis::default())
}

pub(crate) fn spherical_to_dvec3(radius: f64, polar: f64, azimuth: f64, axis: PoleAxis) -> DVec3 {
    let (sin_p, cos_p) = polar.sin_cos();
    let (sin_a, cos_a) = azimuth.sin_cos();
    axis.compose(
        radius * cos_p,
        radius * sin_p * cos_a,
        radius * sin_p * sin_a,
    )
}

/// Returns `(radius, polar, azimuth)` with the azimuth in `[0, 2π)`.
pub(crate) fn dvec3_to_spherical(p: DVec3, axis: PoleAxis) -> (f64, f64, f64) {
    let radius = p.length();
    if radius == 0.0 {
        return (0.0, 0.0, 0.0);
    }
    let (up, a1, a2) = axis.decompose(p);
    // atan2 keeps full precision near the poles, where acos(up / r) does not.
    let polar = a1.hypot(a2).atan2(up);
    let azimuth = normalize_azimuth(a2.atan2(a1));
    (radius, polar, azimuth)
}

/// Wrap an angle into `[0, 2π)`.
#[must_use]
pub fn normalize_azimuth(azimuth: f64) -> f64 {
    let wrapped = azimuth.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU { 0.0 } else { wrapped }
}

fn azimuth_to_f32(azimuth: f64) -> f32 {
    let narrowed = azimuth as f32;
    if narrowed >= std::f32::consts::TAU {
        0.0
    } else {
        narrowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const EPSILON: f32 = 1e-5;

    fn assert_close(actual: f32, expected: f32, what: &str) {
        let tol = EPSILON * expected.abs().max(1.0);
        assert!(
            (actual - expected).abs() <= tol,
            "{what}: expected {expected}, got {actual}"
        );
    }

    fn angle_diff(a: f32, b: f32) -> f32 {
        let d = (f64::from(a) - f64::from(b)).rem_euclid(TAU);
        d.min(TAU - d) as f32
    }

    #[test]
    fn test_known_point() {
        let p = spherical_to_cartesian(10.0, 0.5, 1.0);
        assert_close(p.x, 2.590_347, "x");
        assert_close(p.y, 8.775_826, "y");
        assert_close(p.z, 4.034_227, "z");
    }

    #[test]
    fn test_zero_radius_maps_to_origin() {
        for &(polar, azimuth) in &[(0.0, 0.0), (1.2, 3.4), (PI, -2.0)] {
            assert_eq!(spherical_to_cartesian(0.0, polar, azimuth), Vec3::ZERO);
        }
    }

    #[test]
    fn test_origin_uses_convention_angles() {
        let s = cartesian_to_spherical(Vec3::ZERO);
        assert_eq!(s, SphericalCoord::new(0.0, 0.0, 0.0));
        assert!(s.is_degenerate());
    }

    #[test]
    fn test_poles() {
        let north = cartesian_to_spherical(Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(north.radius, 5.0);
        assert_eq!(north.polar, 0.0);
        assert_eq!(north.azimuth, 0.0);
        assert!(north.is_degenerate());

        let south = cartesian_to_spherical(Vec3::new(0.0, -5.0, 0.0));
        assert_eq!(south.radius, 5.0);
        assert_close(south.polar, PI, "south polar");
        assert!(south.is_degenerate());
    }

    #[test]
    fn test_equator_axes() {
        let s = cartesian_to_spherical(Vec3::new(3.0, 0.0, 0.0));
        assert_close(s.polar, FRAC_PI_2, "+X polar");
        assert_eq!(s.azimuth, 0.0);

        let s = cartesian_to_spherical(Vec3::new(0.0, 0.0, 3.0));
        assert_close(s.azimuth, FRAC_PI_2, "+Z azimuth");

        let s = cartesian_to_spherical(Vec3::new(0.0, 0.0, -3.0));
        assert_close(s.azimuth, 3.0 * FRAC_PI_2, "-Z azimuth");
        assert!(!s.is_degenerate());
    }

    #[test]
    fn test_azimuth_is_normalized() {
        for i in -20..20 {
            let azimuth = i as f32 * 0.7;
            let s = cartesian_to_spherical(spherical_to_cartesian(2.0, 1.0, azimuth));
            assert!(
                (0.0..std::f32::consts::TAU).contains(&s.azimuth),
                "azimuth {} out of range for input {azimuth}",
                s.azimuth
            );
            assert!(angle_diff(s.azimuth, azimuth) < 1e-5);
        }
    }

    #[test]
    fn test_normalize_azimuth_never_returns_tau() {
        assert_eq!(normalize_azimuth(-1e-300), 0.0);
        assert_eq!(normalize_azimuth(TAU), 0.0);
        let wrapped = normalize_azimuth(-std::f64::consts::FRAC_PI_2);
        assert!((wrapped - 1.5 * std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn test_roundtrip_grid() {
        let radii = [0.5_f32, 1.0, 10.0, 6_371.0, 250_000.0];
        for &radius in &radii {
            for pi in 1..16 {
                let polar = pi as f32 / 16.0 * PI;
                for ai in 0..24 {
                    let azimuth = ai as f32 / 24.0 * std::f32::consts::TAU;
                    let s = cartesian_to_spherical(spherical_to_cartesian(radius, polar, azimuth));
                    assert_close(s.radius, radius, "radius");
                    assert_close(s.polar, polar, "polar");
                    assert!(
                        angle_diff(s.azimuth, azimuth) < EPSILON,
                        "azimuth: expected {azimuth}, got {} (r={radius}, polar={polar})",
                        s.azimuth
                    );
                }
            }
        }
    }

    #[test]
    fn test_roundtrip_near_pole_keeps_polar_precision() {
        let polar = 1e-3_f32;
        let s = cartesian_to_spherical(spherical_to_cartesian(10.0, polar, 0.3));
        assert!(
            (s.polar - polar).abs() < 1e-8,
            "polar drifted near the pole: {}",
            s.polar
        );
    }

    #[test]
    fn test_every_axis_roundtrips() {
        for axis in PoleAxis::ALL {
            let original = SphericalCoord::new(7.0, 1.1, 4.0);
            let back = SphericalCoord::from_cartesian(original.to_cartesian(axis), axis);
            assert_close(back.radius, original.radius, "radius");
            assert_close(back.polar, original.polar, "polar");
            assert_close(back.azimuth, original.azimuth, "azimuth");
        }
    }

    #[test]
    fn test_polar_measured_from_configured_axis() {
        let p = SphericalCoord::new(1.0, 0.0, 0.0);
        assert!((p.to_cartesian(PoleAxis::X) - Vec3::X).length() < 1e-6);
        assert!((p.to_cartesian(PoleAxis::Y) - Vec3::Y).length() < 1e-6);
        assert!((p.to_cartesian(PoleAxis::Z) - Vec3::Z).length() < 1e-6);
    }
}
