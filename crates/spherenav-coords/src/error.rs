//! Projection error types.

/// Errors surfaced by the tangent-plane projector and the coordinate-space adapters.
///
/// Each variant signals a patch-partitioning problem on the caller's side;
/// nothing here is retried or clamped.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ProjectionError {
    /// The reference point is at the sphere center or not finite, so no
    /// tangent frame exists.
    #[error("invalid reference point ({x}, {y}, {z}): no tangent frame")]
    InvalidReference {
        /// Reference X.
        x: f32,
        /// Reference Y.
        y: f32,
        /// Reference Z.
        z: f32,
    },

    /// The sample lies on or behind the tangent plane's horizon, or so close
    /// to it that its planar coordinate overflows.
    #[error("sample is outside the reference hemisphere (dot = {dot})")]
    HemisphereViolation {
        /// `dot(sample, normal)`; `<= 0` unless the sample grazes the horizon.
        dot: f64,
    },

    /// A sample or planar input contains NaN or infinity.
    #[error("non-finite input coordinate")]
    NonFinite,

    /// The sample is farther from the reference than the patch allows.
    #[error("sample is {angle:.6} rad from the reference, patch limit is {limit:.6} rad")]
    OutsidePatch {
        /// Angular distance of the sample in radians.
        angle: f64,
        /// Configured patch half-angle in radians.
        limit: f64,
    },

    /// A flat vertex sits deeper than the sphere center, so it has no world
    /// position on its own ray.
    #[error("altitude {altitude} is below the sphere center (radius {radius})")]
    BelowCenter {
        /// Flat-space height of the vertex.
        altitude: f64,
        /// Radius of the reference point.
        radius: f64,
    },
}
