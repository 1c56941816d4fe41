//! Spherical-world coordinate transforms for flat-world navmesh generation.
//!
//! Two pure components:
//! - **Converter**: [`spherical_to_cartesian`] / [`cartesian_to_spherical`]
//!   between `(radius, polar, azimuth)` and world-space points.
//! - **Projector**: [`sphere_to_planar`] / [`planar_to_sphere`], a gnomonic
//!   projection onto the plane tangent at a per-patch reference point.
//!
//! [`CoordinateSpace`] packages the projector as a strategy a flat-world mesh
//! builder can consume without knowing the world is curved.
//!
//! All types are small `Copy` values; every function is stateless and safe to
//! call from any number of threads.

mod error;
mod pole_axis;
mod space;
mod spherical;
mod tangent_plane;

pub use error::ProjectionError;
pub use pole_axis::{ParsePoleAxisError, PoleAxis};
pub use space::{CoordinateSpace, FlatSpace, TangentPlaneSpace};
pub use spherical::{
    SphericalCoord, cartesian_to_spherical, normalize_azimuth, spherical_to_cartesian,
};
pub use tangent_plane::{
    PlanarPoint, TangentFrame, angular_distance, planar_to_sphere, sphere_to_planar,
};
