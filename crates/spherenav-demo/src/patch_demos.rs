//! Demonstrations of the converter, the projector, and a full patch pass.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use spherenav_config::Config;
use spherenav_coords::{
    CoordinateSpace, PlanarPoint, ProjectionError, SphericalCoord, cartesian_to_spherical,
    planar_to_sphere, sphere_to_planar, spherical_to_cartesian,
};
use tracing::{info, warn};

/// Result of pushing one patch through the flat-space round trip.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PatchReport {
    pub sample_count: usize,
    /// Lower corner of the flat heightfield bounds.
    pub flat_min: Vec3,
    /// Upper corner of the flat heightfield bounds.
    pub flat_max: Vec3,
    /// Largest world-space distance between a sample and its round trip.
    pub max_roundtrip_error: f32,
}

/// Converts a spherical triple to Cartesian space and back.
pub(crate) fn demonstrate_conversion() {
    info!("Starting spherical/Cartesian conversion demonstration");

    let (radius, polar, azimuth) = (10.0, 0.5, 1.0);
    let cartesian = spherical_to_cartesian(radius, polar, azimuth);
    info!("Spherical (r={radius}, polar={polar}, azimuth={azimuth}) -> Cartesian {cartesian:?}");

    let back = cartesian_to_spherical(cartesian);
    info!(
        "Cartesian back to spherical: r={}, polar={}, azimuth={}",
        back.radius, back.polar, back.azimuth
    );
}

/// Projects a sample into a tangent plane and back.
pub(crate) fn demonstrate_projection() {
    info!("Starting tangent-plane projection demonstration");

    let sphere_point = Vec3::new(5.0, 3.0, 2.0);
    let reference_point = Vec3::new(1.0, 2.0, 3.0);

    let planar = match sphere_to_planar(sphere_point, reference_point) {
        Ok(planar) => planar,
        Err(e) => {
            warn!("Projection failed: {e}");
            return;
        }
    };
    info!(
        "Sample {sphere_point:?} relative to {reference_point:?} -> planar ({}, {})",
        planar.u, planar.v
    );

    match planar_to_sphere(planar, reference_point) {
        Ok(back) => info!(
            "Planar back to sphere: {back:?} (|back| = {}, |reference| = {})",
            back.length(),
            reference_point.length()
        ),
        Err(e) => warn!("Inverse projection failed: {e}"),
    }
}

/// Shows the two failure signals a patch partitioner has to react to.
pub(crate) fn demonstrate_projection_failures() {
    let reference = Vec3::new(0.0, 0.0, 10.0);
    if let Err(e) = sphere_to_planar(Vec3::new(0.0, 0.0, -10.0), reference) {
        info!("Far-hemisphere sample rejected: {e}");
    }
    if let Err(e) = planar_to_sphere(PlanarPoint::ZERO, Vec3::ZERO) {
        info!("Origin reference rejected: {e}");
    }
}

/// Samples a random terrain patch, flattens it, and places it back.
///
/// The flat bounds are what a heightfield stage would be sized from; the
/// round trip stands in for placing the flat pipeline's output vertices.
pub(crate) fn run_patch_pass(config: &Config) -> Result<PatchReport, ProjectionError> {
    info!("Starting patch pass");

    let radius = config.world.radius as f32;
    let reference = SphericalCoord::new(radius, 1.0, 0.5).to_cartesian(config.world.pole_axis);
    let space = config.tangent_space(reference)?;

    let frame = space.frame();
    let n = frame.normal();
    let (e_u, e_v) = frame.basis();
    let max_angle = config.patch.max_angle_rad();

    let mut rng = Xoshiro256StarStar::seed_from_u64(42);
    let edge = config.patch.samples_per_edge as usize;
    let samples: Vec<Vec3> = (0..edge * edge)
        .map(|_| {
            // Stay inside the patch limit; sqrt keeps the density uniform over the cap.
            let angle = max_angle * 0.95 * rng.gen_range(0.0_f32..1.0).sqrt();
            let heading = rng.gen_range(0.0..std::f32::consts::TAU);
            let altitude = rng.gen_range(-5.0_f32..20.0);
            let dir = n * angle.cos() + (e_u * heading.cos() + e_v * heading.sin()) * angle.sin();
            dir * (radius + altitude)
        })
        .collect();

    let mut flat = Vec::new();
    space.to_flat_batch(&samples, &mut flat)?;

    let (flat_min, flat_max) = flat.iter().fold(
        (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
        |(lo, hi), &p| (lo.min(p), hi.max(p)),
    );
    info!("Flat heightfield bounds: {flat_min:?}..{flat_max:?}");

    let mut placed = Vec::new();
    space.to_world_batch(&flat, &mut placed)?;
    let max_roundtrip_error = placed
        .iter()
        .zip(&samples)
        .map(|(a, b)| (*a - *b).length())
        .fold(0.0_f32, f32::max);

    let mut corners = [
        Vec3::new(flat_min.x, 0.0, flat_min.z),
        Vec3::new(flat_max.x, 0.0, flat_min.z),
        Vec3::new(flat_max.x, 0.0, flat_max.z),
        Vec3::new(flat_min.x, 0.0, flat_max.z),
    ];
    space.to_world_in_place(&mut corners)?;
    info!("Patch corners on the sphere: {corners:?}");

    Ok(PatchReport {
        sample_count: samples.len(),
        flat_min,
        flat_max,
        max_roundtrip_error,
    })
}
