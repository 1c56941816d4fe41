//! Randomized checks of the converter and projector contracts.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use spherenav_coords::{
    CoordinateSpace, PlanarPoint, ProjectionError, TangentFrame, TangentPlaneSpace,
    angular_distance, cartesian_to_spherical, planar_to_sphere, sphere_to_planar,
    spherical_to_cartesian,
};

const REL_TOL: f32 = 1e-5;
const SAMPLES: usize = 2_000;

fn close(actual: f32, expected: f32) -> bool {
    (actual - expected).abs() <= REL_TOL * expected.abs().max(1.0)
}

fn angle_diff(a: f32, b: f32) -> f32 {
    let d = (a - b).rem_euclid(TAU);
    d.min(TAU - d)
}

fn random_direction(rng: &mut Xoshiro256StarStar) -> Vec3 {
    let polar = rng.gen_range(-1.0_f32..1.0).acos();
    let azimuth = rng.gen_range(0.0..TAU);
    spherical_to_cartesian(1.0, polar, azimuth)
}

#[test]
fn converter_roundtrip_within_tolerance() {
    let mut rng = Xoshiro256StarStar::seed_from_u64(7);
    for _ in 0..SAMPLES {
        let radius = rng.gen_range(0.0_f32..100_000.0);
        let polar = rng.gen_range(0.0_f32..PI);
        let azimuth = rng.gen_range(0.0_f32..TAU);

        let s = cartesian_to_spherical(spherical_to_cartesian(radius, polar, azimuth));

        assert!(close(s.radius, radius), "radius {radius} -> {}", s.radius);
        if s.radius == 0.0 {
            continue;
        }
        assert!(
            close(s.polar, polar),
            "polar {polar} -> {} (r={radius})",
            s.polar
        );
        if !s.is_degenerate() {
            assert!(
                angle_diff(s.azimuth, azimuth) <= REL_TOL * TAU,
                "azimuth {azimuth} -> {} (r={radius}, polar={polar})",
                s.azimuth
            );
        }
    }
}

#[test]
fn projector_roundtrip_is_collinear_at_reference_radius() {
    let mut rng = Xoshiro256StarStar::seed_from_u64(11);
    let mut checked = 0;
    while checked < SAMPLES {
        let reference = random_direction(&mut rng) * rng.gen_range(1.0_f32..10_000.0);
        let sample = random_direction(&mut rng) * rng.gen_range(0.5_f32..20_000.0);
        if angular_distance(reference, sample) > 85.0_f32.to_radians() {
            continue;
        }

        let planar = sphere_to_planar(sample, reference).unwrap();
        let back = planar_to_sphere(planar, reference).unwrap();

        let radius = reference.length();
        assert!(
            close(back.length(), radius),
            "magnitude {} != {radius}",
            back.length()
        );
        let alignment = back.normalize().dot(sample.normalize());
        assert!(
            alignment > 1.0 - REL_TOL,
            "{back:?} is not on the ray through {sample:?}"
        );
        checked += 1;
    }
}

#[test]
fn reference_always_projects_to_origin() {
    let mut rng = Xoshiro256StarStar::seed_from_u64(13);
    for _ in 0..SAMPLES {
        let reference = random_direction(&mut rng) * rng.gen_range(0.01_f32..1e6);
        assert_eq!(
            sphere_to_planar(reference, reference).unwrap(),
            PlanarPoint::ZERO
        );
    }
}

#[test]
fn planar_magnitude_grows_with_angular_distance() {
    let mut rng = Xoshiro256StarStar::seed_from_u64(17);
    for _ in 0..100 {
        let reference = random_direction(&mut rng) * 1_000.0;
        let frame = TangentFrame::new(reference).unwrap();
        let n = frame.normal();
        let (e_u, e_v) = frame.basis();
        let heading = rng.gen_range(0.0_f32..TAU);
        let along = e_u * heading.cos() + e_v * heading.sin();

        let mut previous = f32::NEG_INFINITY;
        for step in 0..40 {
            let angle = step as f32 * 0.0375;
            let sample = (n * angle.cos() + along * angle.sin()) * 1_000.0;
            let magnitude = frame.project(sample).unwrap().length();
            assert!(
                magnitude > previous,
                "magnitude {magnitude} did not grow past {previous} at angle {angle}"
            );
            previous = magnitude;
        }
    }
}

#[test]
fn far_hemisphere_always_fails() {
    let mut rng = Xoshiro256StarStar::seed_from_u64(19);
    for _ in 0..SAMPLES {
        let reference = random_direction(&mut rng) * 10.0;
        let sample = random_direction(&mut rng) * 10.0;
        let result = sphere_to_planar(sample, reference);
        if sample.as_dvec3().dot(reference.as_dvec3()) <= 0.0 {
            assert!(
                matches!(result, Err(ProjectionError::HemisphereViolation { .. })),
                "expected hemisphere violation for {sample:?} vs {reference:?}, got {result:?}"
            );
        }
        if let Ok(planar) = result {
            assert!(planar.u.is_finite() && planar.v.is_finite());
        }
    }
}

#[test]
fn documented_examples() {
    let p = spherical_to_cartesian(10.0, 0.5, 1.0);
    assert!((p - Vec3::new(2.590_347, 8.775_826, 4.034_227)).length() < 1e-4, "{p:?}");

    let result = sphere_to_planar(Vec3::new(0.0, 0.0, -10.0), Vec3::new(0.0, 0.0, 10.0));
    assert!(matches!(
        result,
        Err(ProjectionError::HemisphereViolation { .. })
    ));

    let result = sphere_to_planar(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO);
    assert!(matches!(
        result,
        Err(ProjectionError::InvalidReference { .. })
    ));
}

#[test]
fn patches_project_concurrently() {
    let references: Vec<Vec3> = (0..8)
        .map(|i| spherical_to_cartesian(2_000.0, 0.3 + i as f32 * 0.3, i as f32 * 0.8))
        .collect();

    std::thread::scope(|scope| {
        for &reference in &references {
            scope.spawn(move || {
                let space = TangentPlaneSpace::new(reference).unwrap();
                let samples: Vec<Vec3> = (0..64)
                    .map(|k| {
                        let offset = Vec3::new(k as f32 * 0.5, (k % 7) as f32, -(k as f32) * 0.25);
                        (reference + offset).normalize() * (2_000.0 + (k % 5) as f32)
                    })
                    .collect();

                let mut flat = Vec::new();
                space.to_flat_batch(&samples, &mut flat).unwrap();
                let mut world = Vec::new();
                space.to_world_batch(&flat, &mut world).unwrap();

                for (a, b) in world.iter().zip(&samples) {
                    assert!((*a - *b).length() < 2_000.0 * REL_TOL);
                }
            });
        }
    });
}
