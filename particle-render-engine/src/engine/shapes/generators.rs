use bevy::math::{Vec2, Vec3};
use rand::Rng;
use std::f64::consts::PI;

/// Uniform sample in `[-half, half)`. Yields zero when the half-width is not
/// positive or the full range does not fit in an `f32`.
pub fn symmetric<R: Rng>(rng: &mut R, half: f32) -> f32 {
    if half > 0.0 && (half + half).is_finite() {
        rng.random_range(-half..half)
    } else {
        0.0
    }
}

/// `n` points uniformly inside an axis-aligned box centred at the origin.
pub fn scatter_box<R: Rng>(rng: &mut R, half_extents: Vec3, n: usize) -> Vec<Vec3> {
    (0..n)
        .map(|_| {
            Vec3::new(
                symmetric(rng, half_extents.x),
                symmetric(rng, half_extents.y),
                symmetric(rng, half_extents.z),
            )
        })
        .collect()
}

/// Golden-spiral lattice on a sphere surface. Deterministic; spherical angles
/// are evaluated in f64 so every point keeps the radius to f32 precision.
pub fn fibonacci_sphere(radius: f32, n: usize) -> Vec<Vec3> {
    let count = n as f64;
    let radius = radius as f64;
    let winding = (count * PI).sqrt();

    (0..n)
        .map(|i| {
            let phi = (-1.0 + (2.0 * i as f64) / count).acos();
            let theta = winding * phi;
            Vec3::new(
                (radius * theta.cos() * phi.sin()) as f32,
                (radius * theta.sin() * phi.sin()) as f32,
                (radius * phi.cos()) as f32,
            )
        })
        .collect()
}

/// Unscaled heart curve at parameter `t` (radians).
pub fn heart_point(t: f32) -> Vec2 {
    Vec2::new(
        16.0 * t.sin().powi(3),
        13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos(),
    )
}

/// Heart outline with planar jitter and depth spread to give it volume.
pub fn heart_curve<R: Rng>(
    rng: &mut R,
    scale: f32,
    jitter: f32,
    depth: f32,
    n: usize,
) -> Vec<Vec3> {
    (0..n)
        .map(|i| {
            let t = (i as f32 / n as f32) * std::f32::consts::TAU;
            let base = heart_point(t) * scale;
            Vec3::new(
                base.x + symmetric(rng, jitter),
                base.y + symmetric(rng, jitter),
                symmetric(rng, depth),
            )
        })
        .collect()
}

/// Distribute `n` slots over sampled 2D text points, cycling through them.
/// Callers must pass a non-empty `samples` slice.
pub fn text_cloud<R: Rng>(
    rng: &mut R,
    samples: &[Vec2],
    scale: f32,
    jitter: f32,
    depth: f32,
    n: usize,
) -> Vec<Vec3> {
    debug_assert!(!samples.is_empty());

    samples
        .iter()
        .cycle()
        .take(n)
        .map(|p| {
            Vec3::new(
                p.x * scale + symmetric(rng, jitter),
                p.y * scale + symmetric(rng, jitter),
                symmetric(rng, depth),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_sphere_points_on_radius() {
        for n in [1, 2, 7, 100, 35_000] {
            let points = fibonacci_sphere(220.0, n);
            assert_eq!(points.len(), n);
            for p in points {
                assert!((p.length() - 220.0).abs() < 1e-3, "n={n} |p|={}", p.length());
            }
        }
    }

    #[test]
    fn test_sphere_is_deterministic() {
        assert_eq!(fibonacci_sphere(220.0, 500), fibonacci_sphere(220.0, 500));
    }

    #[test]
    fn test_heart_without_jitter_traces_curve() {
        let mut rng = StdRng::seed_from_u64(7);
        let n = 1000;
        let points = heart_curve(&mut rng, 15.0, 0.0, 0.0, n);

        for (i, p) in points.iter().enumerate() {
            let t = (i as f32 / n as f32) * std::f32::consts::TAU;
            let expected = heart_point(t) * 15.0;
            assert_eq!(p.truncate(), expected);
            assert_eq!(p.z, 0.0);
        }

        // Top cusp of the heart at t = 0.
        assert!((points[0].x).abs() < 1e-6);
        assert!((points[0].y - 75.0).abs() < 1e-4);

        let again = heart_curve(&mut rng, 15.0, 0.0, 0.0, n);
        assert_eq!(points, again);
    }

    #[test]
    fn test_heart_jitter_bounded() {
        let mut rng = StdRng::seed_from_u64(11);
        let n = 2000;
        let points = heart_curve(&mut rng, 15.0, 10.0, 20.0, n);
        for (i, p) in points.iter().enumerate() {
            let t = (i as f32 / n as f32) * std::f32::consts::TAU;
            let base = heart_point(t) * 15.0;
            assert!((p.x - base.x).abs() <= 10.0 + 1e-3);
            assert!((p.y - base.y).abs() <= 10.0 + 1e-3);
            assert!(p.z.abs() <= 20.0);
        }
    }

    #[test]
    fn test_scatter_box_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        let half = Vec3::new(600.0, 500.0, 500.0);
        let points = scatter_box(&mut rng, half, 5000);
        assert_eq!(points.len(), 5000);
        assert!(points.iter().all(|p| p.abs().cmple(half).all()));
    }

    #[test]
    fn test_text_cloud_cycles_samples() {
        let mut rng = StdRng::seed_from_u64(5);
        let samples = [Vec2::new(10.0, 0.0), Vec2::new(-10.0, 20.0)];
        let points = text_cloud(&mut rng, &samples, 1.5, 0.0, 0.0, 5);
        assert_eq!(points.len(), 5);
        assert_eq!(points[0], Vec3::new(15.0, 0.0, 0.0));
        assert_eq!(points[1], Vec3::new(-15.0, 30.0, 0.0));
        assert_eq!(points[4], points[0]);
    }

    #[test]
    fn test_degenerate_amplitude_is_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(symmetric(&mut rng, 0.0), 0.0);
        assert_eq!(symmetric(&mut rng, -3.0), 0.0);
        assert_eq!(symmetric(&mut rng, f32::NAN), 0.0);
        assert_eq!(symmetric(&mut rng, f32::INFINITY), 0.0);
        assert_eq!(symmetric(&mut rng, f32::MAX), 0.0);
    }
}
