//! Draw random samples from a chosen probability distribution.

// hypersphere
use crate::core::geometry::{DiscPoint, Vector3f};
use crate::core::hypersphere::{Float, TWO_PI};
use crate::core::rng::UniformDeviateSource;

/// Turn two uniform deviates into two independent standard normal
/// deviates (Box-Muller transform). *u0* must lie in (0, 1].
pub fn box_muller(u0: Float, u1: Float) -> (Float, Float) {
    let r: Float = (-2.0 as Float * u0.ln()).sqrt();
    let theta: Float = TWO_PI * u1;
    (r * theta.cos(), r * theta.sin())
}

/// Draw a pair of independent standard normal deviates.
pub fn standard_normal_pair<S: UniformDeviateSource + ?Sized>(src: &mut S) -> (Float, Float) {
    // uniform_float() is in [0, 1), flip it to (0, 1] to keep ln() finite
    let u0: Float = 1.0 as Float - src.uniform_float();
    let u1: Float = src.uniform_float();
    box_muller(u0, u1)
}

/// Cartesian direction for azimuth *theta* and polar angle *phi*
/// (measured from the +z axis).
pub fn spherical_direction(theta: Float, phi: Float) -> Vector3f {
    let sin_phi: Float = phi.sin();
    Vector3f {
        x: sin_phi * theta.cos(),
        y: sin_phi * theta.sin(),
        z: phi.cos(),
    }
}

/// The point of the projection disc whose preimage has height *z*
/// and azimuth *theta*. Uniform *z* gives points uniform in area.
pub fn disc_point_at_height(z: Float, theta: Float) -> DiscPoint {
    let r: Float = (2.0 as Float * (1.0 as Float + z)).max(0.0 as Float).sqrt();
    DiscPoint {
        x: r * theta.cos(),
        y: r * theta.sin(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::rng::Rng;

    #[test]
    fn normal_moments() {
        let mut rng = Rng::with_seed(3);
        let n: usize = 50_000;
        let mut sum: Float = 0.0;
        let mut sum_sq: Float = 0.0;
        for _ in 0..n {
            let (a, b) = standard_normal_pair(&mut rng);
            sum += a + b;
            sum_sq += a * a + b * b;
        }
        let mean = sum / (2 * n) as Float;
        let variance = sum_sq / (2 * n) as Float - mean * mean;
        assert!(mean.abs() < 0.02, "mean {}", mean);
        assert!((variance - 1.0).abs() < 0.03, "variance {}", variance);
    }

    #[test]
    fn box_muller_is_finite_at_the_edge() {
        let (a, b) = box_muller(1.0, 0.0);
        assert_eq!(a, 0.0);
        assert_eq!(b, 0.0);
        let (a, b) = box_muller(Float::MIN_POSITIVE, 0.25);
        assert!(a.is_finite() && b.is_finite());
    }

    #[test]
    fn poles_of_spherical_direction() {
        let north = spherical_direction(1.3, 0.0);
        assert!((north.z - 1.0).abs() < 1.0e-15);
        let equator = spherical_direction(0.0, std::f64::consts::FRAC_PI_2);
        assert!((equator.x - 1.0).abs() < 1.0e-15);
        assert!(equator.z.abs() < 1.0e-15);
    }

    #[test]
    fn disc_radius_covers_heights() {
        assert_eq!(disc_point_at_height(-1.0, 0.4).radius(), 0.0);
        assert!((disc_point_at_height(1.0, 0.0).x - 2.0).abs() < 1.0e-15);
    }
}
