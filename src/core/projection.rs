//! Lambert azimuthal equal-area projection of the unit 2-sphere onto
//! the disc of radius 2.
//!
//! The projection is centered on the south pole: (0, 0, -1) maps to
//! the origin of the disc, the equator to the circle of radius √2 and
//! the removed north pole (0, 0, 1) to the whole boundary circle of
//! radius 2. With X² + Y² = 2 (1 + z) the area element of the sphere
//! equals the area element of the disc, so equal counts per disc cell
//! mean equal density on the sphere. Angles are *not* preserved; a
//! conformal map such as the stereographic projection would distort
//! the density and is deliberately not offered here.

// std
use std::convert::TryFrom;
// others
use rayon::prelude::*;
// hypersphere
use crate::core::error::{Error, Result};
use crate::core::geometry::{DiscPoint, PointCloud, Vector3f, VectorN};
use crate::core::hypersphere::{Float, DEFAULT_TOLERANCE, DISC_RADIUS};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EqualAreaProjection {
    /// Points with 1 - z at or below this value count as the pole;
    /// disc points may exceed radius 2 by this much.
    pub tolerance: Float,
}

impl Default for EqualAreaProjection {
    fn default() -> Self {
        EqualAreaProjection {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl EqualAreaProjection {
    pub fn new(tolerance: Float) -> Self {
        EqualAreaProjection { tolerance }
    }
    /// Sphere to disc: (X, Y) = √(2 / (1 - z)) (x, y).
    pub fn forward(&self, v: &Vector3f) -> Result<DiscPoint> {
        let one_minus_z: Float = 1.0 as Float - v.z;
        if !(one_minus_z > self.tolerance) {
            return Err(Error::SingularPoint { z: v.z });
        }
        let scale: Float = (2.0 as Float / one_minus_z).sqrt();
        Ok(DiscPoint {
            x: scale * v.x,
            y: scale * v.y,
        })
    }
    /// Disc to sphere: z = (X² + Y²) / 2 - 1 and
    /// (x, y) = √((1 - z) / 2) (X, Y).
    pub fn inverse(&self, p: &DiscPoint) -> Result<Vector3f> {
        let r2: Float = p.radius_squared();
        let max_r2: Float = DISC_RADIUS * DISC_RADIUS;
        if !(r2 <= max_r2 + self.tolerance) {
            return Err(Error::OutsideDisc {
                radius: r2.sqrt(),
            });
        }
        let r2: Float = r2.min(max_r2);
        let z: Float = r2 / 2.0 as Float - 1.0 as Float;
        let scale: Float = ((1.0 as Float - z) / 2.0 as Float).sqrt();
        Ok(Vector3f {
            x: scale * p.x,
            y: scale * p.y,
            z,
        })
    }
    /// Project every point of a three-dimensional cloud. The first
    /// singular point aborts the projection.
    pub fn forward_cloud(&self, cloud: &PointCloud) -> Result<Vec<DiscPoint>> {
        if cloud.dimension() != 3 {
            return Err(Error::DimensionMismatch {
                expected: 3,
                got: cloud.dimension(),
            });
        }
        cloud
            .points()
            .par_iter()
            .map(|p| Vector3f::try_from(p).and_then(|v| self.forward(&v)))
            .collect()
    }
    pub fn inverse_cloud(&self, points: &[DiscPoint]) -> Result<PointCloud> {
        let vectors: Vec<VectorN> = points
            .par_iter()
            .map(|p| self.inverse(p).map(VectorN::from))
            .collect::<Result<Vec<VectorN>>>()?;
        PointCloud::new(3, vectors)
    }
}
