//! Points on spheres are represented by a handful of small geometric
//! types.
//!
//! # Vectors
//!
//! A **VectorN** holds the D components of a point in D-dimensional
//! space. Samplers return unit-length instances, but the type itself
//! does not enforce the norm, because point files may hold arbitrary
//! data. Small dimensions are stored inline.
//!
//! ```rust
//! use rs_hypersphere::core::geometry::VectorN;
//!
//!     let v = VectorN::from_slice(&[3.0, 0.0, 4.0]);
//!     assert_eq!(v.length(), 5.0);
//!     let n = v.normalize().unwrap();
//!     assert!(n.is_unit(1.0e-12));
//! ```
//!
//! A **Vector3f** is the fixed three-component version the
//! projection works with.
//!
//! # Disc points
//!
//! A **DiscPoint** is the image of a **Vector3f** under the
//! equal-area projection. For points on the unit sphere it lies
//! within the disc of radius 2.
//!
//! # Point clouds
//!
//! A **PointCloud** is an ordered collection of vectors sharing one
//! dimension. It is built once and read afterwards.

// std
use std::convert::TryFrom;
use std::ops;
use std::ops::Index;
// others
use smallvec::SmallVec;
// hypersphere
use crate::core::error::{Error, Result};
use crate::core::hypersphere::Float;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct VectorN {
    c: SmallVec<[Float; 4]>,
}

impl VectorN {
    pub fn from_slice(c: &[Float]) -> Self {
        VectorN {
            c: SmallVec::from_slice(c),
        }
    }
    pub fn dimension(&self) -> usize {
        self.c.len()
    }
    pub fn components(&self) -> &[Float] {
        &self.c
    }
    pub fn length_squared(&self) -> Float {
        self.c.iter().map(|x| x * x).sum()
    }
    pub fn length(&self) -> Float {
        self.length_squared().sqrt()
    }
    /// Compute a new vector pointing in the same direction but with unit
    /// length. Returns `None` for the zero vector.
    pub fn normalize(&self) -> Option<VectorN> {
        let length: Float = self.length();
        if length == 0.0 as Float || !length.is_finite() {
            return None;
        }
        Some(self.c.iter().map(|x| x / length).collect())
    }
    /// Is the Euclidean norm within *tolerance* of one?
    pub fn is_unit(&self, tolerance: Float) -> bool {
        (self.length() - 1.0 as Float).abs() < tolerance
    }
}

impl std::iter::FromIterator<Float> for VectorN {
    fn from_iter<I: IntoIterator<Item = Float>>(iter: I) -> Self {
        VectorN {
            c: iter.into_iter().collect(),
        }
    }
}

impl Index<usize> for VectorN {
    type Output = Float;
    fn index(&self, index: usize) -> &Float {
        &self.c[index]
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Vector3f {
    pub x: Float,
    pub y: Float,
    pub z: Float,
}

impl Vector3f {
    pub fn length_squared(&self) -> Float {
        self.x * self.x + self.y * self.y + self.z * self.z
    }
    pub fn length(&self) -> Float {
        self.length_squared().sqrt()
    }
}

impl TryFrom<&VectorN> for Vector3f {
    type Error = Error;
    fn try_from(v: &VectorN) -> Result<Vector3f> {
        if v.dimension() != 3 {
            return Err(Error::DimensionMismatch {
                expected: 3,
                got: v.dimension(),
            });
        }
        Ok(Vector3f {
            x: v[0],
            y: v[1],
            z: v[2],
        })
    }
}

impl From<Vector3f> for VectorN {
    fn from(v: Vector3f) -> VectorN {
        VectorN::from_slice(&[v.x, v.y, v.z])
    }
}

impl_op_ex!(+|a: &Vector3f, b: &Vector3f| -> Vector3f {
    Vector3f {
        x: a.x + b.x,
        y: a.y + b.y,
        z: a.z + b.z,
    }
});

impl_op_ex!(-|a: &Vector3f, b: &Vector3f| -> Vector3f {
    Vector3f {
        x: a.x - b.x,
        y: a.y - b.y,
        z: a.z - b.z,
    }
});

impl_op_ex!(*|a: &Vector3f, b: Float| -> Vector3f {
    Vector3f {
        x: a.x * b,
        y: a.y * b,
        z: a.z * b,
    }
});

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct DiscPoint {
    pub x: Float,
    pub y: Float,
}

impl DiscPoint {
    pub fn radius_squared(&self) -> Float {
        self.x * self.x + self.y * self.y
    }
    pub fn radius(&self) -> Float {
        self.radius_squared().sqrt()
    }
}

impl_op_ex!(+|a: &DiscPoint, b: &DiscPoint| -> DiscPoint {
    DiscPoint {
        x: a.x + b.x,
        y: a.y + b.y,
    }
});

impl_op_ex!(-|a: &DiscPoint, b: &DiscPoint| -> DiscPoint {
    DiscPoint {
        x: a.x - b.x,
        y: a.y - b.y,
    }
});

impl_op_ex!(*|a: &DiscPoint, b: Float| -> DiscPoint {
    DiscPoint {
        x: a.x * b,
        y: a.y * b,
    }
});

/// Ordered vectors of a common dimension.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PointCloud {
    dimension: usize,
    points: Vec<VectorN>,
}

impl PointCloud {
    /// Fails with `DimensionMismatch` if any point is not of
    /// *dimension* components.
    pub fn new(dimension: usize, points: Vec<VectorN>) -> Result<Self> {
        if let Some(p) = points.iter().find(|p| p.dimension() != dimension) {
            return Err(Error::DimensionMismatch {
                expected: dimension,
                got: p.dimension(),
            });
        }
        Ok(PointCloud { dimension, points })
    }
    pub fn dimension(&self) -> usize {
        self.dimension
    }
    pub fn len(&self) -> usize {
        self.points.len()
    }
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
    pub fn points(&self) -> &[VectorN] {
        &self.points
    }
    pub fn iter(&self) -> std::slice::Iter<VectorN> {
        self.points.iter()
    }
}

impl<'a> IntoIterator for &'a PointCloud {
    type Item = &'a VectorN;
    type IntoIter = std::slice::Iter<'a, VectorN>;
    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn normalize_keeps_direction() {
        let v = VectorN::from_slice(&[0.0, 2.0, 0.0, 0.0, 0.0]);
        let n = v.normalize().unwrap();
        assert_eq!(n.dimension(), 5);
        assert_eq!(n.components(), &[0.0, 1.0, 0.0, 0.0, 0.0]);
        assert!(n.is_unit(1.0e-12));
    }

    #[test]
    fn zero_vector_has_no_direction() {
        assert!(VectorN::from_slice(&[0.0, 0.0]).normalize().is_none());
    }

    #[test]
    fn vector3_conversion_checks_dimension() {
        let v = VectorN::from_slice(&[1.0, 2.0, 3.0]);
        let w = Vector3f::try_from(&v).unwrap();
        assert_eq!(w, Vector3f { x: 1.0, y: 2.0, z: 3.0 });
        assert_eq!(VectorN::from(w), v);
        let four = VectorN::from_slice(&[1.0, 2.0, 3.0, 4.0]);
        assert!(matches!(
            Vector3f::try_from(&four),
            Err(Error::DimensionMismatch {
                expected: 3,
                got: 4
            })
        ));
    }

    #[test]
    fn cloud_rejects_mixed_dimensions() {
        let points = vec![
            VectorN::from_slice(&[1.0, 0.0]),
            VectorN::from_slice(&[0.0, 0.0, 1.0]),
        ];
        match PointCloud::new(2, points) {
            Err(Error::DimensionMismatch { expected, got }) => {
                assert_eq!(expected, 2);
                assert_eq!(got, 3);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn vector3_ops() {
        let a = Vector3f { x: 1.0, y: 2.0, z: 2.0 };
        assert_eq!(a.length(), 3.0);
        let b = a * 2.0;
        assert_eq!(b - a, a);
        assert_eq!(&a + &a, b);
    }

    #[test]
    fn disc_point_ops() {
        let a = DiscPoint { x: 3.0, y: 4.0 };
        assert_eq!(a.radius(), 5.0);
        let b = a * 2.0;
        assert_eq!(b - a, a);
        assert_eq!(a + a, b);
    }
}
