#![warn(missing_docs)]

//! Math types for the packcad geometry generator.
//!
//! Thin wrappers around nalgebra providing domain-specific types for
//! pack geometry: points, vectors, and affine transforms. All linear
//! dimensions throughout the workspace are millimeters; the coordinate
//! convention is Y-up, with the pack grid spanning X (parallel axis)
//! and Z (series axis).

use nalgebra::{Matrix4, Vector3, Vector4};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// Geometric epsilon for degenerate-length checks (mm).
pub const GEOM_EPS: f64 = 1e-9;

/// A 4x4 affine transformation matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// The underlying 4x4 matrix.
    pub matrix: Matrix4<f64>,
}

impl Transform {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Translation by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 3)] = dx;
        m[(1, 3)] = dy;
        m[(2, 3)] = dz;
        Self { matrix: m }
    }

    /// Translation by vector.
    pub fn translation_vec(v: Vec3) -> Self {
        Self::translation(v.x, v.y, v.z)
    }

    /// Compose: `self` then `other` (other * self applied to points).
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            matrix: other.matrix * self.matrix,
        }
    }

    /// Transform a point.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        let v = self.matrix * Vector4::new(p.x, p.y, p.z, 1.0);
        Point3::new(v.x, v.y, v.z)
    }

    /// Transform a direction vector (linear part only, no translation).
    pub fn apply_vec(&self, v: &Vec3) -> Vec3 {
        let r = self.matrix * Vector4::new(v.x, v.y, v.z, 0.0);
        Vec3::new(r.x, r.y, r.z)
    }

    /// The translation component of the transform.
    pub fn translation_part(&self) -> Vec3 {
        Vec3::new(
            self.matrix[(0, 3)],
            self.matrix[(1, 3)],
            self.matrix[(2, 3)],
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
