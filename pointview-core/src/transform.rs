//! 3D transformation utilities

use nalgebra::{Matrix4, Point3, Rotation3, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D transformation that can be applied to points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    pub matrix: Matrix4<f64>,
}

impl Transform3D {
    /// Create an identity transformation
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Create a translation transformation
    pub fn translation(translation: Vector3<f64>) -> Self {
        Self {
            matrix: Matrix4::new_translation(&translation),
        }
    }

    /// Rotation about the X axis, angle in degrees
    pub fn rotation_x_degrees(angle: f64) -> Self {
        Self::rotation_about(Vector3::x_axis().into_inner(), angle)
    }

    /// Rotation about the Y axis, angle in degrees
    pub fn rotation_y_degrees(angle: f64) -> Self {
        Self::rotation_about(Vector3::y_axis().into_inner(), angle)
    }

    /// Rotation about the Z axis, angle in degrees
    pub fn rotation_z_degrees(angle: f64) -> Self {
        Self::rotation_about(Vector3::z_axis().into_inner(), angle)
    }

    fn rotation_about(axis: Vector3<f64>, degrees: f64) -> Self {
        Self {
            matrix: Rotation3::new(axis * degrees.to_radians()).to_homogeneous(),
        }
    }

    /// Create a uniform scaling transformation
    pub fn uniform_scaling(scale: f64) -> Self {
        Self {
            matrix: Matrix4::new_scaling(scale),
        }
    }

    /// Apply the transformation to a point
    pub fn transform_point(&self, point: &Point3<f64>) -> Point3<f64> {
        let homogeneous = self.matrix * point.to_homogeneous();
        Point3::from_homogeneous(homogeneous).unwrap_or(*point)
    }

    /// Compose this transformation with another.
    ///
    /// The result applies `other` first, then `self`.
    pub fn compose(self, other: Self) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Check if this is approximately the identity transformation
    pub fn is_identity(&self, epsilon: f64) -> bool {
        let identity = Matrix4::identity();
        (self.matrix - identity).norm() < epsilon
    }

    /// Single precision copy for GPU upload
    pub fn to_f32(&self) -> Matrix4<f32> {
        self.matrix.cast::<f32>()
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Transform3D {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(rhs)
    }
}

impl From<Matrix4<f64>> for Transform3D {
    fn from(matrix: Matrix4<f64>) -> Self {
        Self { matrix }
    }
}
