//! Point types and related functionality

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A 3D point with double precision coordinates
pub type Point3d = Point3<f64>;

/// A 3D vector with double precision components
pub type Vector3d = Vector3<f64>;

/// A 3D sample tagged with the category it belongs to.
///
/// The category drives the marker color; any string is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledPoint {
    position: Point3d,
    category: String,
}

impl LabeledPoint {
    /// Create a labeled point from raw coordinates
    pub fn new(x: f64, y: f64, z: f64, category: impl Into<String>) -> Self {
        Self {
            position: Point3d::new(x, y, z),
            category: category.into(),
        }
    }

    /// Create a labeled point from an existing position
    pub fn from_position(position: Point3d, category: impl Into<String>) -> Self {
        Self {
            position,
            category: category.into(),
        }
    }

    pub fn position(&self) -> &Point3d {
        &self.position
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn z(&self) -> f64 {
        self.position.z
    }

    pub fn category(&self) -> &str {
        &self.category
    }
}

impl From<&LabeledPoint> for Point3d {
    fn from(point: &LabeledPoint) -> Self {
        point.position
    }
}

/// Per-axis factors converting raw coordinates into display units.
///
/// Factors are expected to be strictly positive. `new` does not check this;
/// callers that accept user input should go through [`UnitScale::try_new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitScale {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl UnitScale {
    /// Create a unit scale without validation
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Create a unit scale, rejecting non-positive or non-finite factors
    pub fn try_new(x: f64, y: f64, z: f64) -> Result<Self> {
        for (axis, value) in [("x", x), ("y", y), ("z", z)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidData(format!(
                    "unit scale for {} axis must be positive, got {}",
                    axis, value
                )));
            }
        }
        Ok(Self::new(x, y, z))
    }

    /// Scale a raw position component-wise
    pub fn apply(&self, point: &Point3d) -> Point3d {
        Point3d::new(point.x * self.x, point.y * self.y, point.z * self.z)
    }

    pub fn as_vector(&self) -> Vector3d {
        Vector3d::new(self.x, self.y, self.z)
    }
}

impl Default for UnitScale {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labeled_point_accessors() {
        let point = LabeledPoint::new(1.0, 2.0, 3.0, "column");
        assert_eq!(point.x(), 1.0);
        assert_eq!(point.y(), 2.0);
        assert_eq!(point.z(), 3.0);
        assert_eq!(point.category(), "column");
        assert_eq!(Point3d::from(&point), Point3d::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_unit_scale_validation() {
        assert!(UnitScale::try_new(1.0, 0.001, 1000.0).is_ok());
        assert!(matches!(UnitScale::try_new(0.0, 1.0, 1.0), Err(Error::InvalidData(_))));
        assert!(matches!(UnitScale::try_new(1.0, -2.0, 1.0), Err(Error::InvalidData(_))));
        assert!(UnitScale::try_new(1.0, 1.0, f64::NAN).is_err());
    }

    #[test]
    fn test_unit_scale_apply() {
        let scale = UnitScale::new(2.0, 0.5, 10.0);
        let scaled = scale.apply(&Point3d::new(1.0, 4.0, 0.3));
        assert_eq!(scaled, Point3d::new(2.0, 2.0, 3.0));
        assert_eq!(UnitScale::default().as_vector(), Vector3d::new(1.0, 1.0, 1.0));
    }
}
