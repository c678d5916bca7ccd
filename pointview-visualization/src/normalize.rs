//! Mapping raw coordinates into the bounded, origin-centered viewing volume
//!
//! X and Y share one divisor so the footprint keeps a 1:1 aspect ratio and
//! spans roughly [`XY_TARGET_EXTENT`] units. Z uses a divisor
//! [`Z_EXAGGERATION`] times smaller, so height differences appear six times
//! larger than the same distance on the ground plane.

use pointview_core::{Aabb, LabeledPoint, Point3d, UnitScale, Vector3d};
use serde::{Deserialize, Serialize};

/// Extent the larger of the X/Y ranges is mapped onto
pub const XY_TARGET_EXTENT: f64 = 80.0;

/// How much more Z is stretched than X and Y
pub const Z_EXAGGERATION: f64 = 6.0;

/// XY divisor used when every point shares the same X and Y
pub const MIN_XY_DIVISOR: f64 = 1.0;

/// Parameters of one normalization pass, fixed at data load time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Normalization {
    /// Bounds of the raw coordinates after unit scaling
    pub scaled_bounds: Aabb,
    pub unit_scale: UnitScale,
    pub xy_range: f64,
    pub xy_divisor: f64,
    pub z_divisor: f64,
    /// Added to the scaled coordinate before dividing
    pub offset: Vector3d,
}

impl Normalization {
    /// Derive normalization parameters, `None` for an empty point set
    pub fn compute(points: &[LabeledPoint], unit_scale: UnitScale) -> Option<Self> {
        let scaled_bounds =
            Aabb::from_points(points.iter().map(|p| unit_scale.apply(p.position())))?;
        let extent = scaled_bounds.extent();

        let xy_range = extent.x.max(extent.y);
        let xy_divisor = if xy_range > 0.0 {
            xy_range / XY_TARGET_EXTENT
        } else {
            MIN_XY_DIVISOR
        };
        let z_divisor = xy_divisor / Z_EXAGGERATION;
        let offset = -(scaled_bounds.max.coords + scaled_bounds.min.coords) / 2.0;

        log::info!(
            "Normalizing {} points: scaled X {:.3}..{:.3}, Y {:.3}..{:.3}, Z {:.3}..{:.3}",
            points.len(),
            scaled_bounds.min.x,
            scaled_bounds.max.x,
            scaled_bounds.min.y,
            scaled_bounds.max.y,
            scaled_bounds.min.z,
            scaled_bounds.max.z,
        );
        log::info!(
            "XY divisor {:.5}, Z divisor {:.5}, offset ({:.3}, {:.3}, {:.3})",
            xy_divisor,
            z_divisor,
            offset.x,
            offset.y,
            offset.z,
        );

        Some(Self {
            scaled_bounds,
            unit_scale,
            xy_range,
            xy_divisor,
            z_divisor,
            offset,
        })
    }

    /// Normalized position of one raw point
    pub fn apply(&self, raw: &Point3d) -> Point3d {
        let shifted = self.unit_scale.apply(raw).coords + self.offset;
        Point3d::new(
            shifted.x / self.xy_divisor,
            shifted.y / self.xy_divisor,
            shifted.z / self.z_divisor,
        )
    }

    /// Normalized positions of every point, in input order
    pub fn normalize(&self, points: &[LabeledPoint]) -> Vec<Point3d> {
        points.iter().map(|p| self.apply(p.position())).collect()
    }

    /// Bounds of the normalized point set
    pub fn normalized_bounds(&self) -> Aabb {
        let unscale = |p: &Point3d| {
            Point3d::new(p.x / self.unit_scale.x, p.y / self.unit_scale.y, p.z / self.unit_scale.z)
        };
        // divisors are positive, so the mapping is monotone on every axis
        Aabb::new(
            self.apply(&unscale(&self.scaled_bounds.min)),
            self.apply(&unscale(&self.scaled_bounds.max)),
        )
    }
}
