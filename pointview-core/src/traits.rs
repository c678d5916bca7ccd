//! Bounding volumes and the traits that expose them

use crate::{point::*, point_cloud::*};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Point3d,
    pub max: Point3d,
}

impl Aabb {
    pub fn new(min: Point3d, max: Point3d) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point, or `None` when there are no points
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point3d>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut min = first;
        let mut max = first;

        for p in iter {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);

            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }

        Some(Self { min, max })
    }

    /// Width, height and depth of the box
    pub fn extent(&self) -> Vector3d {
        self.max - self.min
    }

    pub fn center(&self) -> Point3d {
        nalgebra::center(&self.min, &self.max)
    }

    /// Largest of width, height and depth
    pub fn max_dimension(&self) -> f64 {
        let extent = self.extent();
        extent.x.max(extent.y).max(extent.z)
    }
}

/// Trait for point sets that have a bounding volume
pub trait Bounded {
    /// Bounding box of the raw positions, `None` when empty
    fn bounding_box(&self) -> Option<Aabb>;
}

impl Bounded for [Point3d] {
    fn bounding_box(&self) -> Option<Aabb> {
        Aabb::from_points(self.iter().copied())
    }
}

impl Bounded for [LabeledPoint] {
    fn bounding_box(&self) -> Option<Aabb> {
        Aabb::from_points(self.iter().map(Point3d::from))
    }
}

impl<T> Bounded for PointCloud<T>
where
    [T]: Bounded,
{
    fn bounding_box(&self) -> Option<Aabb> {
        self.as_slice().bounding_box()
    }
}
