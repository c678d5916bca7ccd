//! Point cloud data structures and functionality

use crate::point::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ops::Index;

/// A generic point cloud container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointCloud<T> {
    pub points: Vec<T>,
}

/// A point cloud of category-labeled points
pub type LabeledPointCloud = PointCloud<LabeledPoint>;

impl<T> PointCloud<T> {
    /// Create a new empty point cloud
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Create a point cloud from a vector of points
    pub fn from_points(points: Vec<T>) -> Self {
        Self { points }
    }

    /// Get the number of points in the cloud
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the point cloud is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Add a point to the cloud
    pub fn push(&mut self, point: T) {
        self.points.push(point);
    }

    /// Get an iterator over the points
    pub fn iter(&self) -> std::slice::Iter<T> {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.points
    }
}

impl PointCloud<LabeledPoint> {
    /// Distinct category labels in the order they first appear
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.points
            .iter()
            .map(LabeledPoint::category)
            .filter(|category| seen.insert(*category))
            .collect()
    }
}

impl<T> Default for PointCloud<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for PointCloud<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl<T> From<Vec<T>> for PointCloud<T> {
    fn from(points: Vec<T>) -> Self {
        Self::from_points(points)
    }
}

impl<T> IntoIterator for PointCloud<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a PointCloud<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl<T> Extend<T> for PointCloud<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.points.extend(iter);
    }
}

impl<T> FromIterator<T> for PointCloud<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            points: Vec::from_iter(iter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_keep_first_seen_order() {
        let cloud: LabeledPointCloud = vec![
            LabeledPoint::new(0.0, 0.0, 0.0, "wall"),
            LabeledPoint::new(1.0, 0.0, 0.0, "column"),
            LabeledPoint::new(2.0, 0.0, 0.0, "wall"),
            LabeledPoint::new(3.0, 0.0, 0.0, "door"),
        ]
        .into();

        assert_eq!(cloud.len(), 4);
        assert_eq!(cloud.categories(), vec!["wall", "column", "door"]);
    }

    #[test]
    fn test_collect_and_extend() {
        let mut cloud: LabeledPointCloud = (0..3)
            .map(|i| LabeledPoint::new(i as f64, 0.0, 0.0, "a"))
            .collect();
        cloud.extend(vec![LabeledPoint::new(9.0, 9.0, 9.0, "b")]);

        assert_eq!(cloud.len(), 4);
        assert_eq!(cloud[3].category(), "b");
        assert!(PointCloud::<LabeledPoint>::new().is_empty());
    }
}
