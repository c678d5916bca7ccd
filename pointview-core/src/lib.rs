//! Core data structures for pointview
//!
//! This crate provides the fundamental types shared by the viewer crates:
//! labeled points, per-axis unit scales, point clouds, bounding boxes and
//! homogeneous transforms.

pub mod point;
pub mod point_cloud;
pub mod traits;
pub mod transform;
pub mod error;

pub use point::*;
pub use point_cloud::*;
pub use traits::*;
pub use transform::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3, Matrix4};
