//! Rotation, pan and zoom state applied to the whole scene
//!
//! The world transform is always composed as
//! `Rx * Ry * Rz * T(pan) * S(zoom)`: a point is scaled about the origin
//! first, then panned, then rotated about the origin. Pan is therefore
//! expressed in the rotated frame.

use pointview_core::{Transform3D, Vector3d};
use serde::{Deserialize, Serialize};

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 10.0;

/// Rotation angles in degrees. Angles are not wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Rotation {
    pub fn to_transform(&self) -> Transform3D {
        Transform3D::rotation_x_degrees(self.x)
            * Transform3D::rotation_y_degrees(self.y)
            * Transform3D::rotation_z_degrees(self.z)
    }
}

/// Translation in the view plane
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pan {
    pub x: f64,
    pub y: f64,
}

impl Pan {
    pub fn to_transform(&self) -> Transform3D {
        Transform3D::translation(Vector3d::new(self.x, self.y, 0.0))
    }
}

/// Uniform scale factor that always stays within `[MIN_ZOOM, MAX_ZOOM]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomScale(f64);

impl ZoomScale {
    pub fn new(value: f64) -> Self {
        Self(value.clamp(MIN_ZOOM, MAX_ZOOM))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Multiply by `factor`, clamping the result
    pub fn scaled_by(self, factor: f64) -> Self {
        Self::new(self.0 * factor)
    }

    pub fn to_transform(self) -> Transform3D {
        Transform3D::uniform_scaling(self.0)
    }
}

impl Default for ZoomScale {
    fn default() -> Self {
        Self(1.0)
    }
}

/// A single mutation of the transform state.
///
/// Pointer drags, scroll and key presses all reduce to these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewAction {
    /// Add the given angles in degrees
    Rotate { x: f64, y: f64, z: f64 },
    /// Add to the pan offset
    Pan { x: f64, y: f64 },
    /// Multiply the zoom factor
    Zoom(f64),
    /// Back to identity
    Reset,
}

/// Flat snapshot of the transform state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformState {
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub rotate_z: f64,
    pub pan_x: f64,
    pub pan_y: f64,
    pub uniform_scale: f64,
}

impl TransformState {
    pub fn identity() -> Self {
        Self {
            rotate_x: 0.0,
            rotate_y: 0.0,
            rotate_z: 0.0,
            pan_x: 0.0,
            pan_y: 0.0,
            uniform_scale: 1.0,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self::identity()
    }
}

/// Independently addressable rotation, pan and zoom
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransformPipeline {
    rotation: Rotation,
    pan: Pan,
    zoom: ZoomScale,
}

impl TransformPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, action: ViewAction) {
        match action {
            ViewAction::Rotate { x, y, z } => {
                self.rotation.x += x;
                self.rotation.y += y;
                self.rotation.z += z;
            }
            ViewAction::Pan { x, y } => {
                self.pan.x += x;
                self.pan.y += y;
            }
            ViewAction::Zoom(factor) => {
                self.zoom = self.zoom.scaled_by(factor);
            }
            ViewAction::Reset => self.reset(),
        }
    }

    /// All rotations to 0, pan to (0, 0), zoom to 1
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn pan(&self) -> Pan {
        self.pan
    }

    pub fn zoom(&self) -> ZoomScale {
        self.zoom
    }

    pub fn state(&self) -> TransformState {
        TransformState {
            rotate_x: self.rotation.x,
            rotate_y: self.rotation.y,
            rotate_z: self.rotation.z,
            pan_x: self.pan.x,
            pan_y: self.pan.y,
            uniform_scale: self.zoom.value(),
        }
    }

    /// Composed transform for the scene root
    pub fn world_transform(&self) -> Transform3D {
        self.rotation.to_transform() * self.pan.to_transform() * self.zoom.to_transform()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pointview_core::Point3d;

    #[test]
    fn test_identity_by_default() {
        let pipeline = TransformPipeline::new();
        assert!(pipeline.state().is_identity());
        assert!(pipeline.world_transform().is_identity(1e-12));
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut pipeline = TransformPipeline::new();
        for _ in 0..100 {
            pipeline.apply(ViewAction::Zoom(1.1));
        }
        assert_eq!(pipeline.zoom().value(), MAX_ZOOM);

        for _ in 0..200 {
            pipeline.apply(ViewAction::Zoom(0.9));
        }
        assert_eq!(pipeline.zoom().value(), MIN_ZOOM);
        assert_eq!(ZoomScale::new(-3.0).value(), MIN_ZOOM);
    }

    #[test]
    fn test_composition_order() {
        let mut pipeline = TransformPipeline::new();
        pipeline.apply(ViewAction::Zoom(2.0));
        pipeline.apply(ViewAction::Pan { x: 10.0, y: 0.0 });
        pipeline.apply(ViewAction::Rotate { x: 0.0, y: 0.0, z: 90.0 });

        // scale (1,0,0) -> (2,0,0), pan -> (12,0,0), rotate about Z -> (0,12,0)
        let p = pipeline.world_transform().transform_point(&Point3d::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Point3d::new(0.0, 12.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn test_rotations_compose_x_then_y_then_z() {
        let rotation = Rotation { x: 90.0, y: 90.0, z: 0.0 };
        // Ry first maps +Z to +X, then Rx leaves +X alone
        let p = rotation.to_transform().transform_point(&Point3d::new(0.0, 0.0, 1.0));
        assert_relative_eq!(p, Point3d::new(1.0, 0.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn test_reset_restores_identity() {
        let mut pipeline = TransformPipeline::new();
        pipeline.apply(ViewAction::Rotate { x: 30.0, y: -400.0, z: 12.5 });
        pipeline.apply(ViewAction::Pan { x: 3.0, y: -7.0 });
        pipeline.apply(ViewAction::Zoom(3.0));

        pipeline.apply(ViewAction::Reset);
        let once = pipeline.state();
        pipeline.apply(ViewAction::Reset);

        assert!(once.is_identity());
        assert_eq!(pipeline.state(), once);
    }

    #[test]
    fn test_rotation_is_not_wrapped() {
        let mut pipeline = TransformPipeline::new();
        for _ in 0..4 {
            pipeline.apply(ViewAction::Rotate { x: 0.0, y: 100.0, z: 0.0 });
        }
        assert_relative_eq!(pipeline.rotation().y, 400.0);
    }
}
