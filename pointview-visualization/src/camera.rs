//! Perspective camera and its auto-fit placement

use nalgebra::{Matrix4, Perspective3, Point3, Vector3};
use pointview_core::Aabb;
use serde::{Deserialize, Serialize};

/// Vertical field of view, fixed for every dataset
pub const FIELD_OF_VIEW_DEGREES: f64 = 45.0;

/// Extra distance factor so the data never touches the frame edge
pub const VISIBILITY_MARGIN: f64 = 3.0;

pub const MIN_CAMERA_DISTANCE: f64 = 200.0;
pub const MAX_CAMERA_DISTANCE: f64 = 1500.0;

pub const NEAR_CLIP: f64 = 0.1;
pub const FAR_CLIP: f64 = 10000.0;

/// Maps an OpenGL-style `[-1, 1]` clip depth onto wgpu's `[0, 1]`
#[rustfmt::skip]
fn opengl_to_wgpu() -> Matrix4<f64> {
    Matrix4::new(
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 0.5, 0.5,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Camera placed on the view axis at `-distance`, looking at the origin.
///
/// The whole state is recomputed on every data load; input never touches it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub distance: f64,
    pub fov_degrees: f64,
    pub near_clip: f64,
    pub far_clip: f64,
}

impl CameraState {
    /// Camera for a freshly created, empty viewer
    pub fn new() -> Self {
        Self {
            distance: MIN_CAMERA_DISTANCE,
            fov_degrees: FIELD_OF_VIEW_DEGREES,
            near_clip: NEAR_CLIP,
            far_clip: FAR_CLIP,
        }
    }

    /// Camera that keeps the whole normalized bounding box in view
    pub fn fit(bounds: &Aabb) -> Self {
        let max_dimension = bounds.max_dimension();
        let distance = fit_distance(max_dimension);

        log::info!(
            "Camera fit: data {:.1} x {:.1} x {:.1}, max dimension {:.1}, distance {:.1}",
            bounds.extent().x,
            bounds.extent().y,
            bounds.extent().z,
            max_dimension,
            distance,
        );

        Self {
            distance,
            fov_degrees: FIELD_OF_VIEW_DEGREES,
            near_clip: NEAR_CLIP,
            far_clip: FAR_CLIP.max(distance + 2.0 * max_dimension),
        }
    }

    /// Eye position in scene coordinates
    pub fn position(&self) -> Point3<f64> {
        Point3::new(0.0, 0.0, -self.distance)
    }

    /// View matrix with +Y pointing down the screen, matching pointer coordinates
    pub fn view_matrix(&self) -> Matrix4<f64> {
        Matrix4::look_at_rh(&self.position(), &Point3::origin(), &-Vector3::y())
    }

    /// Projection matrix for a surface of the given aspect ratio
    pub fn projection_matrix(&self, aspect_ratio: f64) -> Matrix4<f64> {
        let perspective = Perspective3::new(
            aspect_ratio,
            self.fov_degrees.to_radians(),
            self.near_clip,
            self.far_clip,
        );
        opengl_to_wgpu() * perspective.into_inner()
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new()
    }
}

/// Distance from the origin at which a cube of `max_dimension` fits the view.
///
/// Degenerate volumes fall through to the lower clamp.
pub fn fit_distance(max_dimension: f64) -> f64 {
    let half_fov = (FIELD_OF_VIEW_DEGREES / 2.0).to_radians();
    let distance = (max_dimension / 2.0) / half_fov.tan() * VISIBILITY_MARGIN;

    let min_distance = MIN_CAMERA_DISTANCE.max(max_dimension);
    let max_distance = MAX_CAMERA_DISTANCE.max(max_dimension * 8.0);
    distance.clamp(min_distance, max_distance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    #[test]
    fn test_degenerate_volume_uses_min_distance() {
        let bounds = Aabb::from_points([Point3::new(0.0, 0.0, 0.0)]).unwrap();
        let camera = CameraState::fit(&bounds);
        assert_eq!(camera.distance, 200.0);
        assert_eq!(camera.fov_degrees, 45.0);
        assert_eq!(fit_distance(0.0), 200.0);
    }

    #[test]
    fn test_unclamped_distance() {
        // 200 units of data: 100 / tan(22.5deg) * 3 ~ 724.26
        let expected = 100.0 / (22.5f64).to_radians().tan() * 3.0;
        assert_relative_eq!(fit_distance(200.0), expected, epsilon = 1e-9);
        assert!(expected > 200.0 && expected < 1500.0);
    }

    #[test]
    fn test_distance_clamps() {
        // small data is pulled out to the minimum
        assert_eq!(fit_distance(10.0), 200.0);
        // huge data: raw distance ~7.24 * d, upper bound 8 * d
        let d = 10_000.0;
        let distance = fit_distance(d);
        assert!(distance >= d && distance <= d * 8.0);
        // above the 200 floor the margin formula wins
        let expected = 500.0 / (22.5f64).to_radians().tan() * 3.0;
        assert_relative_eq!(fit_distance(1000.0), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_far_clip_covers_data() {
        let bounds = Aabb::new(
            Point3::new(-5000.0, -5000.0, -5000.0),
            Point3::new(5000.0, 5000.0, 5000.0),
        );
        let camera = CameraState::fit(&bounds);
        assert!(camera.far_clip >= camera.distance + bounds.max_dimension());
    }

    #[test]
    fn test_origin_projects_to_screen_center() {
        let camera = CameraState::new();
        let clip = camera.projection_matrix(1.5)
            * camera.view_matrix()
            * Point3::<f64>::origin().to_homogeneous();
        let ndc = clip.xyz() / clip.w;

        assert_relative_eq!(ndc.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(ndc.y, 0.0, epsilon = 1e-12);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_screen_axes_follow_pointer_convention() {
        let camera = CameraState::new();
        let project = |p: Point3<f64>| {
            let clip = camera.projection_matrix(1.0) * camera.view_matrix() * p.to_homogeneous();
            clip.xyz() / clip.w
        };

        // +X to the right, +Y down the screen (negative NDC y)
        assert!(project(Point3::new(10.0, 0.0, 0.0)).x > 0.0);
        assert!(project(Point3::new(0.0, 10.0, 0.0)).y < 0.0);
    }
}
