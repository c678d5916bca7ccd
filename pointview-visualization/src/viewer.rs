//! Viewer state and scene rebuild
//!
//! [`ViewerCore`] owns everything the render thread mutates: the scene, the
//! camera, the transform pipeline, the input controller and the category
//! colors. It lives on the render thread; other threads reach it through
//! [`crate::dispatch::ViewerHandle`].

use pointview_core::{LabeledPoint, UnitScale};
use serde::{Deserialize, Serialize};

use crate::camera::CameraState;
use crate::color::{Color, ColorRegistry};
use crate::config::ViewerConfig;
use crate::input::{InputController, InputEvent, InputResponse};
use crate::normalize::Normalization;
use crate::pipeline::{TransformPipeline, TransformState, ViewAction};
use crate::scene::{Scene, SceneState};

/// Read-only view of the viewer state for hosts and tests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSnapshot {
    pub scene_state: SceneState,
    pub point_count: usize,
    pub unit_scale: UnitScale,
    pub transform: TransformState,
    pub camera: CameraState,
    pub normalization: Option<Normalization>,
    /// Category colors in assignment order
    pub colors: Vec<(String, Color)>,
}

pub struct ViewerCore {
    config: ViewerConfig,
    unit_scale: UnitScale,
    colors: ColorRegistry,
    scene: Scene,
    camera: CameraState,
    pipeline: TransformPipeline,
    input: InputController,
    normalization: Option<Normalization>,
}

impl ViewerCore {
    /// Viewer showing only lights and axes
    pub fn new(config: ViewerConfig) -> Self {
        let mut core = Self {
            unit_scale: config.unit_scale,
            input: InputController::new(config.input),
            config,
            colors: ColorRegistry::new(),
            scene: Scene::new(),
            camera: CameraState::new(),
            pipeline: TransformPipeline::new(),
            normalization: None,
        };
        core.rebuild_fixed_nodes();
        core.apply_transform();
        core
    }

    /// Store new unit scales; they take effect at the next `visualize_data`
    pub fn set_unit_scales(&mut self, unit_scale: UnitScale) {
        log::info!(
            "Unit scales set: X={}, Y={}, Z={}",
            unit_scale.x,
            unit_scale.y,
            unit_scale.z
        );
        self.unit_scale = unit_scale;
    }

    /// Replace the scene contents with markers for `points`.
    ///
    /// An empty slice leaves an axes-only scene; camera and transform then
    /// keep their previous values.
    pub fn visualize_data(&mut self, points: &[LabeledPoint]) {
        self.scene.clear();
        self.rebuild_fixed_nodes();
        self.normalization = None;

        if self.config.clear_colors_on_load {
            self.colors.clear();
        }

        let Some(normalization) = Normalization::compute(points, self.unit_scale) else {
            log::info!("No points to visualize, showing axes only");
            return;
        };

        for point in points {
            let position = normalization.apply(point.position());
            let color = self.colors.color_for(point.category());
            self.scene
                .add_point_marker(position, point.category(), color, self.config.point_radius);
        }

        self.camera = CameraState::fit(&normalization.normalized_bounds());
        self.normalization = Some(normalization);
        self.pipeline.reset();
        self.apply_transform();

        log::info!(
            "Visualized {} points in {} categories, camera at {:.1}",
            points.len(),
            self.colors.len(),
            self.camera.distance
        );
    }

    /// Identity rotation, pan and zoom; scene contents and camera are kept
    pub fn reset_view(&mut self) {
        self.apply_action(ViewAction::Reset);
    }

    pub fn apply_action(&mut self, action: ViewAction) {
        self.pipeline.apply(action);
        self.apply_transform();
        log::debug!("{:?} -> {:?}", action, self.pipeline.state());
    }

    /// Feed one host input event through the controller
    pub fn handle_input(&mut self, event: &InputEvent) -> InputResponse {
        let response = self.input.handle(event);
        if let InputResponse::Action(action) = response {
            self.apply_action(action);
        }
        response
    }

    /// Whether a right click left the context menu waiting for a choice
    pub fn menu_open(&self) -> bool {
        self.input.menu_open()
    }

    fn rebuild_fixed_nodes(&mut self) {
        self.scene.add_lights();
        self.scene
            .add_axes(self.config.axis_length, self.config.axis_marker_radius);
    }

    fn apply_transform(&mut self) {
        self.scene.set_root_transform(self.pipeline.world_transform());
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn unit_scale(&self) -> UnitScale {
        self.unit_scale
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn transform_state(&self) -> TransformState {
        self.pipeline.state()
    }

    pub fn colors(&self) -> &ColorRegistry {
        &self.colors
    }

    /// Explicitly forget every category color
    pub fn clear_colors(&mut self) {
        self.colors.clear();
    }

    pub fn normalization(&self) -> Option<&Normalization> {
        self.normalization.as_ref()
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            scene_state: self.scene.state(),
            point_count: self.scene.point_count(),
            unit_scale: self.unit_scale,
            transform: self.pipeline.state(),
            camera: self.camera,
            normalization: self.normalization,
            colors: self
                .colors
                .assignments()
                .map(|(category, color)| (category.to_owned(), color))
                .collect(),
        }
    }
}

impl Default for ViewerCore {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::PALETTE;
    use crate::input::{ContextMenuItem, ViewKey};
    use crate::scene::NodeKind;
    use approx::assert_relative_eq;
    use pointview_core::Point3d;

    fn triangle() -> Vec<LabeledPoint> {
        vec![
            LabeledPoint::new(0.0, 0.0, 0.0, "A"),
            LabeledPoint::new(10.0, 0.0, 0.0, "A"),
            LabeledPoint::new(0.0, 10.0, 0.0, "B"),
        ]
    }

    #[test]
    fn test_new_viewer_shows_axes_only() {
        let core = ViewerCore::default();
        assert_eq!(core.scene().state(), SceneState::Empty);
        assert_eq!(core.scene().axis_markers().count(), 6);
        assert_eq!(core.scene().lights().count(), 2);
        assert_eq!(core.scene().point_count(), 0);
    }

    #[test]
    fn test_visualize_builds_markers() {
        let mut core = ViewerCore::default();
        core.visualize_data(&triangle());

        assert_eq!(core.scene().state(), SceneState::Populated);
        assert_eq!(core.scene().point_count(), 3);
        assert_eq!(core.scene().axis_markers().count(), 6);

        let markers: Vec<_> = core.scene().point_markers().collect();
        assert_relative_eq!(markers[1].position, Point3d::new(40.0, -40.0, 0.0));
        assert_eq!(markers[0].color, PALETTE[0]);
        assert_eq!(markers[2].color, PALETTE[1]);
        assert!(matches!(&markers[2].kind, NodeKind::PointMarker { category } if category == "B"));

        // normalized extent is 80 x 80 x 0
        let distance = core.camera().distance;
        assert!(distance >= 200.0 && distance <= 1500.0);
    }

    #[test]
    fn test_empty_load_keeps_axes() {
        let mut core = ViewerCore::default();
        core.visualize_data(&triangle());
        core.visualize_data(&[]);

        assert_eq!(core.scene().state(), SceneState::Empty);
        assert_eq!(core.scene().point_count(), 0);
        assert_eq!(core.scene().axis_markers().count(), 6);
        assert!(core.normalization().is_none());
    }

    #[test]
    fn test_load_resets_transform() {
        let mut core = ViewerCore::default();
        core.visualize_data(&triangle());
        core.handle_input(&InputEvent::Key(ViewKey::TiltUp));
        core.handle_input(&InputEvent::Scroll { lines: 4.0 });
        assert!(!core.transform_state().is_identity());

        core.visualize_data(&triangle());
        assert!(core.transform_state().is_identity());
        assert!(core.scene().root_transform().is_identity(1e-12));
    }

    #[test]
    fn test_reset_keeps_camera_and_markers() {
        let mut core = ViewerCore::default();
        core.visualize_data(&triangle());
        let camera = *core.camera();

        core.handle_input(&InputEvent::Key(ViewKey::TurnLeft));
        core.reset_view();
        let once = core.transform_state();
        core.reset_view();

        assert!(once.is_identity());
        assert_eq!(core.transform_state(), once);
        assert_eq!(*core.camera(), camera);
        assert_eq!(core.scene().point_count(), 3);
    }

    #[test]
    fn test_unit_scales_apply_on_next_load() {
        let mut core = ViewerCore::default();
        core.visualize_data(&triangle());
        let before: Vec<Point3d> = core.scene().point_markers().map(|n| n.position).collect();

        core.set_unit_scales(UnitScale::new(2.0, 1.0, 1.0));
        let unchanged: Vec<Point3d> = core.scene().point_markers().map(|n| n.position).collect();
        assert_eq!(before, unchanged);

        core.visualize_data(&triangle());
        let n = core.normalization().unwrap();
        assert_relative_eq!(n.xy_range, 20.0);
        assert_eq!(core.unit_scale(), UnitScale::new(2.0, 1.0, 1.0));
    }

    #[test]
    fn test_colors_survive_reload_by_default() {
        let mut core = ViewerCore::default();
        core.visualize_data(&triangle());
        core.visualize_data(&[
            LabeledPoint::new(1.0, 1.0, 1.0, "C"),
            LabeledPoint::new(2.0, 2.0, 2.0, "A"),
        ]);

        assert_eq!(core.colors().get("A"), Some(PALETTE[0]));
        assert_eq!(core.colors().get("C"), Some(PALETTE[2]));
        assert_eq!(core.snapshot().colors.len(), 3);
    }

    #[test]
    fn test_colors_cleared_when_configured() {
        let mut core = ViewerCore::new(ViewerConfig {
            clear_colors_on_load: true,
            ..ViewerConfig::default()
        });
        core.visualize_data(&triangle());
        core.visualize_data(&[LabeledPoint::new(1.0, 1.0, 1.0, "C")]);

        assert_eq!(core.colors().get("A"), None);
        assert_eq!(core.colors().get("C"), Some(PALETTE[0]));
    }

    #[test]
    fn test_single_point_camera() {
        let mut core = ViewerCore::default();
        core.visualize_data(&[LabeledPoint::new(5.0, 5.0, 5.0, "A")]);

        assert_eq!(core.camera().distance, 200.0);
        let marker = core.scene().point_markers().next().unwrap();
        assert_eq!(marker.position, Point3d::origin());
    }

    #[test]
    fn test_context_menu_reset_entry() {
        let mut core = ViewerCore::default();
        core.visualize_data(&triangle());
        core.handle_input(&InputEvent::Key(ViewKey::TiltUp));
        core.handle_input(&InputEvent::Scroll { lines: 2.0 });
        assert!(!core.transform_state().is_identity());

        core.handle_input(&InputEvent::ContextMenuRequested);
        assert!(core.menu_open());
        let response =
            core.handle_input(&InputEvent::ContextMenuSelected(ContextMenuItem::ResetView));

        assert_eq!(response, InputResponse::Action(ViewAction::Reset));
        assert!(core.transform_state().is_identity());
        assert!(core.scene().root_transform().is_identity(1e-12));
        assert!(!core.menu_open());
        assert_eq!(core.scene().point_count(), 3);
    }
}
