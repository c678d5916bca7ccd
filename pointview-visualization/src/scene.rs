//! Renderable scene contents
//!
//! A scene is a flat list of nodes under one root transform: lights, the
//! reference axis markers and one marker per data point. Rebuilding replaces
//! the whole list.

use pointview_core::{Point3d, Transform3D};

use crate::color::Color;

/// Where the point light sits, in scene coordinates
pub const POINT_LIGHT_POSITION: [f64; 3] = [100.0, -100.0, -100.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn color(self) -> Color {
        match self {
            Axis::X => Color::RED,
            Axis::Y => Color::GREEN,
            Axis::Z => Color::BLUE,
        }
    }

    /// Point `length` units along the positive direction of this axis
    pub fn tip(self, length: f64) -> Point3d {
        match self {
            Axis::X => Point3d::new(length, 0.0, 0.0),
            Axis::Y => Point3d::new(0.0, length, 0.0),
            Axis::Z => Point3d::new(0.0, 0.0, length),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    AmbientLight,
    PointLight,
    /// One end of a reference axis
    AxisMarker(Axis),
    /// A data point, tagged with its category
    PointMarker { category: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub kind: NodeKind,
    pub position: Point3d,
    pub color: Color,
    /// Marker radius, zero for lights
    pub radius: f64,
}

impl SceneNode {
    pub fn is_marker(&self) -> bool {
        matches!(self.kind, NodeKind::AxisMarker(_) | NodeKind::PointMarker { .. })
    }

    pub fn is_light(&self) -> bool {
        matches!(self.kind, NodeKind::AmbientLight | NodeKind::PointLight)
    }
}

/// Whether data markers are present
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SceneState {
    Empty,
    Populated,
}

#[derive(Debug, Clone)]
pub struct Scene {
    nodes: Vec<SceneNode>,
    root_transform: Transform3D,
    state: SceneState,
    generation: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root_transform: Transform3D::identity(),
            state: SceneState::Empty,
            generation: 0,
        }
    }

    /// Remove every node, lights and axes included
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.state = SceneState::Empty;
        self.generation += 1;
    }

    /// White ambient light plus one white point light
    pub fn add_lights(&mut self) {
        self.push(SceneNode {
            kind: NodeKind::AmbientLight,
            position: Point3d::origin(),
            color: Color::WHITE,
            radius: 0.0,
        });
        let [x, y, z] = POINT_LIGHT_POSITION;
        self.push(SceneNode {
            kind: NodeKind::PointLight,
            position: Point3d::new(x, y, z),
            color: Color::WHITE,
            radius: 0.0,
        });
    }

    /// Markers at the origin and at `length` along +X, +Y and +Z
    pub fn add_axes(&mut self, length: f64, radius: f64) {
        for axis in Axis::ALL {
            for position in [Point3d::origin(), axis.tip(length)] {
                self.push(SceneNode {
                    kind: NodeKind::AxisMarker(axis),
                    position,
                    color: axis.color(),
                    radius,
                });
            }
        }
    }

    pub fn add_point_marker(
        &mut self,
        position: Point3d,
        category: &str,
        color: Color,
        radius: f64,
    ) {
        self.push(SceneNode {
            kind: NodeKind::PointMarker {
                category: category.to_owned(),
            },
            position,
            color,
            radius,
        });
        self.state = SceneState::Populated;
    }

    fn push(&mut self, node: SceneNode) {
        self.nodes.push(node);
        self.generation += 1;
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn point_markers(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes
            .iter()
            .filter(|node| matches!(node.kind, NodeKind::PointMarker { .. }))
    }

    pub fn axis_markers(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes
            .iter()
            .filter(|node| matches!(node.kind, NodeKind::AxisMarker(_)))
    }

    pub fn lights(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.iter().filter(|node| node.is_light())
    }

    pub fn point_count(&self) -> usize {
        self.point_markers().count()
    }

    pub fn state(&self) -> SceneState {
        self.state
    }

    /// Changes whenever the node list changes
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn root_transform(&self) -> &Transform3D {
        &self.root_transform
    }

    pub fn set_root_transform(&mut self, transform: Transform3D) {
        self.root_transform = transform;
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axes_are_colored_per_axis() {
        let mut scene = Scene::new();
        scene.add_axes(50.0, 1.0);

        let axes: Vec<&SceneNode> = scene.axis_markers().collect();
        assert_eq!(axes.len(), 6);
        for node in axes {
            let NodeKind::AxisMarker(axis) = node.kind else {
                unreachable!()
            };
            assert_eq!(node.color, axis.color());
            assert!(node.position == Point3d::origin() || node.position == axis.tip(50.0));
        }
        assert_eq!(scene.state(), SceneState::Empty);
    }

    #[test]
    fn test_point_markers_populate_scene() {
        let mut scene = Scene::new();
        scene.add_lights();
        scene.add_axes(50.0, 1.0);
        scene.add_point_marker(Point3d::new(1.0, 2.0, 3.0), "wall", Color::rgb(1, 2, 3), 0.3);

        assert_eq!(scene.state(), SceneState::Populated);
        assert_eq!(scene.point_count(), 1);
        assert_eq!(scene.lights().count(), 2);
        assert_eq!(scene.nodes().len(), 9);
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut scene = Scene::new();
        scene.add_lights();
        scene.add_point_marker(Point3d::origin(), "a", Color::WHITE, 0.3);
        let before = scene.generation();

        scene.clear();
        assert!(scene.nodes().is_empty());
        assert_eq!(scene.state(), SceneState::Empty);
        assert!(scene.generation() > before);
    }
}
