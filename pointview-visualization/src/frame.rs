//! Scene to GPU vertex conversion
//!
//! Each marker is drawn as a small octahedron, flat shaded on the CPU with
//! the scene's ambient and point light. Lights sit under the same root
//! transform as the markers, so shading is computed once in scene space and
//! reused until the scene changes.

use nalgebra::{Matrix4, Vector3};
use pointview_core::{Point3d, Transform3D};
use pointview_gpu::MarkerVertex;

use crate::camera::CameraState;
use crate::scene::{NodeKind, Scene, SceneNode};
use crate::viewer::ViewerCore;

/// Share of the base color that every face receives
pub const AMBIENT_INTENSITY: f32 = 0.45;
/// Share added for a face turned straight toward the point light
pub const DIFFUSE_INTENSITY: f32 = 0.55;

/// Vertices emitted per marker: 8 triangular faces
pub const VERTICES_PER_MARKER: usize = 24;

const OCTAHEDRON_DIRECTIONS: [[f64; 3]; 6] = [
    [1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, -1.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 0.0, -1.0],
];

/// Counter-clockwise faces seen from outside, as indices into the directions
const OCTAHEDRON_FACES: [[usize; 3]; 8] = [
    [0, 2, 4],
    [2, 1, 4],
    [1, 3, 4],
    [3, 0, 4],
    [2, 0, 5],
    [1, 2, 5],
    [3, 1, 5],
    [0, 3, 5],
];

/// One frame's worth of draw data
#[derive(Debug)]
pub struct Frame<'a> {
    pub vertices: &'a [MarkerVertex],
    /// `proj * view * world`
    pub view_proj: Matrix4<f32>,
    /// Vertices differ from the previous frame and need uploading
    pub rebuilt: bool,
}

/// Builds and caches the vertex list for a scene
#[derive(Debug, Default)]
pub struct FrameBuilder {
    vertices: Vec<MarkerVertex>,
    generation: Option<u64>,
}

impl FrameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw data for the current scene; vertices are rebuilt only when the
    /// scene generation changed since the last call
    pub fn build(&mut self, core: &ViewerCore, aspect_ratio: f64) -> Frame<'_> {
        let scene = core.scene();
        let rebuilt = self.generation != Some(scene.generation());
        if rebuilt {
            self.vertices = scene_vertices(scene);
            self.generation = Some(scene.generation());
            log::debug!("Rebuilt {} marker vertices", self.vertices.len());
        }
        Frame {
            vertices: &self.vertices,
            view_proj: view_projection(core.camera(), scene, aspect_ratio),
            rebuilt,
        }
    }
}

/// Combined matrix taking scene coordinates to clip space
pub fn view_projection(camera: &CameraState, scene: &Scene, aspect_ratio: f64) -> Matrix4<f32> {
    let eye = Transform3D::from(camera.projection_matrix(aspect_ratio) * camera.view_matrix());
    eye.compose(*scene.root_transform()).to_f32()
}

/// Flat-shaded triangles for every marker in the scene
pub fn scene_vertices(scene: &Scene) -> Vec<MarkerVertex> {
    let light = scene
        .lights()
        .find(|node| node.kind == NodeKind::PointLight)
        .map(|node| node.position);

    let markers: Vec<&SceneNode> = scene.nodes().iter().filter(|node| node.is_marker()).collect();
    let mut vertices = Vec::with_capacity(markers.len() * VERTICES_PER_MARKER);
    for marker in markers {
        push_marker(&mut vertices, marker, light.as_ref());
    }
    vertices
}

fn push_marker(out: &mut Vec<MarkerVertex>, marker: &SceneNode, light: Option<&Point3d>) {
    let base = marker.color.to_linear_f32();
    let corners = OCTAHEDRON_DIRECTIONS
        .map(|[x, y, z]| marker.position + Vector3::new(x, y, z) * marker.radius);

    for [a, b, c] in OCTAHEDRON_FACES {
        let (pa, pb, pc) = (corners[a], corners[b], corners[c]);
        let normal = (pb - pa).cross(&(pc - pa));
        let centroid = Point3d::from((pa.coords + pb.coords + pc.coords) / 3.0);
        let brightness = face_brightness(&normal, &centroid, light);
        let color = base.map(|channel| (channel * brightness).clamp(0.0, 1.0));

        for corner in [pa, pb, pc] {
            out.push(MarkerVertex::new(
                [corner.x as f32, corner.y as f32, corner.z as f32],
                color,
            ));
        }
    }
}

fn face_brightness(normal: &Vector3<f64>, centroid: &Point3d, light: Option<&Point3d>) -> f32 {
    let diffuse = light
        .and_then(|light| {
            let to_light = (light - centroid).try_normalize(f64::EPSILON)?;
            let normal = normal.try_normalize(f64::EPSILON)?;
            Some(normal.dot(&to_light).max(0.0) as f32)
        })
        .unwrap_or(0.0);
    AMBIENT_INTENSITY + DIFFUSE_INTENSITY * diffuse
}
