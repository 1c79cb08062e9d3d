//! Geometry descriptions handed to the renderer
//!
//! Primitive tessellation belongs to the renderer; the scene only records what
//! to draw. The claw finger is the one custom mesh, so its vertex data lives here.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Geometry attached to a mesh node.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Box { size: Vec3 },
    Cylinder { radius: f32, height: f32 },
    /// Unit tetrahedral wedge, scaled by its node
    ClawFinger,
    Dodecahedron { radius: f32 },
    Icosahedron { radius: f32 },
    Torus { radius: f32, tube: f32 },
    TorusKnot { radius: f32, tube: f32 },
}

impl Shape {
    /// Cube with the given edge length.
    pub fn cube(edge: f32) -> Self {
        Shape::Box { size: Vec3::splat(edge) }
    }

    /// Radius used for proximity tests.
    ///
    /// Boxes report half their largest edge, round solids their construction radius.
    pub fn nominal_radius(&self) -> f32 {
        match *self {
            Shape::Box { size } => size.max_element() / 2.0,
            Shape::Cylinder { radius, height } => radius.max(height / 2.0),
            Shape::ClawFinger => 1.0,
            Shape::Dodecahedron { radius }
            | Shape::Icosahedron { radius }
            | Shape::Torus { radius, .. }
            | Shape::TorusKnot { radius, .. } => radius,
        }
    }
}

/// Vertex of the claw finger mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

const fn vertex(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Vertex {
    Vertex { position, normal, uv }
}

/// Non-indexed triangle list for the claw finger: a wedge with its hinge edge
/// along Z at the origin, tip at +X and back edge up +Y.
pub const CLAW_FINGER_VERTICES: [Vertex; 12] = [
    // vertical face
    vertex([0.0, 0.0, 0.5], [-1.0, 0.0, 0.0], [0.0, 0.0]),
    vertex([0.0, 0.0, -0.5], [-1.0, 0.0, 0.0], [1.0, 0.0]),
    vertex([0.0, 1.0, 0.0], [-1.0, 0.0, 0.0], [1.0, 1.0]),
    // horizontal face
    vertex([0.0, 0.0, 0.5], [0.0, -1.0, 0.0], [0.0, 1.0]),
    vertex([0.0, 0.0, -0.5], [0.0, -1.0, 0.0], [1.0, 0.0]),
    vertex([1.0, 0.0, 0.0], [0.0, -1.0, 0.0], [1.0, 1.0]),
    // first diagonal face
    vertex([0.0, 1.0, 0.0], [0.5, 0.5, -1.0], [0.0, 1.0]),
    vertex([1.0, 0.0, 0.0], [0.5, 0.5, -1.0], [1.0, 0.0]),
    vertex([0.0, 0.0, -0.5], [0.5, 0.5, -1.0], [1.0, 1.0]),
    // second diagonal face
    vertex([0.0, 1.0, 0.0], [-0.5, -0.5, -1.0], [0.0, 1.0]),
    vertex([0.0, 0.0, 0.5], [-0.5, -0.5, -1.0], [1.0, 1.0]),
    vertex([1.0, 0.0, 0.0], [-0.5, -0.5, -1.0], [1.0, 0.0]),
];
