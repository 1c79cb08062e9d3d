//! Flattened scene graph output for the renderer.
//!
//! `DrawItem` is the result of walking the scene graph: one entry per
//! mesh, with its world transform and resolved material.

use glam::{Mat4, Vec3};

use super::node::SceneNodeId;
use super::shape::Shape;

/// One entry in the flattened draw list.
#[derive(Clone, Debug)]
pub struct DrawItem {
    /// Node this entry was produced from.
    pub node: SceneNodeId,
    /// Object-to-world transform.
    pub world_transform: Mat4,
    /// Geometry to draw.
    pub shape: Shape,
    /// Material colour as RGB in `[0, 1]`.
    pub color: [f32; 3],
    /// Draw edges only.
    pub wireframe: bool,
}

impl DrawItem {
    /// World-space origin of the mesh.
    pub fn world_position(&self) -> Vec3 {
        self.world_transform.transform_point3(Vec3::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_item_world_position() {
        let item = DrawItem {
            node: SceneNodeId(3),
            world_transform: Mat4::from_translation(Vec3::new(4.0, 0.0, 8.0)),
            shape: Shape::cube(2.0),
            color: [1.0, 0.0, 0.0],
            wireframe: false,
        };
        assert_eq!(item.world_position(), Vec3::new(4.0, 0.0, 8.0));
        assert_eq!(item.node, SceneNodeId(3));
    }
}
