//! Loads the crane can pick up.

use crate::math::Sphere;
use crate::scene::{SceneGraph, SceneNodeId, Shape};

/// Index of a load in registration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LoadId(pub usize);

/// A pickable object in the scene.
#[derive(Clone, Debug)]
pub struct Load {
    pub name: String,
    pub node: SceneNodeId,
    pub shape: Shape,
    /// Proximity radius; also how far below the claw the load hangs once attached.
    pub radius: f32,
}

impl Load {
    /// Bounding sphere at the load's current world position.
    pub fn bounds(&self, graph: &SceneGraph) -> Sphere {
        Sphere::new(graph.world_position(self.node), self.radius)
    }
}
