//! Claw-to-load proximity test.

use crate::math::Sphere;
use crate::scene::{SceneGraph, SceneNodeId};

use super::load::{Load, LoadId};

/// First load whose bounding sphere touches the claw's, in registration order.
///
/// `claw` is the node whose origin is the claw's centre and `claw_radius` its
/// reach. Touching spheres count as a collision.
pub fn find_collision(graph: &SceneGraph, claw: SceneNodeId, claw_radius: f32, loads: &[Load]) -> Option<LoadId> {
    let claw = Sphere::new(graph.world_position(claw), claw_radius);
    loads
        .iter()
        .position(|load| claw.intersects(&load.bounds(graph)))
        .map(LoadId)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{LocalTransform, Shape};
    use glam::Vec3;

    fn add_load(graph: &mut SceneGraph, name: &str, position: Vec3, radius: f32) -> Load {
        let root = graph.root();
        let shape = Shape::Icosahedron { radius };
        let node = graph.add_mesh(root, name, shape, 0x5c2107, LocalTransform::from_position(position));
        Load { name: name.into(), node, shape, radius }
    }

    #[test]
    fn test_boundary_distance_collides() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let claw = graph.add_group(root, "claw", Vec3::new(12.0, 0.0, 0.0));
        let loads = vec![add_load(&mut graph, "cube", Vec3::ZERO, 4.0)];

        assert_eq!(find_collision(&graph, claw, 8.0, &loads), Some(LoadId(0)));

        graph.transform_mut(claw).position.x = 12.001;
        assert_eq!(find_collision(&graph, claw, 8.0, &loads), None);
    }

    #[test]
    fn test_first_registered_load_wins() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let claw = graph.add_group(root, "claw", Vec3::ZERO);
        let loads = vec![
            add_load(&mut graph, "far", Vec3::new(50.0, 0.0, 0.0), 2.0),
            add_load(&mut graph, "near_b", Vec3::new(0.0, 0.0, 5.0), 2.0),
            add_load(&mut graph, "near_a", Vec3::new(1.0, 0.0, 0.0), 2.0),
        ];
        assert_eq!(find_collision(&graph, claw, 8.0, &loads), Some(LoadId(1)));
    }

    #[test]
    fn test_uses_world_positions() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let arm = graph.add_group(root, "arm", Vec3::new(0.0, 80.0, 0.0));
        let claw = graph.add_group(arm, "claw", Vec3::new(0.0, -76.0, 0.0));
        let loads = vec![add_load(&mut graph, "cube", Vec3::new(0.0, 4.0, 0.0), 4.0)];

        assert_eq!(find_collision(&graph, claw, 8.0, &loads), Some(LoadId(0)));
        graph.transform_mut(arm).position.y = 100.0;
        assert_eq!(find_collision(&graph, claw, 8.0, &loads), None);
    }

    #[test]
    fn test_no_loads() {
        let graph = SceneGraph::new();
        assert_eq!(find_collision(&graph, graph.root(), 8.0, &[]), None);
    }
}
