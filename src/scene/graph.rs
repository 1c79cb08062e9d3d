//! Scene graph: CPU-side hierarchy of nodes.
//!
//! The scene graph organizes the crane, its surroundings and the loads into a
//! parent/child hierarchy. Each frame, `flatten()` walks the tree and produces
//! a flat `Vec<DrawItem>` that an external renderer can consume directly.

use std::collections::HashMap;

use glam::{Mat4, Vec3};

use super::flatten::DrawItem;
use super::material::{Material, MaterialId, MaterialLibrary};
use super::node::{LocalTransform, NodeContent, SceneNode, SceneNodeId};
use super::shape::Shape;

/// CPU-side scene graph.
///
/// Node handles are issued by the graph itself; looking up one it never issued
/// is a programming error and panics in the strict accessors.
pub struct SceneGraph {
    nodes: HashMap<SceneNodeId, SceneNode>,
    root: SceneNodeId,
    next_id: u64,
    materials: MaterialLibrary,
}

impl SceneGraph {
    /// Create a new scene graph with a root Group node.
    pub fn new() -> Self {
        let root_id = SceneNodeId(0);
        let root_node = SceneNode::new(root_id, "root", NodeContent::Group);

        let mut nodes = HashMap::new();
        nodes.insert(root_id, root_node);

        Self {
            nodes,
            root: root_id,
            next_id: 1,
            materials: MaterialLibrary::new(),
        }
    }

    /// Get the root node ID.
    pub fn root(&self) -> SceneNodeId {
        self.root
    }

    /// Allocate a fresh node ID.
    fn alloc_id(&mut self) -> SceneNodeId {
        let id = SceneNodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a child node under `parent`. Returns the new node's ID.
    pub fn add_child(
        &mut self,
        parent: SceneNodeId,
        name: impl Into<String>,
        content: NodeContent,
    ) -> SceneNodeId {
        let id = self.alloc_id();
        let mut node = SceneNode::new(id, name, content);
        node.parent = Some(parent);

        self.nodes.insert(id, node);
        self.node_mut(parent).children.push(id);
        id
    }

    /// Add an empty group under `parent` at a local position.
    pub fn add_group(&mut self, parent: SceneNodeId, name: impl Into<String>, position: Vec3) -> SceneNodeId {
        let id = self.add_child(parent, name, NodeContent::Group);
        self.node_mut(id).local_transform.position = position;
        id
    }

    /// Add a mesh under `parent` with a fresh material of the given colour.
    pub fn add_mesh(
        &mut self,
        parent: SceneNodeId,
        name: impl Into<String>,
        shape: Shape,
        color: u32,
        transform: LocalTransform,
    ) -> SceneNodeId {
        let material = self.materials.add(Material::solid(color));
        let id = self.add_child(parent, name, NodeContent::Mesh { shape, material });
        self.node_mut(id).local_transform = transform;
        id
    }

    /// Move a node to a new parent, keeping its local transform.
    ///
    /// The node therefore jumps to wherever its local transform lands in the new
    /// parent's frame. Reparenting the root or moving a node under its own
    /// subtree is ignored.
    pub fn reparent(&mut self, id: SceneNodeId, new_parent: SceneNodeId) {
        if id == self.root || self.is_ancestor_or_self(id, new_parent) {
            log::warn!("Ignoring reparent of {:?} under {:?}", id, new_parent);
            return;
        }

        if let Some(old_parent_id) = self.node(id).parent {
            if let Some(old_parent) = self.nodes.get_mut(&old_parent_id) {
                old_parent.children.retain(|c| *c != id);
            }
        }

        self.node_mut(new_parent).children.push(id);
        self.node_mut(id).parent = Some(new_parent);
    }

    /// Whether `ancestor` is `id` or one of its parents.
    fn is_ancestor_or_self(&self, ancestor: SceneNodeId, id: SceneNodeId) -> bool {
        let mut current = Some(id);
        while let Some(cur) = current {
            if cur == ancestor {
                return true;
            }
            current = self.nodes.get(&cur).and_then(|n| n.parent);
        }
        false
    }

    /// Local transform of a node.
    pub fn transform(&self, id: SceneNodeId) -> &LocalTransform {
        &self.node(id).local_transform
    }

    /// Mutable local transform of a node.
    pub fn transform_mut(&mut self, id: SceneNodeId) -> &mut LocalTransform {
        &mut self.node_mut(id).local_transform
    }

    /// Node that must exist. Panics on a stale handle.
    pub fn node(&self, id: SceneNodeId) -> &SceneNode {
        self.nodes
            .get(&id)
            .unwrap_or_else(|| panic!("scene node {:?} is not in the graph", id))
    }

    /// Mutable node that must exist. Panics on a stale handle.
    pub fn node_mut(&mut self, id: SceneNodeId) -> &mut SceneNode {
        self.nodes
            .get_mut(&id)
            .unwrap_or_else(|| panic!("scene node {:?} is not in the graph", id))
    }

    /// Parent of a node, `None` for the root.
    pub fn parent(&self, id: SceneNodeId) -> Option<SceneNodeId> {
        self.node(id).parent
    }

    /// Iterate over the children of a node.
    pub fn children(&self, id: SceneNodeId) -> impl Iterator<Item = SceneNodeId> + '_ {
        self.nodes
            .get(&id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
            .iter()
            .copied()
    }

    /// World transform of a node, computed from the current local transforms.
    pub fn world_matrix(&self, id: SceneNodeId) -> Mat4 {
        let mut matrix = self.node(id).local_transform.to_mat4();
        let mut current = self.node(id).parent;
        while let Some(parent_id) = current {
            let parent = self.node(parent_id);
            matrix = parent.local_transform.to_mat4() * matrix;
            current = parent.parent;
        }
        matrix
    }

    /// World position of a node's origin.
    pub fn world_position(&self, id: SceneNodeId) -> Vec3 {
        self.world_matrix(id).transform_point3(Vec3::ZERO)
    }

    /// Get a reference to the material library.
    pub fn materials(&self) -> &MaterialLibrary {
        &self.materials
    }

    /// Get a mutable reference to the material library.
    pub fn materials_mut(&mut self) -> &mut MaterialLibrary {
        &mut self.materials
    }

    /// Material by handle.
    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id)
    }

    /// Total number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Walk the tree, propagate transforms and collect every mesh.
    pub fn flatten(&mut self) -> Vec<DrawItem> {
        self.propagate_transforms(self.root, Mat4::IDENTITY);

        let mut out = Vec::new();
        self.collect_meshes(self.root, &mut out);
        out
    }

    /// Recursively propagate world transforms.
    fn propagate_transforms(&mut self, node_id: SceneNodeId, parent_world: Mat4) {
        let (local_mat, children) = {
            let node = match self.nodes.get(&node_id) {
                Some(n) => n,
                None => return,
            };
            (node.local_transform.to_mat4(), node.children.clone())
        };

        let world = parent_world * local_mat;

        if let Some(node) = self.nodes.get_mut(&node_id) {
            node.world_transform = world;
        }

        for child_id in children {
            self.propagate_transforms(child_id, world);
        }
    }

    /// Recursively collect draw items.
    fn collect_meshes(&self, node_id: SceneNodeId, out: &mut Vec<DrawItem>) {
        let node = match self.nodes.get(&node_id) {
            Some(n) => n,
            None => return,
        };

        if let NodeContent::Mesh { shape, material } = &node.content {
            let material = self.materials.get(*material).copied().unwrap_or_else(|| {
                log::warn!("Node '{}' references unknown material {:?}", node.name, material);
                Material::solid(0xff00ff)
            });
            out.push(DrawItem {
                node: node.id,
                world_transform: node.world_transform,
                shape: *shape,
                color: material.rgb(),
                wireframe: material.wireframe,
            });
        }

        for &child_id in &node.children {
            self.collect_meshes(child_id, out);
        }
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    #[test]
    fn test_new_scene_graph() {
        let graph = SceneGraph::new();
        assert_eq!(graph.node_count(), 1); // root only
        assert_eq!(graph.node(graph.root()).name, "root");
    }

    #[test]
    fn test_add_child() {
        let mut graph = SceneGraph::new();
        let root = graph.root();

        let child = graph.add_group(root, "crane", Vec3::ZERO);

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.parent(child), Some(root));
        assert!(graph.children(root).any(|c| c == child));
    }

    #[test]
    fn test_add_mesh_registers_material() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        graph.add_mesh(root, "base", Shape::cube(15.0), 0x5e4e4e, LocalTransform::identity());
        graph.add_mesh(root, "tower", Shape::cube(5.0), 0xd4af37, LocalTransform::identity());
        assert_eq!(graph.materials().len(), 2);
    }

    #[test]
    fn test_reparent_keeps_local_transform() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let a = graph.add_group(root, "a", Vec3::new(10.0, 0.0, 0.0));
        let b = graph.add_group(root, "b", Vec3::new(0.0, 20.0, 0.0));
        let c = graph.add_group(a, "c", Vec3::new(1.0, 0.0, 0.0));

        assert!((graph.world_position(c) - Vec3::new(11.0, 0.0, 0.0)).length() < 1e-5);

        graph.reparent(c, b);

        assert_eq!(graph.children(a).count(), 0);
        assert!(graph.children(b).any(|x| x == c));
        assert_eq!(graph.parent(c), Some(b));
        assert_eq!(graph.transform(c).position, Vec3::new(1.0, 0.0, 0.0));
        assert!((graph.world_position(c) - Vec3::new(1.0, 20.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_reparent_under_own_subtree_ignored() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let a = graph.add_group(root, "a", Vec3::ZERO);
        let b = graph.add_group(a, "b", Vec3::ZERO);

        graph.reparent(a, b);
        assert_eq!(graph.parent(a), Some(root));
        assert_eq!(graph.parent(b), Some(a));
    }

    #[test]
    #[should_panic(expected = "is not in the graph")]
    fn test_stale_handle_panics() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        graph.add_group(root, "a", Vec3::ZERO);
        graph.transform(SceneNodeId(99));
    }

    #[test]
    fn test_world_matrix_chain() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let upper = graph.add_group(root, "upper", Vec3::new(0.0, 80.0, 0.0));
        graph.transform_mut(upper).rotation = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let arm = graph.add_group(upper, "arm", Vec3::new(10.0, 0.0, 0.0));

        // +X rotated a quarter turn about Y lands on -Z
        let p = graph.world_position(arm);
        assert!((p - Vec3::new(0.0, 80.0, -10.0)).length() < 1e-4);
    }

    #[test]
    fn test_flatten_empty_graph() {
        let mut graph = SceneGraph::new();
        assert!(graph.flatten().is_empty());
    }

    #[test]
    fn test_flatten_transform_propagation() {
        let mut graph = SceneGraph::new();
        let root = graph.root();

        let parent = graph.add_group(root, "parent", Vec3::new(10.0, 0.0, 0.0));
        graph.add_mesh(
            parent,
            "box",
            Shape::cube(1.0),
            0xffffff,
            LocalTransform::from_position(Vec3::new(5.0, 0.0, 0.0)),
        );

        let items = graph.flatten();
        assert_eq!(items.len(), 1);
        assert!((items[0].world_position() - Vec3::new(15.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_flatten_reports_wireframe() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        graph.add_mesh(root, "a", Shape::cube(1.0), 0x123456, LocalTransform::identity());

        assert!(!graph.flatten()[0].wireframe);
        graph.materials_mut().toggle_wireframe();
        assert!(graph.flatten()[0].wireframe);
    }
}
