//! Scene graph and views

pub mod flatten;
pub mod graph;
pub mod material;
pub mod node;
pub mod shape;
pub mod views;

pub use flatten::DrawItem;
pub use graph::SceneGraph;
pub use material::{Material, MaterialId, MaterialLibrary};
pub use node::{LocalTransform, NodeContent, SceneNode, SceneNodeId};
pub use shape::Shape;
pub use views::{View, ViewConfig, ViewRig, VIEW_COUNT};
