//! Camera views over the crane scene
//!
//! Five views are fixed in world space; the sixth rides on a scene node (the
//! claw) and follows it through the graph.

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::core::camera::Camera;

use super::graph::SceneGraph;
use super::node::SceneNodeId;

/// Number of selectable views.
pub const VIEW_COUNT: usize = 6;

/// View placement and projection settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Orthographic half-extent divisor: half width = viewport width / ratio.
    pub ortho_ratio: f32,
    /// Initial viewport size in pixels.
    pub viewport: [f32; 2],
    pub front_position: Vec3,
    pub side_position: Vec3,
    pub top_position: Vec3,
    /// Shared position of the two fixed overview cameras.
    pub fixed_position: Vec3,
    /// Point every fixed camera looks at.
    pub target: Vec3,
    /// Vertical FOV of the fixed perspective camera, degrees.
    pub perspective_fov: f32,
    /// Vertical FOV of the claw camera, degrees.
    pub claw_fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            ortho_ratio: 7.0,
            viewport: [1280.0, 720.0],
            front_position: Vec3::new(120.0, 0.0, 0.0),
            side_position: Vec3::new(0.0, 0.0, 120.0),
            top_position: Vec3::new(0.0, 200.0, 0.0),
            fixed_position: Vec3::new(100.0, 100.0, 120.0),
            target: Vec3::ZERO,
            perspective_fov: 70.0,
            claw_fov: 45.0,
            near: 1.0,
            far: 1000.0,
        }
    }
}

/// A camera plus the node it is attached to, if any.
#[derive(Clone, Debug)]
pub struct View {
    pub name: &'static str,
    pub camera: Camera,
    /// When set, `camera.position`/`rotation` are relative to this node.
    pub mount: Option<SceneNodeId>,
}

impl View {
    /// Camera-to-world transform.
    pub fn world_matrix(&self, graph: &SceneGraph) -> Mat4 {
        match self.mount {
            Some(node) => graph.world_matrix(node) * self.camera.local_matrix(),
            None => self.camera.local_matrix(),
        }
    }

    /// World-to-camera transform.
    pub fn view_matrix(&self, graph: &SceneGraph) -> Mat4 {
        match self.mount {
            Some(_) => self.world_matrix(graph).inverse(),
            None => self.camera.view_matrix(),
        }
    }

    /// Combined view-projection matrix.
    pub fn view_projection(&self, graph: &SceneGraph) -> Mat4 {
        self.camera.projection_matrix() * self.view_matrix(graph)
    }
}

/// The six selectable views and which one is active.
#[derive(Clone, Debug)]
pub struct ViewRig {
    views: Vec<View>,
    current: usize,
    ortho_ratio: f32,
}

impl ViewRig {
    /// Build the views. `claw_mount` carries the downward-looking claw camera.
    pub fn new(config: &ViewConfig, claw_mount: SceneNodeId) -> Self {
        let [width, height] = config.viewport;
        let half_w = width / config.ortho_ratio;
        let half_h = height / config.ortho_ratio;
        let aspect = width / height;
        let ortho = |position: Vec3| {
            Camera::orthographic(position, half_w, half_h, config.near, config.far)
                .looking_at(config.target)
        };

        // Looks straight down with the top of the image along the jib (+X)
        let mut claw_camera = Camera::perspective(Vec3::ZERO, config.claw_fov, aspect, config.near, config.far);
        claw_camera.rotation = Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2)
            * Quat::from_rotation_z(-std::f32::consts::FRAC_PI_2);

        let views = vec![
            View { name: "front", camera: ortho(config.front_position), mount: None },
            View { name: "side", camera: ortho(config.side_position), mount: None },
            View { name: "top", camera: ortho(config.top_position), mount: None },
            View { name: "fixed-orthographic", camera: ortho(config.fixed_position), mount: None },
            View {
                name: "fixed-perspective",
                camera: Camera::perspective(config.fixed_position, config.perspective_fov, aspect, config.near, config.far)
                    .looking_at(config.target),
                mount: None,
            },
            View { name: "claw", camera: claw_camera, mount: Some(claw_mount) },
        ];

        Self {
            views,
            current: 0,
            ortho_ratio: config.ortho_ratio,
        }
    }

    /// Switch to view `index`. Returns whether the active view changed.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.views.len() || index == self.current {
            return false;
        }
        log::debug!("View: {} -> {}", self.views[self.current].name, self.views[index].name);
        self.current = index;
        true
    }

    /// Index of the active view.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The active view.
    pub fn current(&self) -> &View {
        &self.views[self.current]
    }

    /// View by index.
    pub fn get(&self, index: usize) -> Option<&View> {
        self.views.get(index)
    }

    /// Recompute projections for a new viewport. Degenerate sizes are ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        for view in &mut self.views {
            view.camera.resize(width, height, self.ortho_ratio);
        }
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}
