//! Crane session: owns the scene and runs one simulation step per frame.

use glam::{Mat4, Vec3};
use winit::event::WindowEvent;
use winit::keyboard::KeyCode;

use crate::core::input::{Axis, Command, InputLatch};
use crate::core::time::Clock;
use crate::core::Result;
use crate::scene::{DrawItem, SceneGraph, SceneNodeId, ViewRig};

use super::build::CraneScene;
use super::config::{CraneConfig, CraneLimits};
use super::load::{Load, LoadId};
use super::motion::MotionIntegrator;
use super::proximity::find_collision;
use super::rig::{CranePose, CraneRig};
use super::sequencer::{Sequencer, Stage};

/// What a renderer needs to draw one frame.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Name of the active view.
    pub view: &'static str,
    pub view_projection: Mat4,
    /// Active camera position in world space.
    pub eye: Vec3,
    pub items: Vec<DrawItem>,
}

/// A running crane scene.
pub struct CraneSim {
    config: CraneConfig,
    graph: SceneGraph,
    rig: CraneRig,
    loads: Vec<Load>,
    container: SceneNodeId,
    motion: MotionIntegrator,
    sequencer: Sequencer,
    input: InputLatch,
    views: ViewRig,
    frame_count: u64,
}

impl CraneSim {
    /// Validate `config` and build the scene.
    pub fn new(config: CraneConfig) -> Result<Self> {
        config.validate()?;

        let CraneScene { graph, rig, loads, container } = CraneScene::build(&config);
        let limits = CraneLimits::from_config(&config);
        let views = ViewRig::new(&config.views, rig.nodes.claw_section);

        log::info!(
            "Crane ready: {} loads, trolley travel [{:.1}, {:.1}], max cable scale {:.2}",
            loads.len(),
            limits.trolley_min,
            limits.trolley_max,
            limits.max_cable_scale()
        );

        Ok(Self {
            motion: MotionIntegrator::new(config.motion.clone(), limits),
            sequencer: Sequencer::new(config.sequence.clone()),
            input: InputLatch::new(),
            config,
            graph,
            rig,
            loads,
            container,
            views,
            frame_count: 0,
        })
    }

    /// Press a key. Commands bound to the key run immediately.
    pub fn key_down(&mut self, key: KeyCode) -> Option<Command> {
        let command = self.input.key_down(key);
        if let Some(command) = command {
            self.execute(command);
        }
        command
    }

    /// Release a key.
    pub fn key_up(&mut self, key: KeyCode) {
        self.input.key_up(key);
    }

    /// Feed a window event. Returns true if the event was consumed.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::Resized(size) => {
                self.resize(size.width as f32, size.height as f32);
                true
            }
            WindowEvent::KeyboardInput { .. } => {
                if let Some(command) = self.input.process_event(event) {
                    self.execute(command);
                }
                true
            }
            _ => false,
        }
    }

    fn execute(&mut self, command: Command) {
        match command {
            Command::SelectView(index) => {
                self.views.select(index);
            }
            Command::ToggleWireframe => {
                self.graph.materials_mut().toggle_wireframe();
                log::debug!("Toggled wireframe on {} materials", self.graph.materials().len());
            }
        }
    }

    /// Adapt every view to a new viewport size.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.views.resize(width, height);
    }

    /// Advance the simulation by `elapsed` seconds.
    ///
    /// While no load is latched the claw is tested against every load and the
    /// crane follows the keyboard. Once one is latched the sequencer drives the
    /// crane and keyboard motion is ignored.
    pub fn update(&mut self, elapsed: f32) {
        self.frame_count += 1;

        if !self.sequencer.is_active() {
            let claw = self.rig.nodes.claw_section;
            let claw_radius = self.config.dimensions.claw.x;
            if let Some(id) = find_collision(&self.graph, claw, claw_radius, &self.loads) {
                log::info!("Claw reached load '{}', starting pick-and-place", self.loads[id.0].name);
                self.sequencer.latch(id);
            }
        }

        if self.sequencer.is_active() {
            self.sequencer
                .step(&mut self.rig, &self.motion, &mut self.graph, &self.loads, elapsed);
        } else {
            for axis in Axis::ALL {
                let direction = self.input.direction(axis) as f32;
                self.motion.drive(&mut self.rig.pose, axis, direction, elapsed);
            }
        }

        self.rig.apply(&mut self.graph);
    }

    /// Pull the elapsed time from `clock` and update. Returns the elapsed time.
    pub fn advance(&mut self, clock: &mut dyn Clock) -> f32 {
        let elapsed = clock.delta();
        self.update(elapsed);
        elapsed
    }

    /// Draw list and camera for the active view.
    pub fn frame(&mut self) -> Frame {
        let items = self.graph.flatten();
        let view = self.views.current();
        Frame {
            view: view.name,
            view_projection: view.view_projection(&self.graph),
            eye: view.world_matrix(&self.graph).transform_point3(Vec3::ZERO),
            items,
        }
    }

    pub fn pose(&self) -> &CranePose {
        &self.rig.pose
    }

    pub fn rig(&self) -> &CraneRig {
        &self.rig
    }

    pub fn stage(&self) -> Stage {
        self.sequencer.stage()
    }

    pub fn is_latched(&self) -> bool {
        self.sequencer.is_active()
    }

    pub fn active_load(&self) -> Option<&Load> {
        self.sequencer.active_load().and_then(|id| self.loads.get(id.0))
    }

    pub fn loads(&self) -> &[Load] {
        &self.loads
    }

    pub fn load(&self, id: LoadId) -> Option<&Load> {
        self.loads.get(id.0)
    }

    /// Current world position of a load.
    pub fn load_position(&self, id: LoadId) -> Option<Vec3> {
        self.load(id).map(|load| self.graph.world_position(load.node))
    }

    pub fn container(&self) -> SceneNodeId {
        self.container
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn views(&self) -> &ViewRig {
        &self.views
    }

    pub fn input(&self) -> &InputLatch {
        &self.input
    }

    pub fn config(&self) -> &CraneConfig {
        &self.config
    }

    pub fn limits(&self) -> &CraneLimits {
        self.motion.limits()
    }

    /// Number of updates run so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
