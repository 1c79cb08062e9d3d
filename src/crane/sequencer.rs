//! Automatic pick-and-place cycle.
//!
//! Once a load is latched the sequencer takes over the crane: it grips the
//! load, hoists it, slews back to the drop-off heading, runs the trolley over
//! the container, lowers, releases and hoists again. Manual input is ignored
//! until the cycle resets.

use glam::Vec3;

use crate::math::{crossed, wrap_angle};
use crate::scene::{LocalTransform, SceneGraph};

use super::config::SequenceConfig;
use super::load::{Load, LoadId};
use super::motion::MotionIntegrator;
use super::rig::CraneRig;

use std::f32::consts::PI;

/// Stage of the pick-and-place cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Bring the claw to the pre-grip angle from either side.
    PreGrip,
    /// Hang the load under the claw.
    Attach,
    /// Close the claw on the load.
    Grip,
    /// Reel the rope in.
    Hoist,
    /// Slew to the nearest full-turn heading.
    Slew,
    /// Run the trolley over the drop-off point.
    Traverse,
    /// Pay the rope out.
    Lower,
    /// Open the claw.
    Release,
    /// Hand the load back to the world.
    Detach,
    /// Reel the rope in again. Behaves exactly like [`Stage::Hoist`].
    Retract,
    /// Clear the latched load and start over.
    Reset,
}

impl Stage {
    pub const ALL: [Stage; 11] = [
        Stage::PreGrip,
        Stage::Attach,
        Stage::Grip,
        Stage::Hoist,
        Stage::Slew,
        Stage::Traverse,
        Stage::Lower,
        Stage::Release,
        Stage::Detach,
        Stage::Retract,
        Stage::Reset,
    ];

    /// Position in the cycle; `Reset` is 10.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stage at `index`. Anything past the last numbered stage resets.
    pub fn from_index(index: usize) -> Stage {
        Stage::ALL.get(index).copied().unwrap_or(Stage::Reset)
    }

    /// The stage that follows this one.
    pub fn next(self) -> Stage {
        Stage::from_index(self.index() + 1)
    }
}

/// Drives the crane through one pick-and-place cycle per latched load.
#[derive(Clone, Debug)]
pub struct Sequencer {
    config: SequenceConfig,
    stage: Stage,
    active: Option<LoadId>,
}

impl Sequencer {
    pub fn new(config: SequenceConfig) -> Self {
        Self {
            config,
            stage: Stage::PreGrip,
            active: None,
        }
    }

    /// Start a cycle for `load`. Ignored while another cycle is running.
    pub fn latch(&mut self, load: LoadId) -> bool {
        if self.active.is_some() {
            return false;
        }
        self.active = Some(load);
        self.stage = Stage::PreGrip;
        true
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn active_load(&self) -> Option<LoadId> {
        self.active
    }

    /// Run one frame of the current stage. Does nothing without a latched load.
    pub fn step(
        &mut self,
        rig: &mut CraneRig,
        motion: &MotionIntegrator,
        graph: &mut SceneGraph,
        loads: &[Load],
        elapsed: f32,
    ) {
        let Some(active) = self.active else {
            return;
        };
        let load = loads
            .get(active.0)
            .unwrap_or_else(|| panic!("latched load {:?} is not registered", active));

        let cfg = &self.config;
        let pose = &mut rig.pose;

        let done = match self.stage {
            Stage::PreGrip => {
                let direction = if pose.claw_angle > cfg.pre_grip_angle { 1.0 } else { -1.0 };
                motion.move_claw(pose, direction, elapsed);
                // Closing lowers the angle, so travel runs opposite to the claw direction
                crossed(pose.claw_angle, cfg.pre_grip_angle, -direction)
            }
            Stage::Attach => {
                graph.reparent(load.node, rig.nodes.claw_section);
                graph.transform_mut(load.node).position = Vec3::new(0.0, -load.radius, 0.0);
                true
            }
            Stage::Grip => {
                motion.move_claw(pose, 1.0, elapsed);
                crossed(pose.claw_angle, cfg.grip_angle, -1.0)
            }
            Stage::Hoist | Stage::Retract => {
                motion.move_rope(pose, 1.0, elapsed);
                crossed(pose.cable_scale, cfg.hoisted_scale, -1.0)
            }
            Stage::Slew => {
                let direction = if wrap_angle(pose.yaw) > PI { 1.0 } else { -1.0 };
                motion.rotate_crane(pose, direction, elapsed);
                // Done once the heading wraps past the full turn
                !crossed(wrap_angle(pose.yaw), PI, direction)
            }
            Stage::Traverse => {
                let direction = if pose.trolley_x < cfg.drop_trolley_x { 1.0 } else { -1.0 };
                motion.move_trolley(pose, direction, elapsed);
                crossed(pose.trolley_x, cfg.drop_trolley_x, direction)
            }
            Stage::Lower => {
                motion.move_rope(pose, -1.0, elapsed);
                crossed(pose.cable_scale, cfg.lowered_scale, 1.0)
            }
            Stage::Release => {
                motion.move_claw(pose, -1.0, elapsed);
                crossed(pose.claw_angle, cfg.release_angle, 1.0)
            }
            Stage::Detach => {
                rig.apply(graph);
                let world = graph.world_matrix(load.node);
                graph.reparent(load.node, graph.root());
                let transform = graph.transform_mut(load.node);
                transform.position = Vec3::ZERO;
                *transform = LocalTransform::from_mat4(world * transform.to_mat4());
                log::info!("Released load '{}' at {:?}", load.name, transform.position);
                true
            }
            Stage::Reset => {
                log::info!("Pick-and-place cycle for '{}' complete", load.name);
                self.reset();
                return;
            }
        };

        if done {
            let next = self.stage.next();
            log::debug!("Stage {:?} -> {:?}", self.stage, next);
            self.stage = next;
        }
    }

    fn reset(&mut self) {
        self.stage = Stage::PreGrip;
        self.active = None;
    }
}
