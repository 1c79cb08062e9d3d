//! Per-frame crane motion with clamp-and-snap limits.
//!
//! Every step is `rate * elapsed / reference_frame`, so motion speed does not
//! depend on the frame rate. A step that would reach or pass a limit in its
//! direction of travel lands exactly on the limit instead.

use crate::core::input::Axis;

use super::config::{CLAW_CLOSED, CLAW_OPEN, CraneLimits, MotionConfig};
use super::rig::CranePose;

/// Advances a [`CranePose`] along one axis at a time.
#[derive(Clone, Debug)]
pub struct MotionIntegrator {
    config: MotionConfig,
    limits: CraneLimits,
}

impl MotionIntegrator {
    pub fn new(config: MotionConfig, limits: CraneLimits) -> Self {
        Self { config, limits }
    }

    pub fn limits(&self) -> &CraneLimits {
        &self.limits
    }

    /// Number of reference frames covered by `elapsed` seconds.
    fn frames(&self, elapsed: f32) -> f32 {
        elapsed / self.config.reference_frame
    }

    /// Move along `axis`. Used for manual control.
    pub fn drive(&self, pose: &mut CranePose, axis: Axis, direction: f32, elapsed: f32) {
        match axis {
            Axis::Rotate => self.rotate_crane(pose, direction, elapsed),
            Axis::Trolley => self.move_trolley(pose, direction, elapsed),
            Axis::Rope => self.move_rope(pose, direction, elapsed),
            Axis::Claw => self.move_claw(pose, direction, elapsed),
        }
    }

    /// Slew the upper section. Positive turns counter-clockwise seen from above.
    pub fn rotate_crane(&self, pose: &mut CranePose, direction: f32, elapsed: f32) {
        if direction == 0.0 {
            return;
        }
        pose.yaw += direction * self.config.rotate_degrees.to_radians() * self.frames(elapsed);
    }

    /// Run the trolley along the jib. Positive moves toward the jib tip.
    pub fn move_trolley(&self, pose: &mut CranePose, direction: f32, elapsed: f32) {
        if direction == 0.0 {
            return;
        }
        let step = direction * self.config.trolley_speed * self.frames(elapsed);
        let target = pose.trolley_x + step;

        pose.trolley_x = if step > 0.0 && target >= self.limits.trolley_max {
            self.limits.trolley_max
        } else if step < 0.0 && target <= self.limits.trolley_min {
            self.limits.trolley_min
        } else {
            target
        };
    }

    /// Reel the rope. Positive raises the claw.
    ///
    /// The cable scale follows the claw so the cable always spans from the
    /// trolley to the claw section.
    pub fn move_rope(&self, pose: &mut CranePose, direction: f32, elapsed: f32) {
        if direction == 0.0 {
            return;
        }
        let step = direction * self.config.rope_speed * self.frames(elapsed);
        let length = self.limits.cable_length * pose.cable_scale;
        let floor = self.limits.claw_floor();
        let rest = self.limits.claw_rest;

        if step < 0.0 && pose.claw_y + step <= floor {
            let travel = floor - pose.claw_y;
            pose.cable_scale *= (length - travel) / length;
            pose.claw_y += travel;
        } else if step > 0.0 && pose.claw_y + step >= rest {
            let travel = rest - pose.claw_y;
            pose.cable_scale *= (length - travel) / length;
            pose.claw_y = rest;
        } else {
            pose.cable_scale *= (length - step) / length;
            pose.claw_y += step;
        }
    }

    /// Open or close the claw. Positive closes.
    pub fn move_claw(&self, pose: &mut CranePose, direction: f32, elapsed: f32) {
        if direction == 0.0 {
            return;
        }
        let step = direction * self.config.claw_degrees.to_radians() * self.frames(elapsed);
        let target = pose.claw_angle - step;

        pose.claw_angle = if step < 0.0 && target >= CLAW_OPEN {
            CLAW_OPEN
        } else if step > 0.0 && target <= CLAW_CLOSED {
            CLAW_CLOSED
        } else {
            target
        };
    }
}
