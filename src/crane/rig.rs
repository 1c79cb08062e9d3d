//! Typed handles to the crane's scene nodes and the pose that drives them.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Quat, Vec3};

use crate::scene::{SceneGraph, SceneNodeId};

use super::config::CraneDimensions;

/// One of the four claw fingers, spaced a quarter turn apart around the claw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Finger {
    Front,
    Left,
    Back,
    Right,
}

impl Finger {
    pub const ALL: [Finger; 4] = [Finger::Front, Finger::Left, Finger::Back, Finger::Right];

    pub fn index(self) -> usize {
        match self {
            Finger::Front => 0,
            Finger::Left => 1,
            Finger::Back => 2,
            Finger::Right => 3,
        }
    }

    /// Rotation about Y that points the finger tip outward.
    pub fn mount_yaw(self) -> f32 {
        match self {
            Finger::Front => 0.0,
            Finger::Left => FRAC_PI_2,
            Finger::Back => PI,
            Finger::Right => 1.5 * PI,
        }
    }

    /// Sign applied to the claw angle for this finger.
    ///
    /// Front and left follow the claw angle directly; back and right mirror it.
    pub fn hinge_sign(self) -> f32 {
        match self {
            Finger::Front | Finger::Left => 1.0,
            Finger::Back | Finger::Right => -1.0,
        }
    }

    /// Parent-frame axis the hinge turns about.
    pub fn hinge_axis(self) -> Vec3 {
        match self {
            Finger::Front | Finger::Back => Vec3::Z,
            Finger::Left | Finger::Right => Vec3::X,
        }
    }

    /// Local rotation of the finger for a front claw angle.
    pub fn rotation(self, claw_angle: f32) -> Quat {
        Quat::from_axis_angle(self.hinge_axis(), self.hinge_sign() * claw_angle)
            * Quat::from_rotation_y(self.mount_yaw())
    }
}

/// Scene nodes making up the crane.
#[derive(Clone, Debug)]
pub struct CraneNodes {
    /// Crane origin on the ground.
    pub crane: SceneNodeId,
    pub base: SceneNodeId,
    pub tower: SceneNodeId,
    /// Slewing part: everything above the tower.
    pub upper_section: SceneNodeId,
    pub cabin: SceneNodeId,
    pub apex: SceneNodeId,
    pub jib: SceneNodeId,
    pub counter_jib: SceneNodeId,
    pub counter_weight: SceneNodeId,
    pub rear_pendant: SceneNodeId,
    pub front_pendant: SceneNodeId,
    /// Travels along the jib; carries the trolley, cable and claw.
    pub trolley_assembly: SceneNodeId,
    pub trolley: SceneNodeId,
    pub cable: SceneNodeId,
    /// Hangs from the cable; loads are attached here.
    pub claw_section: SceneNodeId,
    pub block: SceneNodeId,
    pub fingers: [SceneNodeId; 4],
}

impl CraneNodes {
    pub fn finger(&self, finger: Finger) -> SceneNodeId {
        self.fingers[finger.index()]
    }
}

/// Joint values of the crane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CranePose {
    /// Upper section rotation about Y, radians, unbounded.
    pub yaw: f32,
    /// Trolley position along the jib.
    pub trolley_x: f32,
    /// Claw section height in the trolley frame.
    pub claw_y: f32,
    /// Cable length as a multiple of its unscaled length.
    pub cable_scale: f32,
    /// Front finger angle: 0 open, -PI/2 closed.
    pub claw_angle: f32,
}

impl CranePose {
    /// Rope retracted, claw open, trolley at its starting point.
    pub fn rest(dims: &CraneDimensions) -> Self {
        Self {
            yaw: 0.0,
            trolley_x: dims.trolley_start,
            claw_y: dims.claw_rest_height(),
            cable_scale: 1.0,
            claw_angle: 0.0,
        }
    }

    /// Hinge angle of each finger, indexed by [`Finger::index`].
    pub fn finger_angles(&self) -> [f32; 4] {
        Finger::ALL.map(|finger| finger.hinge_sign() * self.claw_angle)
    }
}

/// The crane's node handles together with its current pose.
#[derive(Clone, Debug)]
pub struct CraneRig {
    pub nodes: CraneNodes,
    pub pose: CranePose,
    cable_length: f32,
}

impl CraneRig {
    pub fn new(nodes: CraneNodes, pose: CranePose, cable_length: f32) -> Self {
        Self { nodes, pose, cable_length }
    }

    /// Write the pose into the scene graph's local transforms.
    pub fn apply(&self, graph: &mut SceneGraph) {
        let pose = &self.pose;
        let nodes = &self.nodes;

        graph.transform_mut(nodes.upper_section).rotation = Quat::from_rotation_y(pose.yaw);
        graph.transform_mut(nodes.trolley_assembly).position.x = pose.trolley_x;

        // Cable hangs from the trolley: its centre sits half its length below
        let cable = graph.transform_mut(nodes.cable);
        cable.position.y = -self.cable_length * pose.cable_scale / 2.0;
        cable.scale.y = pose.cable_scale;

        graph.transform_mut(nodes.claw_section).position.y = pose.claw_y;

        for finger in Finger::ALL {
            graph.transform_mut(nodes.finger(finger)).rotation = finger.rotation(pose.claw_angle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tip_direction(finger: Finger, angle: f32) -> Vec3 {
        finger.rotation(angle) * Vec3::X
    }

    #[test]
    fn test_finger_angles_mirror() {
        let pose = CranePose { claw_angle: -0.5, ..CranePose::rest(&CraneDimensions::default()) };
        assert_eq!(pose.finger_angles(), [-0.5, -0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_open_fingers_point_outward() {
        assert!((tip_direction(Finger::Front, 0.0) - Vec3::X).length() < 1e-5);
        assert!((tip_direction(Finger::Left, 0.0) - Vec3::NEG_Z).length() < 1e-5);
        assert!((tip_direction(Finger::Back, 0.0) - Vec3::NEG_X).length() < 1e-5);
        assert!((tip_direction(Finger::Right, 0.0) - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_closed_fingers_point_down() {
        for finger in Finger::ALL {
            let tip = tip_direction(finger, -FRAC_PI_2);
            assert!((tip - Vec3::NEG_Y).length() < 1e-5, "{:?} tip at {:?}", finger, tip);
        }
    }

    #[test]
    fn test_half_closed_fingers_are_symmetric() {
        let tips: Vec<Vec3> = Finger::ALL.iter().map(|f| tip_direction(*f, -PI / 4.0)).collect();
        for tip in &tips {
            assert!((tip.y + (PI / 4.0).sin()).abs() < 1e-5);
        }
        let sum: Vec3 = tips.iter().copied().sum();
        assert!(sum.x.abs() < 1e-5 && sum.z.abs() < 1e-5);
    }

    #[test]
    fn test_rest_pose() {
        let pose = CranePose::rest(&CraneDimensions::default());
        assert_eq!(pose.trolley_x, 15.0);
        assert_eq!(pose.claw_y, -15.0);
        assert_eq!(pose.cable_scale, 1.0);
        assert_eq!(pose.claw_angle, 0.0);
    }
}
