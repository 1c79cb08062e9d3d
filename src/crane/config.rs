//! Crane configuration: dimensions, motion rates, pick-and-place thresholds
//! and load placement.

use std::f32::consts::PI;
use std::fs;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::scene::{Shape, ViewConfig};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Full crane scene configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CraneConfig {
    /// Part sizes of the crane.
    pub dimensions: CraneDimensions,
    /// Per-axis motion rates.
    pub motion: MotionConfig,
    /// Stage thresholds of the automatic pick-and-place cycle.
    pub sequence: SequenceConfig,
    /// Camera placement.
    pub views: ViewConfig,
    /// Centre of the drop-off container on the ground.
    pub container_position: Vec3,
    /// Height of the ground plane the claw may not go below.
    pub ground_height: f32,
    /// Loads, in proximity-test order.
    pub loads: Vec<LoadConfig>,
}

impl Default for CraneConfig {
    fn default() -> Self {
        let dimensions = CraneDimensions::default();
        let container_x = 3.5 / 5.0 * dimensions.jib.x;
        Self {
            dimensions,
            motion: MotionConfig::default(),
            sequence: SequenceConfig::default(),
            views: ViewConfig::default(),
            container_position: Vec3::new(container_x, 0.0, 0.0),
            ground_height: 0.0,
            loads: LoadConfig::defaults(),
        }
    }
}

impl CraneConfig {
    /// Read a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path.as_ref())?;
        let config: CraneConfig = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        Ok(())
    }

    /// Reject configurations the pick-and-place cycle cannot complete with.
    pub fn validate(&self) -> Result<()> {
        let dims = &self.dimensions;
        for (name, size) in [
            ("base", dims.base),
            ("tower", dims.tower),
            ("cabin", dims.cabin),
            ("jib", dims.jib),
            ("counter_jib", dims.counter_jib),
            ("apex", dims.apex),
            ("counter_weight", dims.counter_weight),
            ("trolley", dims.trolley),
            ("claw", dims.claw),
        ] {
            if size.min_element() <= 0.0 {
                return Err(Error::Config(format!("{} dimensions must be positive, got {:?}", name, size)));
            }
        }
        if dims.cable_length <= 0.0 || dims.cable_radius <= 0.0 || dims.block <= 0.0 {
            return Err(Error::Config("cable and block sizes must be positive".into()));
        }
        if self.motion.reference_frame <= 0.0 {
            return Err(Error::Config(format!(
                "motion.reference_frame must be positive, got {}",
                self.motion.reference_frame
            )));
        }

        let limits = CraneLimits::from_config(self);
        if limits.trolley_min >= limits.trolley_max {
            return Err(Error::Config(format!(
                "jib too short for trolley travel: [{}, {}]",
                limits.trolley_min, limits.trolley_max
            )));
        }
        if !(limits.trolley_min..=limits.trolley_max).contains(&dims.trolley_start) {
            return Err(Error::Config(format!(
                "trolley_start {} outside [{}, {}]",
                dims.trolley_start, limits.trolley_min, limits.trolley_max
            )));
        }

        let seq = &self.sequence;
        if !(limits.trolley_min..=limits.trolley_max).contains(&seq.drop_trolley_x) {
            return Err(Error::Config(format!(
                "sequence.drop_trolley_x {} outside trolley travel [{}, {}]",
                seq.drop_trolley_x, limits.trolley_min, limits.trolley_max
            )));
        }
        if seq.hoisted_scale < 1.0 {
            return Err(Error::Config(format!(
                "sequence.hoisted_scale {} is below the retracted cable scale 1.0",
                seq.hoisted_scale
            )));
        }
        let max_scale = limits.max_cable_scale();
        if seq.lowered_scale <= seq.hoisted_scale || seq.lowered_scale >= max_scale {
            return Err(Error::Config(format!(
                "sequence.lowered_scale {} must lie in ({}, {})",
                seq.lowered_scale, seq.hoisted_scale, max_scale
            )));
        }
        for (name, angle) in [
            ("pre_grip_angle", seq.pre_grip_angle),
            ("grip_angle", seq.grip_angle),
            ("release_angle", seq.release_angle),
        ] {
            if !(CLAW_CLOSED..=CLAW_OPEN).contains(&angle) {
                return Err(Error::Config(format!(
                    "sequence.{} {} outside claw range [{}, {}]",
                    name, angle, CLAW_CLOSED, CLAW_OPEN
                )));
            }
        }

        if self.loads.is_empty() {
            return Err(Error::Config("at least one load is required".into()));
        }
        for load in &self.loads {
            if load.bounding_radius() <= 0.0 {
                return Err(Error::Config(format!("load '{}' has a non-positive radius", load.name)));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Claw finger angle when fully open.
pub const CLAW_OPEN: f32 = 0.0;
/// Claw finger angle when fully closed.
pub const CLAW_CLOSED: f32 = -PI / 2.0;

/// Part sizes as (length along X, height, width along Z).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CraneDimensions {
    pub base: Vec3,
    pub tower: Vec3,
    pub cabin: Vec3,
    pub jib: Vec3,
    pub counter_jib: Vec3,
    pub apex: Vec3,
    pub counter_weight: Vec3,
    pub pendant_radius: f32,
    pub trolley: Vec3,
    pub cable_radius: f32,
    /// Unscaled cable length; the cable scale factor multiplies this.
    pub cable_length: f32,
    /// Edge of the cubic claw block.
    pub block: f32,
    /// Finger size; X is the finger length and doubles as the claw's proximity radius.
    pub claw: Vec3,
    /// Initial trolley position along the jib.
    pub trolley_start: f32,
    /// Gap kept between the trolley and the jib tip.
    pub jib_tip_clearance: f32,
}

impl Default for CraneDimensions {
    fn default() -> Self {
        Self {
            base: Vec3::new(15.0, 10.0, 15.0),
            tower: Vec3::new(5.0, 70.0, 5.0),
            cabin: Vec3::new(8.0, 5.0, 5.0),
            jib: Vec3::new(75.0, 5.0, 5.0),
            counter_jib: Vec3::new(30.0, 5.0, 5.0),
            apex: Vec3::new(5.0, 15.0, 5.0),
            counter_weight: Vec3::new(8.0, 5.0, 5.1),
            pendant_radius: 1.0,
            trolley: Vec3::new(5.0, 5.0, 2.5),
            cable_radius: 1.0,
            cable_length: 10.0,
            block: 5.0,
            claw: Vec3::new(8.0, 3.0, 3.0),
            trolley_start: 15.0,
            jib_tip_clearance: 0.1,
        }
    }
}

impl CraneDimensions {
    /// Height of the slewing upper section above the crane origin.
    pub fn upper_height(&self) -> f32 {
        self.base.y + self.tower.y
    }

    /// Centre of the jib along X in the upper section's frame.
    pub fn jib_center_x(&self) -> f32 {
        self.apex.x / 2.0 + self.jib.x / 2.0
    }

    /// Height of the trolley assembly in the upper section's frame.
    pub fn trolley_height(&self) -> f32 {
        self.cabin.y
    }

    /// Claw section height (trolley frame) with the cable fully retracted.
    pub fn claw_rest_height(&self) -> f32 {
        -self.cable_length - self.block
    }
}

/// Motion rates. Each step is scaled by `elapsed / reference_frame`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Frame time the rates below were tuned for, in seconds.
    pub reference_frame: f32,
    /// Slewing rate in degrees per reference frame.
    pub rotate_degrees: f32,
    /// Finger rate in degrees per reference frame.
    pub claw_degrees: f32,
    /// Trolley travel per reference frame.
    pub trolley_speed: f32,
    /// Rope travel per reference frame.
    pub rope_speed: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            reference_frame: 0.015,
            rotate_degrees: 1.0,
            claw_degrees: 1.0,
            trolley_speed: 0.5,
            rope_speed: 0.5,
        }
    }
}

/// Thresholds of the pick-and-place stages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceConfig {
    /// Finger angle to reach before the load is attached.
    pub pre_grip_angle: f32,
    /// Finger angle that counts as gripped.
    pub grip_angle: f32,
    /// Cable scale at or below which the rope counts as hoisted.
    pub hoisted_scale: f32,
    /// Trolley position above the drop-off point.
    pub drop_trolley_x: f32,
    /// Cable scale at or above which the load counts as lowered.
    pub lowered_scale: f32,
    /// Finger angle at or above which the load is let go.
    pub release_angle: f32,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            pre_grip_angle: -PI / 10.0,
            grip_angle: -PI / 4.0,
            hoisted_scale: 1.02,
            drop_trolley_x: 55.0,
            lowered_scale: 7.0,
            release_angle: -PI / 10.0,
        }
    }
}

/// One load placed in the world.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoadConfig {
    pub name: String,
    pub shape: Shape,
    pub position: Vec3,
    /// XYZ Euler rotation in radians.
    #[serde(default)]
    pub rotation: Vec3,
    /// Proximity radius; defaults to the shape's nominal radius.
    #[serde(default)]
    pub radius: Option<f32>,
    pub color: u32,
}

impl LoadConfig {
    pub fn bounding_radius(&self) -> f32 {
        self.radius.unwrap_or_else(|| self.shape.nominal_radius())
    }

    /// The five loads scattered around the crane.
    pub fn defaults() -> Vec<LoadConfig> {
        const BROWN: u32 = 0x5c2107;
        const OLIVE: u32 = 0x64731e;
        let load = |name: &str, shape: Shape, position: Vec3, color: u32| LoadConfig {
            name: name.to_string(),
            shape,
            position,
            rotation: Vec3::ZERO,
            radius: None,
            color,
        };
        vec![
            load("cube", Shape::cube(8.0), Vec3::new(-41.0, 4.0, -20.0), OLIVE),
            load("dodecahedron", Shape::Dodecahedron { radius: 2.0 }, Vec3::new(24.0, 2.0, 42.0), OLIVE),
            load("icosahedron", Shape::Icosahedron { radius: 2.5 }, Vec3::new(-10.0, 2.5, 45.0), BROWN),
            load("torus", Shape::Torus { radius: 3.0, tube: 1.0 }, Vec3::new(-34.0, 3.0, 30.0), OLIVE),
            LoadConfig {
                rotation: Vec3::new(PI / 2.0, 0.0, 0.0),
                ..load(
                    "knot",
                    Shape::TorusKnot { radius: 4.0, tube: 4.0 / 3.0 },
                    Vec3::new(-17.0, 4.0, -50.0),
                    BROWN,
                )
            },
        ]
    }
}

// ---------------------------------------------------------------------------
// Derived limits
// ---------------------------------------------------------------------------

/// Mechanical limits derived from the dimensions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CraneLimits {
    /// Trolley position closest to the cabin.
    pub trolley_min: f32,
    /// Trolley position closest to the jib tip.
    pub trolley_max: f32,
    /// Claw section height (trolley frame) with the rope fully retracted.
    pub claw_rest: f32,
    /// Ground height the claw tips may not go below.
    pub ground: f32,
    /// Finger length; the claw tips hang this far below the claw section.
    pub claw_length: f32,
    /// Upper section plus trolley height above the crane origin.
    pub trolley_elevation: f32,
    /// Unscaled cable length.
    pub cable_length: f32,
}

impl CraneLimits {
    pub fn from_config(config: &CraneConfig) -> Self {
        let dims = &config.dimensions;
        let jib_x = dims.jib_center_x();
        Self {
            trolley_min: jib_x - dims.jib.x / 2.0 + dims.cabin.x / 2.0 + dims.trolley.x / 2.0,
            trolley_max: jib_x + dims.jib.x / 2.0 - dims.trolley.x / 2.0 - dims.jib_tip_clearance,
            claw_rest: dims.claw_rest_height(),
            ground: config.ground_height,
            claw_length: dims.claw.x,
            trolley_elevation: dims.upper_height() + dims.trolley_height(),
            cable_length: dims.cable_length,
        }
    }

    /// Lowest claw section height (trolley frame) before the tips touch the ground.
    pub fn claw_floor(&self) -> f32 {
        self.ground + self.claw_length - self.trolley_elevation
    }

    /// Cable scale with the claw resting on the ground.
    pub fn max_cable_scale(&self) -> f32 {
        (self.cable_length + self.claw_rest - self.claw_floor()) / self.cable_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        CraneConfig::default().validate().unwrap();
    }

    #[test]
    fn test_default_limits() {
        let limits = CraneLimits::from_config(&CraneConfig::default());
        assert!((limits.trolley_min - 9.0).abs() < 1e-5);
        assert!((limits.trolley_max - 74.9).abs() < 1e-4);
        assert_eq!(limits.claw_rest, -15.0);
        assert_eq!(limits.trolley_elevation, 85.0);
        assert!((limits.claw_floor() + 77.0).abs() < 1e-5);
        assert!((limits.max_cable_scale() - 7.2).abs() < 1e-5);
    }

    #[test]
    fn test_default_loads() {
        let config = CraneConfig::default();
        let names: Vec<_> = config.loads.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["cube", "dodecahedron", "icosahedron", "torus", "knot"]);
        let radii: Vec<_> = config.loads.iter().map(|l| l.bounding_radius()).collect();
        assert_eq!(radii, [4.0, 2.0, 2.5, 3.0, 4.0]);
        assert_eq!(config.container_position, Vec3::new(52.5, 0.0, 0.0));
    }

    #[test]
    fn test_rejects_unreachable_drop_point() {
        let mut config = CraneConfig::default();
        config.sequence.drop_trolley_x = 80.0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_lowering_past_ground() {
        let mut config = CraneConfig::default();
        config.sequence.lowered_scale = 7.5;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_unreachable_hoist() {
        let mut config = CraneConfig::default();
        config.sequence.hoisted_scale = 0.9;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_loads() {
        let config = CraneConfig { loads: Vec::new(), ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_reference_frame() {
        let mut config = CraneConfig::default();
        config.motion.reference_frame = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crane.json");

        let mut config = CraneConfig::default();
        config.sequence.drop_trolley_x = 60.0;
        config.save(&path).unwrap();

        let loaded = CraneConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.json");
        fs::write(&path, r#"{ "sequence": { "drop_trolley_x": 40.0 } }"#).unwrap();

        let loaded = CraneConfig::load(&path).unwrap();
        assert_eq!(loaded.sequence.drop_trolley_x, 40.0);
        assert_eq!(loaded.sequence.lowered_scale, 7.0);
        assert_eq!(loaded.loads.len(), 5);
    }

    #[test]
    fn test_load_missing_file() {
        let err = CraneConfig::load("/nonexistent/crane.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_load_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(CraneConfig::load(&path), Err(Error::Json(_))));
    }
}
