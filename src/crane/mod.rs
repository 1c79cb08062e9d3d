//! Tower crane: scene construction, motion, proximity and the pick-and-place cycle.

pub mod build;
pub mod config;
pub mod load;
pub mod motion;
pub mod proximity;
pub mod rig;
pub mod sequencer;
pub mod sim;

pub use build::CraneScene;
pub use config::{CraneConfig, CraneLimits};
pub use load::{Load, LoadId};
pub use motion::MotionIntegrator;
pub use rig::{CraneNodes, CranePose, CraneRig, Finger};
pub use sequencer::{Sequencer, Stage};
pub use sim::{CraneSim, Frame};
