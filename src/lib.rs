//! Cranesim - tower crane simulation with an automatic pick-and-place cycle

pub mod core;
pub mod math;
pub mod scene;
pub mod crane;
