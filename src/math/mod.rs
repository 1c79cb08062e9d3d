//! Mathematical utilities

pub mod sphere;
pub mod threshold;

pub use sphere::Sphere;
pub use threshold::{crossed, wrap_angle};
