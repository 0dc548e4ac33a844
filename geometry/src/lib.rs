//! Geometry primitives for the map canvas and the robot poses.

mod point;
mod rotation;

pub use point::*;
pub use rotation::*;

pub type Quaternion = glam::DQuat;
