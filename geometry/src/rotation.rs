use glam::EulerRot;

use crate::Quaternion;

/// Converts roll / pitch / yaw (radians, rotations around x / y / z) into a quaternion.
///
/// Follows the ROS convention: yaw is applied first, then pitch, then roll, all around the moving
/// axes.
pub fn quaternion_from_euler(roll: f64, pitch: f64, yaw: f64) -> Quaternion {
    Quaternion::from_euler(EulerRot::ZYX, yaw, pitch, roll)
}

/// A rotation around the z axis only, from an angle in degrees.
pub fn yaw_from_degrees(degrees: f64) -> Quaternion {
    quaternion_from_euler(0.0, 0.0, degrees.to_radians())
}
