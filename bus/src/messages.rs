//! Message types, shaped like their `geometry_msgs` / `std_msgs` counterparts.
use std::time::{SystemTime, UNIX_EPOCH};

use derive_more::{Deref, Display, From};
use serde::{Deserialize, Serialize};

use tr_hmi_geometry::Quaternion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stamp {
    pub secs: u32,
    pub nsecs: u32,
}

impl Stamp {
    pub fn now() -> Self {
        SystemTime::now().into()
    }
}

impl From<SystemTime> for Stamp {
    fn from(time: SystemTime) -> Self {
        let since_epoch = time.duration_since(UNIX_EPOCH).unwrap_or_default();
        Self {
            secs: since_epoch.as_secs() as u32,
            nsecs: since_epoch.subsec_nanos(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Header {
    #[serde(default)]
    pub seq: u32,
    #[serde(default)]
    pub stamp: Stamp,
    #[serde(default)]
    pub frame_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

/// A rotation quaternion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Default for Orientation {
    fn default() -> Self {
        Quaternion::IDENTITY.into()
    }
}

impl From<Quaternion> for Orientation {
    fn from(q: Quaternion) -> Self {
        Self {
            x: q.x,
            y: q.y,
            z: q.z,
            w: q.w,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub position: Position,
    #[serde(default)]
    pub orientation: Orientation,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PoseStamped {
    #[serde(default)]
    pub header: Header,
    pub pose: Pose,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Velocity in free space, linear in m/s, angular in rad/s.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Twist {
    pub linear: Vector3,
    pub angular: Vector3,
}

impl Twist {
    /// A planar velocity: forward speed and turn rate.
    pub fn planar(vx: f64, vt: f64) -> Self {
        Self {
            linear: Vector3 {
                x: vx,
                ..Default::default()
            },
            angular: Vector3 {
                z: vt,
                ..Default::default()
            },
        }
    }
}

/// The name of the launch configuration the robot should run.
#[derive(Debug, Clone, PartialEq, Eq, Deref, Display, From, Serialize, Deserialize)]
pub struct LaunchMode(String);

impl From<&str> for LaunchMode {
    fn from(mode: &str) -> Self {
        Self(mode.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;

    #[test]
    fn pose_stamped_from_partial_json() {
        let pose: PoseStamped = serde_json::from_value(json!({
            "pose": {"position": {"x": 1.0, "y": 2.0}}
        }))
        .unwrap();

        assert_eq!(pose.pose.position, Position { x: 1.0, y: 2.0, z: 0.0 });
        assert_eq!(pose.pose.orientation, Orientation::default());
        assert_eq!(pose.header.frame_id, "");
    }

    #[test]
    fn stamp_from_system_time() {
        let stamp: Stamp = (UNIX_EPOCH + Duration::new(12, 345)).into();
        assert_eq!(stamp, Stamp { secs: 12, nsecs: 345 });
    }

    #[test]
    fn planar_twist() {
        let twist = Twist::planar(0.5, -0.25);
        assert_eq!(twist.linear.x, 0.5);
        assert_eq!(twist.angular.z, -0.25);
        assert_eq!(twist.linear.y, 0.0);
        assert_eq!(twist.angular.x, 0.0);
    }

    #[test]
    fn launch_mode_is_a_string() {
        let mode = LaunchMode::from("mapping");
        assert_eq!(mode.to_string(), "mapping");
        assert_eq!(mode.len(), 7);
        assert_eq!(serde_json::to_value(&mode).unwrap(), json!("mapping"));
    }
}
