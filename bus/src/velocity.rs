use std::sync::Arc;

use anyhow::{Result, bail};
use log::{debug, info};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::{Bus, Topic, TopicOptions, messages::Twist};

/// Maximum forward speed and turn rate the UI may command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeedLimits {
    pub max_vx: f64,
    pub max_vt: f64,
}

impl Default for SpeedLimits {
    fn default() -> Self {
        Self {
            max_vx: 2.0,
            max_vt: 2.0,
        }
    }
}

impl SpeedLimits {
    pub fn validate(&self) -> Result<()> {
        for (name, limit) in [("maxVx", self.max_vx), ("maxVt", self.max_vt)] {
            if !limit.is_finite() || limit < 0.0 {
                bail!("{name} must be a non-negative number, got {limit}");
            }
        }
        Ok(())
    }
}

/// Publishes the velocity commands of the UI's joystick.
#[derive(Debug)]
pub struct VelocityPublisher {
    topic: Arc<Topic<Twist>>,
    limits: RwLock<SpeedLimits>,
}

impl VelocityPublisher {
    pub const DEFAULT_TOPIC: &'static str = "/cmd_vel";

    pub fn new(bus: &Bus, topic: &str, limits: SpeedLimits) -> Result<Self> {
        limits.validate()?;
        let topic = bus.advertise(topic, TopicOptions::new(1))?;
        Ok(Self {
            topic,
            limits: limits.into(),
        })
    }

    pub fn topic(&self) -> &Arc<Topic<Twist>> {
        &self.topic
    }

    pub fn limits(&self) -> SpeedLimits {
        *self.limits.read()
    }

    pub fn set_limits(&self, limits: SpeedLimits) -> Result<()> {
        limits.validate()?;
        info!("Speed limits: {limits:?}");
        *self.limits.write() = limits;
        Ok(())
    }

    /// Publishes a forward speed `vx` and turn rate `vt`, both clamped to the current limits.
    pub fn publish(&self, vx: f64, vt: f64) -> Result<Twist> {
        if !vx.is_finite() || !vt.is_finite() {
            bail!("{}: Invalid velocity ({vx}, {vt})", self.topic.name());
        }
        let limits = self.limits();
        let twist = Twist::planar(
            vx.clamp(-limits.max_vx, limits.max_vx),
            vt.clamp(-limits.max_vt, limits.max_vt),
        );
        debug!("Publishing {}: {twist:?}", self.topic.name());
        self.topic.publish(twist);
        Ok(twist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn publisher() -> VelocityPublisher {
        VelocityPublisher::new(
            &Bus::new(),
            VelocityPublisher::DEFAULT_TOPIC,
            SpeedLimits::default(),
        )
        .unwrap()
    }

    #[test]
    fn publishes_planar_twist() {
        let velocity = publisher();
        let mut subscription = velocity.topic().subscribe();

        velocity.publish(0.5, -0.3).unwrap();
        assert_eq!(subscription.try_recv(), Some(Twist::planar(0.5, -0.3)));
    }

    #[test]
    fn clamps_to_limits() {
        let velocity = publisher();
        velocity
            .set_limits(SpeedLimits {
                max_vx: 1.0,
                max_vt: 0.5,
            })
            .unwrap();

        assert_eq!(velocity.publish(3.0, -2.0).unwrap(), Twist::planar(1.0, -0.5));
        assert_eq!(velocity.publish(0.0, 0.0).unwrap(), Twist::planar(0.0, 0.0));
    }

    #[test]
    fn rejects_invalid_values() {
        let velocity = publisher();
        assert!(velocity.publish(f64::NAN, 0.0).is_err());
        assert!(
            velocity
                .set_limits(SpeedLimits {
                    max_vx: -1.0,
                    max_vt: 1.0
                })
                .is_err()
        );
        assert_eq!(velocity.limits(), SpeedLimits::default());
    }

    #[test]
    fn not_latched() {
        let velocity = publisher();
        velocity.publish(1.0, 1.0).unwrap();
        assert_eq!(velocity.topic().subscribe().try_recv(), None);
    }
}
