use std::sync::Arc;

use anyhow::{Context, Result, bail};
use log::info;
use serde::Deserialize;

use crate::{
    Bus, Topic, TopicOptions,
    messages::{PoseStamped, Stamp},
};
use tr_hmi_geometry::yaw_from_degrees;

/// The goal (or initial) pose the user is placing on the map, with the heading the user is
/// currently dragging.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalRequest {
    pub original_pose: Option<PoseStamped>,
    /// Heading in degrees.
    pub angle: Option<f64>,
}

/// Publishes goal poses so that the map UI can render the heading feedback.
#[derive(Debug)]
pub struct GoalPublisher {
    topic: Arc<Topic<PoseStamped>>,
}

impl GoalPublisher {
    pub const DEFAULT_TOPIC: &'static str = "/tr_hmi/goal";

    pub fn new(bus: &Bus, topic: &str) -> Result<Self> {
        let topic = bus.advertise(topic, TopicOptions::latched(1))?;
        Ok(Self { topic })
    }

    pub fn topic(&self) -> &Arc<Topic<PoseStamped>> {
        &self.topic
    }

    /// Replaces the orientation of the request's pose with the requested heading and publishes
    /// it.
    pub fn publish_angle(&self, request: GoalRequest) -> Result<PoseStamped> {
        let mut pose = request
            .original_pose
            .with_context(|| format!("{}: Missing originalPose", self.topic.name()))?;
        let Some(angle) = request.angle.filter(|angle| angle.is_finite()) else {
            bail!("{}: Missing or invalid angle", self.topic.name());
        };

        pose.header.stamp = Stamp::now();
        pose.pose.orientation = yaw_from_degrees(angle).into();
        info!("Publishing {}: {angle} deg", self.topic.name());
        self.topic.publish(pose.clone());
        Ok(pose)
    }
}
